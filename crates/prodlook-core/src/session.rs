//! Session-scoped key-value store for UI state that must survive redraws,
//! such as the remembered query text.
//!
//! A [`Session`] is created when the UI starts, emptied by the "new search"
//! action and dropped when the UI exits. Nothing in it outlives the process.

use std::collections::HashMap;

/// Key under which the query bar text is remembered.
pub const INPUT_KEY: &str = "input";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Session {
    values: HashMap<String, String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        tracing::trace!(key = %key, "session: set");
        self.values.insert(key, value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    /// Drop every value. Used by the "new search" action.
    pub fn clear(&mut self) {
        tracing::debug!(keys = self.values.len(), "session: cleared");
        self.values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The remembered query text, or `""` when nothing was typed yet.
    pub fn input(&self) -> &str {
        self.get(INPUT_KEY).unwrap_or_default()
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.set(INPUT_KEY, input);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle() {
        let mut s = Session::new();
        assert!(s.is_empty());
        assert_eq!(s.input(), "");

        s.set_input("100, 200");
        s.set("last_export", "resultado.csv");
        assert_eq!(s.input(), "100, 200");
        assert_eq!(s.get("last_export"), Some("resultado.csv"));

        s.clear();
        assert!(s.is_empty());
        assert_eq!(s.input(), "");
    }

    #[test]
    fn set_overwrites_and_remove_returns_old_value() {
        let mut s = Session::new();
        s.set_input("1");
        s.set_input("2");
        assert_eq!(s.remove(INPUT_KEY).as_deref(), Some("2"));
        assert_eq!(s.get(INPUT_KEY), None);
    }
}
