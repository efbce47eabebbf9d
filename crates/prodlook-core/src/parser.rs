//! Input parser: turns pasted text into identifier tokens.
//!
//! Users paste codes straight out of spreadsheets, e-mails and chat, so any
//! run of whitespace, commas or semicolons separates two tokens. Order and
//! duplicates are kept; matching is set membership, so they are harmless.

use std::sync::LazyLock;

use regex::Regex;

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s,;]+").expect("separator pattern is valid"));

/// Split `input` into trimmed, non-empty tokens.
///
/// An empty result means the user typed nothing useful. Callers report that
/// as [`SearchOutcome::EmptyInput`](crate::types::SearchOutcome::EmptyInput),
/// not as "zero matches".
pub fn parse_tokens(input: &str) -> Vec<String> {
    SEPARATORS
        .split(input)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case::commas("100,200,300", &["100", "200", "300"])]
    #[case::mixed("100, 200;300\n400\t500", &["100", "200", "300", "400", "500"])]
    #[case::runs(",,;; 100 ;;, ,200,,", &["100", "200"])]
    #[case::crlf("100\r\n200\r\n", &["100", "200"])]
    #[case::duplicates("7 7 7", &["7", "7", "7"])]
    #[case::leading_zeros("007;0010", &["007", "0010"])]
    fn splits_on_separator_runs(#[case] input: &str, #[case] expected: &[&str]) {
        assert_eq!(parse_tokens(input), expected);
    }

    #[test]
    fn empty_input_yields_no_tokens() {
        assert!(parse_tokens("").is_empty());
        assert!(parse_tokens("   \n\t ").is_empty());
    }

    #[test]
    fn tokens_are_not_case_folded() {
        assert_eq!(parse_tokens("ab-1 AB-1"), vec!["ab-1", "AB-1"]);
    }

    proptest! {
        #[test]
        fn separator_only_input_is_empty(s in "[ ,;\n\r\t]*") {
            prop_assert!(parse_tokens(&s).is_empty());
        }

        #[test]
        fn tokens_never_contain_separators(s in ".{0,64}") {
            for t in parse_tokens(&s) {
                prop_assert!(!t.is_empty());
                prop_assert!(!t.contains([',', ';']));
                prop_assert!(!t.chars().any(char::is_whitespace));
            }
        }
    }
}
