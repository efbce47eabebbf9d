//! Reference tables used across harnesses.

use prodlook_core::ReferenceTable;

/// The two-row table the acceptance scenarios are written against.
pub fn scenario_table() -> ReferenceTable {
    ReferenceTable::from_rows([("100", "widget", "9.99"), ("200", "gadget", "$5")])
}

/// A slightly messier catalogue: accented text, null and prefixed prices,
/// identifiers with stray whitespace.
pub fn catalogue_table() -> ReferenceTable {
    ReferenceTable::from_rows([
        ("A-1", "açúcar refinado", "4.50"),
        ("A-2", "café torrado", "nan"),
        (" A-3 ", "feijão preto", "$7"),
        ("B-9", "arroz", ""),
        ("C-7", "óleo de soja", "N/A"),
    ])
}

/// Header row in Portuguese, to exercise alias resolution.
pub const PT_HEADER: [&str; 3] = ["Código", "Descrição", "Preço"];
