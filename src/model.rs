//! The structured term model the editor UI reads and mutates.

/// A single value stored under a field pair.
#[derive(Debug, Clone, PartialEq)]
pub struct PairValue {
    pub name: String,
    pub negative: bool,
    /// Pre-formatted values (ranges) are emitted verbatim, never brace-wrapped.
    pub no_wrap: bool,
}

/// A field-scoped clause: `field: value[, value...]`.
#[derive(Debug, Clone, PartialEq)]
pub struct PairTerm {
    pub name: String,
    pub values: Vec<PairValue>,
}

/// A bare tag clause: `#tag` or `-tag`.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleTerm {
    pub name: String,
    pub negative: bool,
}

/// The flattened, single-level-conjunction form of one parsed query.
///
/// Built once per AST by the parser and read-only afterwards. Pairs keep
/// first-encountered order and are unique per field name (case-insensitive);
/// singles keep encounter order and are never deduplicated.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedQuery {
    pub pairs: Vec<PairTerm>,
    pub singles: Vec<SingleTerm>,
    /// All free-text fragments of the query, space-joined.
    pub text: String,
    /// True when the source query used logical OR anywhere, which this
    /// flattened model cannot reproduce on recompile.
    pub unsupported_complexity: bool,
}

impl ParsedQuery {
    /// Currently-selected value names for one field, negated values excluded.
    ///
    /// Field lookup is case-insensitive; an empty or unknown field name
    /// yields an empty list.
    pub fn field_values(&self, field: &str) -> Vec<String> {
        if field.is_empty() {
            return Vec::new();
        }

        self.pairs
            .iter()
            .find(|pair| pair.name.to_lowercase() == field.to_lowercase())
            .map(|pair| {
                pair.values
                    .iter()
                    .filter(|value| !value.negative)
                    .map(|value| value.name.clone())
                    .collect()
            })
            .unwrap_or_default()
    }
}
