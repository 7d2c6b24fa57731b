//! Serializes the structured term model back into canonical query text.

use crate::model::ParsedQuery;

/// Compile a parsed query into the textual form the search backend accepts.
///
/// The emission order is part of the contract: singles first, then pairs,
/// then the free text. The backend's own parser re-reads this string, and
/// reordering the fragments changes how it re-interprets them.
pub fn compile(query: &ParsedQuery) -> String {
    let mut parts: Vec<String> = Vec::new();

    for single in &query.singles {
        let marker = if single.negative { '-' } else { '#' };
        parts.push(format!("{}{}", marker, wrap(&single.name)));
    }

    for pair in &query.pairs {
        let values = pair
            .values
            .iter()
            .map(|value| {
                let name = if value.no_wrap {
                    value.name.clone()
                } else {
                    wrap(&value.name)
                };
                if value.negative {
                    format!("-{}", name)
                } else {
                    name
                }
            })
            .collect::<Vec<_>>()
            .join(", ");

        parts.push(format!("{}: {}", pair.name, values));
    }

    let text = to_non_structural(&query.text);
    if !text.is_empty() {
        parts.push(text);
    }

    parts.join(" ").trim().to_string()
}

/// Brace-wrap a token containing a space, otherwise return it unchanged.
pub fn wrap(name: &str) -> String {
    if name.contains(' ') {
        format!("{{{}}}", name)
    } else {
        name.to_string()
    }
}

/// Brace-wrap free text so the backend reads it as one non-structural block.
/// Blank text yields an empty string.
pub fn to_non_structural(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{{{}}}", trimmed)
    }
}
