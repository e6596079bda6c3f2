//! Repositories for report persistence

pub mod election_funds;
pub mod political_funds;

pub use election_funds::ElectionFundsRepository;
pub use political_funds::PoliticalFundsRepository;

/// Build a `LIKE` pattern matching `needle` anywhere, with wildcards escaped
pub(crate) fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Trimmed filter value, or `None` when blank
pub(crate) fn text_filter(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
