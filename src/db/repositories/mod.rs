pub mod applications;
pub mod datasets;
pub mod jobs;
pub mod messages;
pub mod news;
pub mod users;

/// Rows per INSERT statement during bulk imports. Keeps a statement well
/// below the PostgreSQL bind parameter limit.
pub const INSERT_CHUNK_SIZE: usize = 1000;

/// `%term%` for ILIKE, with the term's own `%`, `_` and `\` matched literally.
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("payroll"), "%payroll%");
        assert_eq!(contains_pattern("100%"), "%100\\%%");
        assert_eq!(contains_pattern("hr_ops"), "%hr\\_ops%");
        assert_eq!(contains_pattern("a\\b"), "%a\\\\b%");
    }
}
