pub mod ingest;
pub mod uploads;

pub use uploads::{FormData, UploadKind, UploadStore, UploadedFile};

/// Normalises a form field or spreadsheet header to snake_case:
/// `"Positions Open"`, `"positionsOpen"` and `"positions-open"` all become
/// `positions_open`.
pub fn snake_case_key(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_lower_or_digit = false;

    for ch in raw.trim().trim_start_matches('\u{feff}').chars() {
        if ch.is_alphanumeric() {
            if ch.is_uppercase() {
                if prev_lower_or_digit && !out.ends_with('_') {
                    out.push('_');
                }
                out.extend(ch.to_lowercase());
                prev_lower_or_digit = false;
            } else {
                out.push(ch);
                prev_lower_or_digit = true;
            }
        } else if !out.is_empty() && !out.ends_with('_') {
            out.push('_');
            prev_lower_or_digit = false;
        }
    }

    while out.ends_with('_') {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::snake_case_key;

    #[test]
    fn test_snake_case_key() {
        assert_eq!(snake_case_key("Positions Open"), "positions_open");
        assert_eq!(snake_case_key("positionsOpen"), "positions_open");
        assert_eq!(snake_case_key("positions-open"), "positions_open");
        assert_eq!(snake_case_key(" Time to hire (days) "), "time_to_hire_days");
        assert_eq!(snake_case_key("employee_code"), "employee_code");
        assert_eq!(snake_case_key("\u{feff}Department"), "department");
        assert_eq!(snake_case_key("isPublished"), "is_published");
    }
}
