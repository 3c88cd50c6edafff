use chrono::NaiveDate;

use crate::error::AppError;

pub fn validate_closing_date(closing_date: Option<NaiveDate>, today: NaiveDate) -> Result<(), AppError> {
    if let Some(date) = closing_date {
        if date < today {
            return Err(AppError::validation("Closing date cannot be in the past"));
        }
    }
    Ok(())
}

/// Trims requirements and drops blank entries.
pub fn clean_requirements(requirements: &[String]) -> Vec<String> {
    requirements
        .iter()
        .map(|r| r.trim())
        .filter(|r| !r.is_empty())
        .map(|r| r.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closing_date() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert!(validate_closing_date(None, today).is_ok());
        assert!(validate_closing_date(Some(today), today).is_ok());
        assert!(validate_closing_date(today.pred_opt(), today).is_err());
    }

    #[test]
    fn test_clean_requirements() {
        let cleaned = clean_requirements(&[
            " Rust ".to_string(),
            "".to_string(),
            "SQL".to_string(),
        ]);
        assert_eq!(cleaned, vec!["Rust", "SQL"]);
    }
}
