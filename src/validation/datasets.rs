use chrono::NaiveDate;

use crate::error::AppError;

pub fn validate_hiring_funnel(offers_made: i32, hires: i32) -> Result<(), AppError> {
    if hires > offers_made {
        return Err(AppError::validation("Hires cannot exceed offers made"));
    }
    Ok(())
}

pub fn validate_training_schedule(start_date: NaiveDate, end_date: NaiveDate) -> Result<(), AppError> {
    if end_date < start_date {
        return Err(AppError::validation("End date cannot be before start date"));
    }
    Ok(())
}

pub fn validate_training_completion(participants: i32, completed: i32) -> Result<(), AppError> {
    if completed > participants {
        return Err(AppError::validation("Completed cannot exceed participants"));
    }
    Ok(())
}

pub fn validate_enps(enps: i32) -> Result<(), AppError> {
    if !(-100..=100).contains(&enps) {
        return Err(AppError::validation("eNPS must be between -100 and 100"));
    }
    Ok(())
}

pub fn validate_request_counts(open_requests: i32, resolved_requests: i32) -> Result<(), AppError> {
    if resolved_requests > open_requests {
        return Err(AppError::validation(
            "Resolved requests cannot exceed open requests",
        ));
    }
    Ok(())
}

/// net = base + allowances - deductions, rounded to cents.
pub fn compute_net_pay(base_salary: f64, allowances: f64, deductions: f64) -> Result<f64, AppError> {
    let net = ((base_salary + allowances - deductions) * 100.0).round() / 100.0;
    if !net.is_finite() {
        return Err(AppError::validation("Payroll amounts must be finite numbers"));
    }
    if net < 0.0 {
        return Err(AppError::validation("Deductions cannot exceed gross pay"));
    }
    Ok(net)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hiring_funnel() {
        assert!(validate_hiring_funnel(5, 5).is_ok());
        assert!(validate_hiring_funnel(5, 6).is_err());
    }

    #[test]
    fn test_training_rules() {
        let start = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
        assert!(validate_training_schedule(start, end).is_ok());
        assert!(validate_training_schedule(start, start).is_ok());
        assert!(validate_training_schedule(end, start).is_err());
        assert!(validate_training_completion(10, 10).is_ok());
        assert!(validate_training_completion(10, 11).is_err());
    }

    #[test]
    fn test_enps_and_requests() {
        assert!(validate_enps(-100).is_ok());
        assert!(validate_enps(100).is_ok());
        assert!(validate_enps(101).is_err());
        assert!(validate_request_counts(4, 4).is_ok());
        assert!(validate_request_counts(4, 5).is_err());
    }

    #[test]
    fn test_compute_net_pay() {
        assert_eq!(compute_net_pay(3000.0, 250.5, 400.25).unwrap(), 2850.25);
        assert_eq!(compute_net_pay(100.0, 0.0, 100.0).unwrap(), 0.0);
        assert!(compute_net_pay(100.0, 0.0, 100.01).is_err());
        assert!(compute_net_pay(f64::INFINITY, 0.0, 0.0).is_err());
    }
}
