use chrono::{NaiveDate, Utc};
use hr_portal::db::models::{PayrollInput, PayrollRecord, UpdatePayrollRecord};
use hr_portal::services::datasets::PayrollService;
use uuid::Uuid;

fn input(base: f64, allowances: f64, deductions: f64) -> PayrollInput {
    PayrollInput {
        employee_code: "E-42".to_string(),
        employee_name: "Grace".to_string(),
        department: "Finance".to_string(),
        pay_period: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
        base_salary: base,
        allowances,
        deductions,
    }
}

#[test]
fn test_net_pay_is_derived_on_create() {
    let record = PayrollService::to_record(input(4000.0, 150.0, 600.5)).unwrap();
    assert_eq!(record.net_pay, 3549.5);
    assert!(PayrollService::to_record(input(100.0, 0.0, 250.0)).is_err());
}

#[test]
fn test_net_pay_recomputed_from_merged_amounts() {
    let existing = PayrollRecord {
        id: Uuid::new_v4(),
        employee_code: "E-42".to_string(),
        employee_name: "Grace".to_string(),
        department: "Finance".to_string(),
        pay_period: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
        base_salary: 4000.0,
        allowances: 150.0,
        deductions: 600.0,
        net_pay: 3550.0,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    let changes = UpdatePayrollRecord {
        deductions: Some(1000.0),
        ..Default::default()
    };
    let changeset = PayrollService::to_changeset(&existing, changes).unwrap();
    assert_eq!(changeset.net_pay, Some(3150.0));

    let rename = UpdatePayrollRecord {
        employee_name: Some("Grace H.".to_string()),
        ..Default::default()
    };
    let changeset = PayrollService::to_changeset(&existing, rename).unwrap();
    assert_eq!(changeset.net_pay, None);
}
