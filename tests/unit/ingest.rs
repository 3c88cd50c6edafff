use hr_portal::db::models::{NewHiringRecord, PayrollInput};
use hr_portal::services::datasets::{DatasetService, HiringService};
use hr_portal::utils::ingest::{collect_rows, parse_rows};

const HIRING_CSV: &str = "\
Month,Department,Positions Open,Applications Received,Offers Made,Hires,Time To Hire Days,Cost Per Hire
2025-01-01,Engineering,4,120,5,3,32.5,4100
2025-01-01,Sales,2,60,2,2,21,2500
";

#[test]
fn test_hiring_sheet_with_display_headers() {
    let rows: Vec<NewHiringRecord> = parse_rows(HIRING_CSV.as_bytes(), HiringService::check).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].department, "Engineering");
    assert_eq!(rows[0].positions_open, 4);
    assert_eq!(rows[1].time_to_hire_days, 21.0);
}

#[test]
fn test_one_bad_row_rejects_whole_sheet() {
    let csv = "\
month,department,offers_made,hires
2025-02-01,Engineering,3,2
2025-02-01,Sales,1,4
2025-02-01,,1,1
";
    let errors = collect_rows::<NewHiringRecord, _>(csv.as_bytes(), HiringService::check).unwrap_err();
    let rows: Vec<usize> = errors.iter().map(|e| e.row).collect();
    assert_eq!(rows, vec![2, 3]);
    assert!(errors[0].message.contains("Hires cannot exceed offers made"));

    let err = parse_rows::<NewHiringRecord, _>(csv.as_bytes(), HiringService::check).unwrap_err();
    assert!(err.to_string().contains("row 2"));
}

#[test]
fn test_payroll_rows_ignore_net_pay_column() {
    let csv = "\
employeeCode,employeeName,department,payPeriod,baseSalary,allowances,deductions,netPay
E-1,Ada,Engineering,2025-03-01,5000,200,700,999999
";
    let rows: Vec<PayrollInput> = parse_rows(csv.as_bytes(), |_| Ok(())).unwrap();
    assert_eq!(rows[0].employee_code, "E-1");
    assert_eq!(rows[0].deductions, 700.0);
}

#[test]
fn test_unparseable_date_reports_row() {
    let csv = "month,department,hires\nJanuary,Ops,1\n";
    let errors = collect_rows::<NewHiringRecord, _>(csv.as_bytes(), |_| Ok(())).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].row, 1);
}
