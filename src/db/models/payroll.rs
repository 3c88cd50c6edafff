use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Double, Text};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Queryable, Selectable, Serialize, Clone, Debug)]
#[diesel(table_name = crate::schema::payroll_records)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PayrollRecord {
    pub id: Uuid,
    pub employee_code: String,
    pub employee_name: String,
    pub department: String,
    pub pay_period: NaiveDate,
    pub base_salary: f64,
    pub allowances: f64,
    pub deductions: f64,
    pub net_pay: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payroll line as submitted by a client or a spreadsheet row. Net pay is
/// never accepted from input.
#[derive(Deserialize, Validate, Clone, Debug)]
pub struct PayrollInput {
    #[validate(length(min = 1, max = 64, message = "Employee code is required"))]
    pub employee_code: String,
    #[validate(length(min = 1, max = 255, message = "Employee name is required"))]
    pub employee_name: String,
    #[validate(length(min = 1, max = 255, message = "Department is required"))]
    pub department: String,
    pub pay_period: NaiveDate,
    #[validate(range(min = 0.0, message = "Base salary cannot be negative"))]
    pub base_salary: f64,
    #[validate(range(min = 0.0, message = "Allowances cannot be negative"))]
    #[serde(default)]
    pub allowances: f64,
    #[validate(range(min = 0.0, message = "Deductions cannot be negative"))]
    #[serde(default)]
    pub deductions: f64,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::payroll_records)]
pub struct NewPayrollRecord {
    pub employee_code: String,
    pub employee_name: String,
    pub department: String,
    pub pay_period: NaiveDate,
    pub base_salary: f64,
    pub allowances: f64,
    pub deductions: f64,
    pub net_pay: f64,
}

#[derive(Deserialize, Validate, Default, Debug)]
pub struct UpdatePayrollRecord {
    #[validate(length(min = 1, max = 64))]
    pub employee_code: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub employee_name: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub department: Option<String>,
    pub pay_period: Option<NaiveDate>,
    #[validate(range(min = 0.0, message = "Base salary cannot be negative"))]
    pub base_salary: Option<f64>,
    #[validate(range(min = 0.0, message = "Allowances cannot be negative"))]
    pub allowances: Option<f64>,
    #[validate(range(min = 0.0, message = "Deductions cannot be negative"))]
    pub deductions: Option<f64>,
}

impl UpdatePayrollRecord {
    pub fn touches_amounts(&self) -> bool {
        self.base_salary.is_some() || self.allowances.is_some() || self.deductions.is_some()
    }
}

#[derive(AsChangeset, Default, Debug)]
#[diesel(table_name = crate::schema::payroll_records)]
pub struct PayrollChangeset {
    pub employee_code: Option<String>,
    pub employee_name: Option<String>,
    pub department: Option<String>,
    pub pay_period: Option<NaiveDate>,
    pub base_salary: Option<f64>,
    pub allowances: Option<f64>,
    pub deductions: Option<f64>,
    pub net_pay: Option<f64>,
}

#[derive(QueryableByName, Serialize, Deserialize, Debug, Clone)]
pub struct MonthlyPayroll {
    #[diesel(sql_type = Text)]
    pub month: String,
    #[diesel(sql_type = Double)]
    pub gross_pay: f64,
    #[diesel(sql_type = Double)]
    pub deductions: f64,
    #[diesel(sql_type = Double)]
    pub net_pay: f64,
    #[diesel(sql_type = BigInt)]
    pub employees: i64,
}

#[derive(QueryableByName, Serialize, Deserialize, Debug, Clone)]
pub struct DepartmentPayroll {
    #[diesel(sql_type = Text)]
    pub department: String,
    #[diesel(sql_type = Double)]
    pub total_net_pay: f64,
    #[diesel(sql_type = Double)]
    pub avg_net_pay: f64,
}

#[derive(QueryableByName, Serialize, Deserialize, Debug, Clone)]
pub struct PayrollTotals {
    #[diesel(sql_type = Double)]
    pub gross_pay: f64,
    #[diesel(sql_type = Double)]
    pub deductions: f64,
    #[diesel(sql_type = Double)]
    pub net_pay: f64,
    #[diesel(sql_type = BigInt)]
    pub records: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PayrollSummary {
    pub monthly: Vec<MonthlyPayroll>,
    pub by_department: Vec<DepartmentPayroll>,
    pub totals: PayrollTotals,
}
