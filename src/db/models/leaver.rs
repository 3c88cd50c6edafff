use crate::db::enums::LeaveReason;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Double, Text};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Queryable, Selectable, Serialize, Clone, Debug)]
#[diesel(table_name = crate::schema::leavers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Leaver {
    pub id: Uuid,
    pub employee_code: String,
    pub employee_name: String,
    pub department: String,
    pub position: String,
    pub leave_date: NaiveDate,
    pub reason: LeaveReason,
    pub tenure_months: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Deserialize, Validate, Clone, Debug)]
#[diesel(table_name = crate::schema::leavers)]
pub struct NewLeaver {
    #[validate(length(min = 1, max = 64, message = "Employee code is required"))]
    pub employee_code: String,
    #[validate(length(min = 1, max = 255, message = "Employee name is required"))]
    pub employee_name: String,
    #[validate(length(min = 1, max = 255, message = "Department is required"))]
    pub department: String,
    #[validate(length(min = 1, max = 255, message = "Position is required"))]
    pub position: String,
    pub leave_date: NaiveDate,
    pub reason: LeaveReason,
    #[validate(range(min = 0, message = "Tenure cannot be negative"))]
    #[serde(default)]
    pub tenure_months: i32,
}

#[derive(AsChangeset, Deserialize, Validate, Default, Debug)]
#[diesel(table_name = crate::schema::leavers)]
pub struct UpdateLeaver {
    #[validate(length(min = 1, max = 64))]
    pub employee_code: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub employee_name: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub department: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub position: Option<String>,
    pub leave_date: Option<NaiveDate>,
    pub reason: Option<LeaveReason>,
    #[validate(range(min = 0, message = "Tenure cannot be negative"))]
    pub tenure_months: Option<i32>,
}

#[derive(QueryableByName, Serialize, Deserialize, Debug, Clone)]
pub struct MonthlyLeavers {
    #[diesel(sql_type = Text)]
    pub month: String,
    #[diesel(sql_type = BigInt)]
    pub leavers: i64,
}

#[derive(QueryableByName, Serialize, Deserialize, Debug, Clone)]
pub struct LeaversByReason {
    #[diesel(sql_type = Text)]
    pub reason: String,
    #[diesel(sql_type = BigInt)]
    pub leavers: i64,
}

#[derive(QueryableByName, Serialize, Deserialize, Debug, Clone)]
pub struct DepartmentLeavers {
    #[diesel(sql_type = Text)]
    pub department: String,
    #[diesel(sql_type = BigInt)]
    pub leavers: i64,
    #[diesel(sql_type = Double)]
    pub avg_tenure_months: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LeaversSummary {
    pub total: i64,
    pub monthly: Vec<MonthlyLeavers>,
    pub by_reason: Vec<LeaversByReason>,
    pub by_department: Vec<DepartmentLeavers>,
}
