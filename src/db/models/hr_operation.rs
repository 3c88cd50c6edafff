use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Double, Text};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Queryable, Selectable, Serialize, Clone, Debug)]
#[diesel(table_name = crate::schema::hr_operations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct HrOperation {
    pub id: Uuid,
    pub period: NaiveDate,
    pub department: String,
    pub headcount: i32,
    pub new_joiners: i32,
    pub absenteeism_rate: f64,
    pub overtime_hours: f64,
    pub open_requests: i32,
    pub resolved_requests: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Deserialize, Validate, Clone, Debug)]
#[diesel(table_name = crate::schema::hr_operations)]
pub struct NewHrOperation {
    pub period: NaiveDate,
    #[validate(length(min = 1, max = 255, message = "Department is required"))]
    pub department: String,
    #[validate(range(min = 0, message = "Headcount cannot be negative"))]
    pub headcount: i32,
    #[validate(range(min = 0, message = "New joiners cannot be negative"))]
    #[serde(default)]
    pub new_joiners: i32,
    #[validate(range(
        min = 0.0,
        max = 100.0,
        message = "Absenteeism rate must be between 0 and 100"
    ))]
    #[serde(default)]
    pub absenteeism_rate: f64,
    #[validate(range(min = 0.0, message = "Overtime hours cannot be negative"))]
    #[serde(default)]
    pub overtime_hours: f64,
    #[validate(range(min = 0, message = "Open requests cannot be negative"))]
    #[serde(default)]
    pub open_requests: i32,
    #[validate(range(min = 0, message = "Resolved requests cannot be negative"))]
    #[serde(default)]
    pub resolved_requests: i32,
}

#[derive(AsChangeset, Deserialize, Validate, Default, Debug)]
#[diesel(table_name = crate::schema::hr_operations)]
pub struct UpdateHrOperation {
    pub period: Option<NaiveDate>,
    #[validate(length(min = 1, max = 255))]
    pub department: Option<String>,
    #[validate(range(min = 0))]
    pub headcount: Option<i32>,
    #[validate(range(min = 0))]
    pub new_joiners: Option<i32>,
    #[validate(range(
        min = 0.0,
        max = 100.0,
        message = "Absenteeism rate must be between 0 and 100"
    ))]
    pub absenteeism_rate: Option<f64>,
    #[validate(range(min = 0.0))]
    pub overtime_hours: Option<f64>,
    #[validate(range(min = 0))]
    pub open_requests: Option<i32>,
    #[validate(range(min = 0))]
    pub resolved_requests: Option<i32>,
}

#[derive(QueryableByName, Serialize, Deserialize, Debug, Clone)]
pub struct MonthlyOperations {
    #[diesel(sql_type = Text)]
    pub month: String,
    #[diesel(sql_type = BigInt)]
    pub headcount: i64,
    #[diesel(sql_type = BigInt)]
    pub new_joiners: i64,
    #[diesel(sql_type = Double)]
    pub avg_absenteeism_rate: f64,
}

#[derive(QueryableByName, Serialize, Deserialize, Debug, Clone)]
pub struct DepartmentOperations {
    #[diesel(sql_type = Text)]
    pub department: String,
    #[diesel(sql_type = Double)]
    pub overtime_hours: f64,
    #[diesel(sql_type = BigInt)]
    pub open_requests: i64,
    #[diesel(sql_type = BigInt)]
    pub resolved_requests: i64,
    /// resolved / open as a percentage, 0 when nothing was opened.
    #[diesel(sql_type = Double)]
    pub resolution_rate: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HrOperationsSummary {
    pub monthly: Vec<MonthlyOperations>,
    pub by_department: Vec<DepartmentOperations>,
}
