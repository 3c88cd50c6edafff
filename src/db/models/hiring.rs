use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Double, Text};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// Hiring models
#[derive(Queryable, Selectable, Serialize, Clone, Debug)]
#[diesel(table_name = crate::schema::hiring_records)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct HiringRecord {
    pub id: Uuid,
    pub month: NaiveDate,
    pub department: String,
    pub positions_open: i32,
    pub applications_received: i32,
    pub offers_made: i32,
    pub hires: i32,
    pub time_to_hire_days: f64,
    pub cost_per_hire: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Deserialize, Validate, Clone, Debug)]
#[diesel(table_name = crate::schema::hiring_records)]
pub struct NewHiringRecord {
    pub month: NaiveDate,
    #[validate(length(min = 1, max = 255, message = "Department is required"))]
    pub department: String,
    #[validate(range(min = 0, message = "Positions open cannot be negative"))]
    #[serde(default)]
    pub positions_open: i32,
    #[validate(range(min = 0, message = "Applications received cannot be negative"))]
    #[serde(default)]
    pub applications_received: i32,
    #[validate(range(min = 0, message = "Offers made cannot be negative"))]
    #[serde(default)]
    pub offers_made: i32,
    #[validate(range(min = 0, message = "Hires cannot be negative"))]
    #[serde(default)]
    pub hires: i32,
    #[validate(range(min = 0.0, message = "Time to hire cannot be negative"))]
    #[serde(default)]
    pub time_to_hire_days: f64,
    #[validate(range(min = 0.0, message = "Cost per hire cannot be negative"))]
    #[serde(default)]
    pub cost_per_hire: f64,
}

#[derive(AsChangeset, Deserialize, Validate, Default, Debug)]
#[diesel(table_name = crate::schema::hiring_records)]
pub struct UpdateHiringRecord {
    pub month: Option<NaiveDate>,
    #[validate(length(min = 1, max = 255, message = "Department cannot be empty"))]
    pub department: Option<String>,
    #[validate(range(min = 0))]
    pub positions_open: Option<i32>,
    #[validate(range(min = 0))]
    pub applications_received: Option<i32>,
    #[validate(range(min = 0))]
    pub offers_made: Option<i32>,
    #[validate(range(min = 0))]
    pub hires: Option<i32>,
    #[validate(range(min = 0.0))]
    pub time_to_hire_days: Option<f64>,
    #[validate(range(min = 0.0))]
    pub cost_per_hire: Option<f64>,
}

// Dashboard aggregates
#[derive(QueryableByName, Serialize, Deserialize, Debug, Clone)]
pub struct MonthlyHiring {
    #[diesel(sql_type = Text)]
    pub month: String,
    #[diesel(sql_type = BigInt)]
    pub positions_open: i64,
    #[diesel(sql_type = BigInt)]
    pub offers_made: i64,
    #[diesel(sql_type = BigInt)]
    pub hires: i64,
}

#[derive(QueryableByName, Serialize, Deserialize, Debug, Clone)]
pub struct DepartmentHiring {
    #[diesel(sql_type = Text)]
    pub department: String,
    #[diesel(sql_type = BigInt)]
    pub hires: i64,
    #[diesel(sql_type = Double)]
    pub avg_time_to_hire_days: f64,
}

#[derive(QueryableByName, Serialize, Deserialize, Debug, Clone)]
pub struct HiringTotals {
    #[diesel(sql_type = BigInt)]
    pub positions_open: i64,
    #[diesel(sql_type = BigInt)]
    pub applications_received: i64,
    #[diesel(sql_type = BigInt)]
    pub offers_made: i64,
    #[diesel(sql_type = BigInt)]
    pub hires: i64,
    #[diesel(sql_type = Double)]
    pub avg_time_to_hire_days: f64,
    #[diesel(sql_type = Double)]
    pub avg_cost_per_hire: f64,
    /// hires / offers_made as a percentage, 0 when no offers were made.
    #[diesel(sql_type = Double)]
    pub offer_acceptance_rate: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HiringSummary {
    pub monthly: Vec<MonthlyHiring>,
    pub by_department: Vec<DepartmentHiring>,
    pub totals: HiringTotals,
}
