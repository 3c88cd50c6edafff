use crate::db::enums::EmploymentType;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Double, Text};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Queryable, Selectable, Serialize, Clone, Debug)]
#[diesel(table_name = crate::schema::demographics)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Demographic {
    pub id: Uuid,
    pub employee_code: String,
    pub department: String,
    pub gender: String,
    pub age: i32,
    pub nationality: Option<String>,
    pub employment_type: EmploymentType,
    pub hire_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Deserialize, Validate, Clone, Debug)]
#[diesel(table_name = crate::schema::demographics)]
pub struct NewDemographic {
    #[validate(length(min = 1, max = 64, message = "Employee code is required"))]
    pub employee_code: String,
    #[validate(length(min = 1, max = 255, message = "Department is required"))]
    pub department: String,
    #[validate(length(min = 1, max = 32, message = "Gender is required"))]
    pub gender: String,
    #[validate(range(min = 16, max = 100, message = "Age must be between 16 and 100"))]
    pub age: i32,
    #[validate(length(max = 128))]
    pub nationality: Option<String>,
    pub employment_type: EmploymentType,
    pub hire_date: NaiveDate,
}

#[derive(AsChangeset, Deserialize, Validate, Default, Debug)]
#[diesel(table_name = crate::schema::demographics)]
pub struct UpdateDemographic {
    #[validate(length(min = 1, max = 64))]
    pub employee_code: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub department: Option<String>,
    #[validate(length(min = 1, max = 32))]
    pub gender: Option<String>,
    #[validate(range(min = 16, max = 100, message = "Age must be between 16 and 100"))]
    pub age: Option<i32>,
    #[validate(length(max = 128))]
    pub nationality: Option<String>,
    pub employment_type: Option<EmploymentType>,
    pub hire_date: Option<NaiveDate>,
}

/// A (label, count) pair used by every demographic breakdown.
#[derive(QueryableByName, Serialize, Deserialize, Debug, Clone)]
pub struct DemographicBucket {
    #[diesel(sql_type = Text)]
    pub label: String,
    #[diesel(sql_type = BigInt)]
    pub employees: i64,
}

#[derive(QueryableByName, Serialize, Deserialize, Debug, Clone)]
pub struct DemographicTotals {
    #[diesel(sql_type = BigInt)]
    pub employees: i64,
    #[diesel(sql_type = Double)]
    pub avg_age: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DemographicsSummary {
    pub totals: DemographicTotals,
    pub by_gender: Vec<DemographicBucket>,
    pub by_age_band: Vec<DemographicBucket>,
    pub by_department: Vec<DemographicBucket>,
    pub by_employment_type: Vec<DemographicBucket>,
}
