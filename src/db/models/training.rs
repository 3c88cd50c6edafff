use crate::db::enums::TrainingStatus;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Double, Text};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Queryable, Selectable, Serialize, Clone, Debug)]
#[diesel(table_name = crate::schema::training_programs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TrainingProgram {
    pub id: Uuid,
    pub title: String,
    pub department: String,
    pub trainer: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub participants: i32,
    pub completed: i32,
    pub cost: f64,
    pub status: TrainingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_training_status() -> TrainingStatus {
    TrainingStatus::Planned
}

#[derive(Insertable, Deserialize, Validate, Clone, Debug)]
#[diesel(table_name = crate::schema::training_programs)]
pub struct NewTrainingProgram {
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, max = 255, message = "Department is required"))]
    pub department: String,
    #[validate(length(min = 1, max = 255, message = "Trainer is required"))]
    pub trainer: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[validate(range(min = 0, message = "Participants cannot be negative"))]
    #[serde(default)]
    pub participants: i32,
    #[validate(range(min = 0, message = "Completed cannot be negative"))]
    #[serde(default)]
    pub completed: i32,
    #[validate(range(min = 0.0, message = "Cost cannot be negative"))]
    #[serde(default)]
    pub cost: f64,
    #[serde(default = "default_training_status")]
    pub status: TrainingStatus,
}

#[derive(AsChangeset, Deserialize, Validate, Default, Debug)]
#[diesel(table_name = crate::schema::training_programs)]
pub struct UpdateTrainingProgram {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub department: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub trainer: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[validate(range(min = 0))]
    pub participants: Option<i32>,
    #[validate(range(min = 0))]
    pub completed: Option<i32>,
    #[validate(range(min = 0.0))]
    pub cost: Option<f64>,
    pub status: Option<TrainingStatus>,
}

#[derive(QueryableByName, Serialize, Deserialize, Debug, Clone)]
pub struct DepartmentTraining {
    #[diesel(sql_type = Text)]
    pub department: String,
    #[diesel(sql_type = BigInt)]
    pub programs: i64,
    #[diesel(sql_type = BigInt)]
    pub participants: i64,
    /// completed / participants as a percentage.
    #[diesel(sql_type = Double)]
    pub completion_rate: f64,
    #[diesel(sql_type = Double)]
    pub total_cost: f64,
}

#[derive(QueryableByName, Serialize, Deserialize, Debug, Clone)]
pub struct TrainingByStatus {
    #[diesel(sql_type = Text)]
    pub status: String,
    #[diesel(sql_type = BigInt)]
    pub programs: i64,
}

#[derive(QueryableByName, Serialize, Deserialize, Debug, Clone)]
pub struct MonthlyTraining {
    #[diesel(sql_type = Text)]
    pub month: String,
    #[diesel(sql_type = BigInt)]
    pub programs: i64,
    #[diesel(sql_type = BigInt)]
    pub participants: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TrainingSummary {
    pub by_department: Vec<DepartmentTraining>,
    pub by_status: Vec<TrainingByStatus>,
    pub monthly: Vec<MonthlyTraining>,
}
