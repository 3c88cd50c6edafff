use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Double, Text};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Queryable, Selectable, Serialize, Clone, Debug)]
#[diesel(table_name = crate::schema::engagement_surveys)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct EngagementSurvey {
    pub id: Uuid,
    pub period: NaiveDate,
    pub department: String,
    pub score: f64,
    pub participation_rate: f64,
    pub enps: i32,
    pub respondents: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Deserialize, Validate, Clone, Debug)]
#[diesel(table_name = crate::schema::engagement_surveys)]
pub struct NewEngagementSurvey {
    pub period: NaiveDate,
    #[validate(length(min = 1, max = 255, message = "Department is required"))]
    pub department: String,
    #[validate(range(min = 0.0, max = 100.0, message = "Score must be between 0 and 100"))]
    pub score: f64,
    #[validate(range(
        min = 0.0,
        max = 100.0,
        message = "Participation rate must be between 0 and 100"
    ))]
    pub participation_rate: f64,
    #[serde(default, alias = "e_nps")]
    pub enps: i32,
    #[validate(range(min = 0, message = "Respondents cannot be negative"))]
    #[serde(default)]
    pub respondents: i32,
}

#[derive(AsChangeset, Deserialize, Validate, Default, Debug)]
#[diesel(table_name = crate::schema::engagement_surveys)]
pub struct UpdateEngagementSurvey {
    pub period: Option<NaiveDate>,
    #[validate(length(min = 1, max = 255))]
    pub department: Option<String>,
    #[validate(range(min = 0.0, max = 100.0, message = "Score must be between 0 and 100"))]
    pub score: Option<f64>,
    #[validate(range(
        min = 0.0,
        max = 100.0,
        message = "Participation rate must be between 0 and 100"
    ))]
    pub participation_rate: Option<f64>,
    #[serde(alias = "e_nps")]
    pub enps: Option<i32>,
    #[validate(range(min = 0))]
    pub respondents: Option<i32>,
}

#[derive(QueryableByName, Serialize, Deserialize, Debug, Clone)]
pub struct MonthlyEngagement {
    #[diesel(sql_type = Text)]
    pub month: String,
    #[diesel(sql_type = Double)]
    pub avg_score: f64,
    #[diesel(sql_type = Double)]
    pub avg_participation_rate: f64,
}

#[derive(QueryableByName, Serialize, Deserialize, Debug, Clone)]
pub struct DepartmentEngagement {
    #[diesel(sql_type = Text)]
    pub department: String,
    #[diesel(sql_type = Double)]
    pub avg_score: f64,
    #[diesel(sql_type = Double)]
    pub avg_enps: f64,
    #[diesel(sql_type = BigInt)]
    pub respondents: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct EngagementSummary {
    pub monthly: Vec<MonthlyEngagement>,
    pub by_department: Vec<DepartmentEngagement>,
}
