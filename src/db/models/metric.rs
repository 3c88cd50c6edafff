use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use diesel::sql_types::{Date, Double, Nullable, Text};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Queryable, Selectable, Serialize, Clone, Debug)]
#[diesel(table_name = crate::schema::hr_metrics)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Metric {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub value: f64,
    pub target: Option<f64>,
    pub unit: Option<String>,
    pub period: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Deserialize, Validate, Clone, Debug)]
#[diesel(table_name = crate::schema::hr_metrics)]
pub struct NewMetric {
    #[validate(length(min = 1, max = 255, message = "Metric name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 255, message = "Category is required"))]
    pub category: String,
    pub value: f64,
    pub target: Option<f64>,
    #[validate(length(max = 32))]
    pub unit: Option<String>,
    pub period: NaiveDate,
}

#[derive(AsChangeset, Deserialize, Validate, Default, Debug)]
#[diesel(table_name = crate::schema::hr_metrics)]
pub struct UpdateMetric {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub category: Option<String>,
    pub value: Option<f64>,
    pub target: Option<f64>,
    #[validate(length(max = 32))]
    pub unit: Option<String>,
    pub period: Option<NaiveDate>,
}

/// Most recent reading of one metric.
#[derive(QueryableByName, Serialize, Deserialize, Debug, Clone)]
pub struct LatestMetric {
    #[diesel(sql_type = Text)]
    pub name: String,
    #[diesel(sql_type = Text)]
    pub category: String,
    #[diesel(sql_type = Double)]
    pub value: f64,
    #[diesel(sql_type = Nullable<Double>)]
    pub target: Option<f64>,
    #[diesel(sql_type = Nullable<Text>)]
    pub unit: Option<String>,
    #[diesel(sql_type = Date)]
    pub period: NaiveDate,
    /// value / target as a percentage; absent without a non-zero target.
    #[diesel(sql_type = Nullable<Double>)]
    pub attainment: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MetricsSummary {
    pub latest: Vec<LatestMetric>,
}
