use crate::db::enums::{EmploymentType, JobStatus};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// Job posting models
#[derive(Queryable, Selectable, Serialize, Clone, Debug)]
#[diesel(table_name = crate::schema::jobs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub department: String,
    pub location: String,
    pub employment_type: EmploymentType,
    pub description: String,
    pub requirements: Vec<String>,
    pub salary_range: Option<String>,
    pub status: JobStatus,
    pub closing_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    /// Open and not past its closing date.
    pub fn accepts_applications(&self, today: NaiveDate) -> bool {
        self.status == JobStatus::Open && self.closing_date.is_none_or(|date| date >= today)
    }
}

fn default_job_status() -> JobStatus {
    JobStatus::Open
}

#[derive(Insertable, Deserialize, Validate, Clone, Debug)]
#[diesel(table_name = crate::schema::jobs)]
pub struct NewJob {
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 255, message = "Department is required"))]
    pub department: String,
    #[validate(length(min = 1, max = 255, message = "Location is required"))]
    pub location: String,
    pub employment_type: EmploymentType,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[validate(length(max = 128))]
    pub salary_range: Option<String>,
    #[serde(default = "default_job_status")]
    pub status: JobStatus,
    pub closing_date: Option<NaiveDate>,
}

#[derive(AsChangeset, Deserialize, Validate, Default, Debug)]
#[diesel(table_name = crate::schema::jobs)]
pub struct UpdateJob {
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub department: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub location: Option<String>,
    pub employment_type: Option<EmploymentType>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    pub requirements: Option<Vec<String>>,
    #[validate(length(max = 128))]
    pub salary_range: Option<String>,
    pub status: Option<JobStatus>,
    pub closing_date: Option<NaiveDate>,
}

impl UpdateJob {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.department.is_none()
            && self.location.is_none()
            && self.employment_type.is_none()
            && self.description.is_none()
            && self.requirements.is_none()
            && self.salary_range.is_none()
            && self.status.is_none()
            && self.closing_date.is_none()
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct JobFilter {
    pub status: Option<JobStatus>,
    pub department: Option<String>,
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(status: JobStatus, closing_date: Option<NaiveDate>) -> Job {
        Job {
            id: Uuid::new_v4(),
            title: "Recruiter".to_string(),
            department: "People".to_string(),
            location: "Remote".to_string(),
            employment_type: EmploymentType::FullTime,
            description: "Hire people".to_string(),
            requirements: vec![],
            salary_range: None,
            status,
            closing_date,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_accepts_applications() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let yesterday = NaiveDate::from_ymd_opt(2025, 5, 31).unwrap();
        assert!(job(JobStatus::Open, None).accepts_applications(today));
        assert!(job(JobStatus::Open, Some(today)).accepts_applications(today));
        assert!(!job(JobStatus::Open, Some(yesterday)).accepts_applications(today));
        assert!(!job(JobStatus::Closed, None).accepts_applications(today));
    }
}
