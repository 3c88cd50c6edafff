use crate::db::enums::ApplicationStatus;
use crate::error::{AppError, AppResult};
use crate::utils::uploads::FormData;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// Candidate application models
#[derive(Queryable, Selectable, Serialize, Clone, Debug)]
#[diesel(table_name = crate::schema::applications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Application {
    pub id: Uuid,
    pub job_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub cover_letter: Option<String>,
    pub resume_path: Option<String>,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::applications)]
pub struct NewApplication {
    pub job_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub cover_letter: Option<String>,
    pub resume_path: Option<String>,
    pub status: ApplicationStatus,
}

/// Text fields of the public application form.
#[derive(Validate, Debug, Clone)]
pub struct ApplicationForm {
    pub job_id: Uuid,
    #[validate(length(min = 1, max = 255, message = "Full name is required"))]
    pub full_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 5, max = 50, message = "Phone number must be between 5 and 50 characters"))]
    pub phone: Option<String>,
    #[validate(length(max = 10000, message = "Cover letter is too long"))]
    pub cover_letter: Option<String>,
}

impl ApplicationForm {
    pub fn from_form(form: &FormData) -> AppResult<Self> {
        let job_id = form
            .text("job_id")
            .ok_or_else(|| AppError::validation("job_id is required"))?
            .trim()
            .parse::<Uuid>()
            .map_err(|_| AppError::validation("job_id must be a valid UUID"))?;
        let non_empty = |name: &str| {
            form.text(name)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        Ok(Self {
            job_id,
            full_name: non_empty("full_name").unwrap_or_default(),
            email: non_empty("email").unwrap_or_default(),
            phone: non_empty("phone"),
            cover_letter: non_empty("cover_letter"),
        })
    }
}

#[derive(Deserialize)]
pub struct UpdateApplicationStatusRequest {
    pub status: ApplicationStatus,
}

#[derive(Deserialize, Debug, Default)]
pub struct ApplicationFilter {
    pub job_id: Option<Uuid>,
    pub status: Option<ApplicationStatus>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ApplicationStatusCount {
    pub status: ApplicationStatus,
    pub count: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct JobApplicationCount {
    pub job_id: Uuid,
    pub job_title: String,
    pub count: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ApplicationsSummary {
    pub total: i64,
    pub by_status: Vec<ApplicationStatusCount>,
    pub by_job: Vec<JobApplicationCount>,
}
