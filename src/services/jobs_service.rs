use chrono::{NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::models::job::{Job, JobFilter, NewJob, UpdateJob},
    db::repositories::jobs::JobRepo,
    error::AppError,
    validation::job::{clean_requirements, validate_closing_date},
};

pub struct JobsService;

impl JobsService {
    pub fn list(conn: &mut PgConnection, filter: &JobFilter) -> Result<Vec<Job>, AppError> {
        Ok(JobRepo::list(conn, filter)?)
    }

    pub fn get(conn: &mut PgConnection, job_id: Uuid) -> Result<Job, AppError> {
        JobRepo::find_by_id(conn, job_id)?.ok_or_else(|| AppError::not_found("Job"))
    }

    pub fn create(conn: &mut PgConnection, mut new_job: NewJob, today: NaiveDate) -> Result<Job, AppError> {
        validate_closing_date(new_job.closing_date, today)?;
        new_job.requirements = clean_requirements(&new_job.requirements);

        let job = JobRepo::insert(conn, &new_job)?;
        tracing::info!(job_id = %job.id, title = %job.title, "Job posted");
        Ok(job)
    }

    pub fn update(conn: &mut PgConnection, job_id: Uuid, mut changes: UpdateJob) -> Result<Job, AppError> {
        if changes.is_empty() {
            return Err(AppError::validation("No update data provided"));
        }
        if let Some(requirements) = changes.requirements.as_deref() {
            changes.requirements = Some(clean_requirements(requirements));
        }
        JobRepo::update(conn, job_id, &changes)?.ok_or_else(|| AppError::not_found("Job"))
    }

    /// Returns the resume paths of the applications removed with the job.
    pub fn delete(conn: &mut PgConnection, job_id: Uuid) -> Result<Vec<String>, AppError> {
        let resumes = JobRepo::delete_with_resumes(conn, job_id)?
            .ok_or_else(|| AppError::not_found("Job"))?;
        tracing::info!(job_id = %job_id, applications = resumes.len(), "Job deleted");
        Ok(resumes)
    }

    pub fn today() -> NaiveDate {
        Utc::now().date_naive()
    }
}
