use chrono::NaiveDate;
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::enums::ApplicationStatus,
    db::models::api::{Page, PageParams},
    db::models::application::{
        Application, ApplicationFilter, ApplicationForm, ApplicationsSummary, NewApplication,
    },
    db::models::job::Job,
    db::repositories::{applications::ApplicationRepo, jobs::JobRepo},
    error::AppError,
};

pub struct ApplicationsService;

impl ApplicationsService {
    /// 404 for an unknown job, 400 when it no longer takes applications.
    pub fn ensure_open_job(conn: &mut PgConnection, job_id: Uuid, today: NaiveDate) -> Result<Job, AppError> {
        let job = JobRepo::find_by_id(conn, job_id)?.ok_or_else(|| AppError::not_found("Job"))?;
        if !job.accepts_applications(today) {
            return Err(AppError::validation("This job is no longer accepting applications"));
        }
        Ok(job)
    }

    pub fn submit(
        conn: &mut PgConnection,
        form: ApplicationForm,
        resume_path: Option<String>,
        today: NaiveDate,
    ) -> Result<Application, AppError> {
        // 保存文件期间职位可能已关闭，这里再检查一次
        Self::ensure_open_job(conn, form.job_id, today)?;

        let new_application = NewApplication {
            job_id: form.job_id,
            full_name: form.full_name,
            email: form.email.to_lowercase(),
            phone: form.phone,
            cover_letter: form.cover_letter,
            resume_path,
            status: ApplicationStatus::Pending,
        };

        let application = ApplicationRepo::insert(conn, &new_application)?;
        tracing::info!(application_id = %application.id, job_id = %application.job_id, "Application received");
        Ok(application)
    }

    pub fn list(
        conn: &mut PgConnection,
        filter: &ApplicationFilter,
        page: &PageParams,
    ) -> Result<Page<Application>, AppError> {
        Ok(ApplicationRepo::list(conn, filter, page)?)
    }

    pub fn get(conn: &mut PgConnection, application_id: Uuid) -> Result<Application, AppError> {
        ApplicationRepo::find_by_id(conn, application_id)?
            .ok_or_else(|| AppError::not_found("Application"))
    }

    pub fn update_status(
        conn: &mut PgConnection,
        application_id: Uuid,
        status: ApplicationStatus,
    ) -> Result<Application, AppError> {
        ApplicationRepo::update_status(conn, application_id, status)?
            .ok_or_else(|| AppError::not_found("Application"))
    }

    pub fn delete(conn: &mut PgConnection, application_id: Uuid) -> Result<Application, AppError> {
        ApplicationRepo::delete(conn, application_id)?
            .ok_or_else(|| AppError::not_found("Application"))
    }

    pub fn summary(conn: &mut PgConnection) -> Result<ApplicationsSummary, AppError> {
        Ok(ApplicationRepo::summary(conn)?)
    }
}
