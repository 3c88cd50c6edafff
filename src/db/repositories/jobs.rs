use chrono::Utc;
use diesel::prelude::*;

use crate::db::models::job::{Job, JobFilter, NewJob, UpdateJob};

pub struct JobRepo;

impl JobRepo {
    pub fn list(conn: &mut PgConnection, filter: &JobFilter) -> Result<Vec<Job>, diesel::result::Error> {
        use crate::schema::jobs::dsl::*;
        let mut query = jobs.into_boxed();

        if let Some(job_status) = filter.status {
            query = query.filter(status.eq(job_status));
        }
        if let Some(dept) = filter.department.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            query = query.filter(department.eq(dept.to_string()));
        }
        if let Some(term) = filter.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            let pattern = super::contains_pattern(term);
            query = query.filter(title.ilike(pattern.clone()).or(description.ilike(pattern)));
        }

        query.order(created_at.desc()).load::<Job>(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        job_id: uuid::Uuid,
    ) -> Result<Option<Job>, diesel::result::Error> {
        use crate::schema::jobs::dsl::*;
        jobs.filter(id.eq(job_id)).first::<Job>(conn).optional()
    }

    pub fn insert(conn: &mut PgConnection, new_job: &NewJob) -> Result<Job, diesel::result::Error> {
        diesel::insert_into(crate::schema::jobs::table)
            .values(new_job)
            .get_result(conn)
    }

    pub fn update(
        conn: &mut PgConnection,
        job_id: uuid::Uuid,
        changes: &UpdateJob,
    ) -> Result<Option<Job>, diesel::result::Error> {
        use crate::schema::jobs::dsl::*;
        diesel::update(jobs.filter(id.eq(job_id)))
            .set((changes, updated_at.eq(Utc::now())))
            .get_result(conn)
            .optional()
    }

    /// Deletes the job and, through the foreign key cascade, its
    /// applications. Returns the resume paths those applications held so the
    /// caller can unlink the files.
    pub fn delete_with_resumes(
        conn: &mut PgConnection,
        job_id: uuid::Uuid,
    ) -> Result<Option<Vec<String>>, diesel::result::Error> {
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            let resumes = {
                use crate::schema::applications::dsl as a;
                a::applications
                    .filter(a::job_id.eq(job_id))
                    .filter(a::resume_path.is_not_null())
                    .select(a::resume_path.assume_not_null())
                    .load::<String>(conn)?
            };

            use crate::schema::jobs::dsl::*;
            let deleted = diesel::delete(jobs.filter(id.eq(job_id))).execute(conn)?;
            Ok(if deleted == 0 { None } else { Some(resumes) })
        })
    }
}
