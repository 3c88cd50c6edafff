use chrono::Utc;
use diesel::dsl::count_star;
use diesel::pg::Pg;
use diesel::prelude::*;

use crate::db::enums::ApplicationStatus;
use crate::db::models::api::{Page, PageParams};
use crate::db::models::application::{
    Application, ApplicationFilter, ApplicationStatusCount, ApplicationsSummary,
    JobApplicationCount, NewApplication,
};
use crate::schema::applications;

pub struct ApplicationRepo;

impl ApplicationRepo {
    fn filtered(filter: &ApplicationFilter) -> applications::BoxedQuery<'static, Pg> {
        use crate::schema::applications::dsl::*;
        let mut query = applications.into_boxed();
        if let Some(target_job) = filter.job_id {
            query = query.filter(job_id.eq(target_job));
        }
        if let Some(target_status) = filter.status {
            query = query.filter(status.eq(target_status));
        }
        query
    }

    pub fn list(
        conn: &mut PgConnection,
        filter: &ApplicationFilter,
        page: &PageParams,
    ) -> Result<Page<Application>, diesel::result::Error> {
        use crate::schema::applications::dsl::*;
        let total = Self::filtered(filter).count().get_result::<i64>(conn)?;
        let items = Self::filtered(filter)
            .order(created_at.desc())
            .limit(page.per_page())
            .offset(page.offset())
            .load::<Application>(conn)?;
        Ok(Page { items, total })
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        application_id: uuid::Uuid,
    ) -> Result<Option<Application>, diesel::result::Error> {
        use crate::schema::applications::dsl::*;
        applications
            .filter(id.eq(application_id))
            .first::<Application>(conn)
            .optional()
    }

    pub fn insert(
        conn: &mut PgConnection,
        new_application: &NewApplication,
    ) -> Result<Application, diesel::result::Error> {
        diesel::insert_into(crate::schema::applications::table)
            .values(new_application)
            .get_result(conn)
    }

    pub fn update_status(
        conn: &mut PgConnection,
        application_id: uuid::Uuid,
        new_status: ApplicationStatus,
    ) -> Result<Option<Application>, diesel::result::Error> {
        use crate::schema::applications::dsl::*;
        diesel::update(applications.filter(id.eq(application_id)))
            .set((status.eq(new_status), updated_at.eq(Utc::now())))
            .get_result(conn)
            .optional()
    }

    /// Returns the deleted row so its resume can be unlinked.
    pub fn delete(
        conn: &mut PgConnection,
        application_id: uuid::Uuid,
    ) -> Result<Option<Application>, diesel::result::Error> {
        use crate::schema::applications::dsl::*;
        diesel::delete(applications.filter(id.eq(application_id)))
            .get_result::<Application>(conn)
            .optional()
    }

    pub fn summary(conn: &mut PgConnection) -> Result<ApplicationsSummary, diesel::result::Error> {
        use crate::schema::{applications as a, jobs as j};

        let total = a::table.count().get_result::<i64>(conn)?;

        let counted: Vec<(ApplicationStatus, i64)> = a::table
            .group_by(a::status)
            .select((a::status, count_star()))
            .load(conn)?;
        // 所有状态都返回，没有申请的状态计为 0
        let by_status = ApplicationStatus::ALL
            .iter()
            .map(|s| ApplicationStatusCount {
                status: *s,
                count: counted
                    .iter()
                    .find(|(status, _)| status == s)
                    .map(|(_, count)| *count)
                    .unwrap_or(0),
            })
            .collect();

        let mut by_job: Vec<JobApplicationCount> = a::table
            .inner_join(j::table)
            .group_by((j::id, j::title))
            .select((j::id, j::title, count_star()))
            .load::<(uuid::Uuid, String, i64)>(conn)?
            .into_iter()
            .map(|(job_id, job_title, count)| JobApplicationCount {
                job_id,
                job_title,
                count,
            })
            .collect();
        by_job.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.job_title.cmp(&b.job_title)));

        Ok(ApplicationsSummary {
            total,
            by_status,
            by_job,
        })
    }
}
