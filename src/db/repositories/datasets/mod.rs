//! Repositories for the dashboard datasets. The CRUD surface is identical for
//! every dataset, so it is generated; each module adds its own summary SQL.

/// Generates list/find/insert/insert_batch/update/delete for a dataset table.
/// `date` is the column `from`/`to` filter on and rows order by; `group` is the
/// text column matched by the `filter.$field` value.
macro_rules! dataset_repo {
    (
        $repo:ident,
        table = $table:ident,
        row = $row:ty,
        new = $new:ty,
        changes = $changes:ty,
        date = $date:ident,
        group = $group:ident by $field:ident $(,)?
    ) => {
        pub struct $repo;

        impl $repo {
            pub fn list(
                conn: &mut diesel::PgConnection,
                filter: &crate::db::models::api::DatasetFilter,
            ) -> Result<Vec<$row>, diesel::result::Error> {
                use crate::schema::$table::dsl::*;
                let mut query = $table.into_boxed();

                if let Some(wanted) = filter.$field.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                    query = query.filter($group.eq(wanted.to_string()));
                }
                if let Some(from_date) = filter.from {
                    query = query.filter($date.ge(from_date));
                }
                if let Some(to_date) = filter.to {
                    query = query.filter($date.le(to_date));
                }

                query.order(($date.asc(), $group.asc())).load::<$row>(conn)
            }

            pub fn find_by_id(
                conn: &mut diesel::PgConnection,
                record_id: uuid::Uuid,
            ) -> Result<Option<$row>, diesel::result::Error> {
                use crate::schema::$table::dsl::*;
                $table.filter(id.eq(record_id)).first::<$row>(conn).optional()
            }

            pub fn insert(
                conn: &mut diesel::PgConnection,
                record: &$new,
            ) -> Result<$row, diesel::result::Error> {
                diesel::insert_into(crate::schema::$table::table)
                    .values(record)
                    .get_result(conn)
            }

            /// Inserts every row or none of them.
            pub fn insert_batch(
                conn: &mut diesel::PgConnection,
                records: &[$new],
            ) -> Result<usize, diesel::result::Error> {
                conn.transaction::<_, diesel::result::Error, _>(|conn| {
                    let mut inserted = 0;
                    for chunk in records.chunks(crate::db::repositories::INSERT_CHUNK_SIZE) {
                        inserted += diesel::insert_into(crate::schema::$table::table)
                            .values(chunk)
                            .execute(conn)?;
                    }
                    Ok(inserted)
                })
            }

            pub fn update(
                conn: &mut diesel::PgConnection,
                record_id: uuid::Uuid,
                changes: &$changes,
            ) -> Result<Option<$row>, diesel::result::Error> {
                use crate::schema::$table::dsl::*;
                diesel::update($table.filter(id.eq(record_id)))
                    .set((changes, updated_at.eq(chrono::Utc::now())))
                    .get_result(conn)
                    .optional()
            }

            pub fn delete(
                conn: &mut diesel::PgConnection,
                record_id: uuid::Uuid,
            ) -> Result<usize, diesel::result::Error> {
                use crate::schema::$table::dsl::*;
                diesel::delete($table.filter(id.eq(record_id))).execute(conn)
            }
        }
    };
}

pub mod demographics;
pub mod engagement;
pub mod hiring;
pub mod hr_operations;
pub mod leavers;
pub mod metrics;
pub mod payroll;
pub mod training;

pub use demographics::DemographicRepo;
pub use engagement::EngagementRepo;
pub use hiring::HiringRepo;
pub use hr_operations::HrOperationRepo;
pub use leavers::LeaverRepo;
pub use metrics::MetricRepo;
pub use payroll::PayrollRepo;
pub use training::TrainingRepo;
