//! Dashboard datasets share one operation set; each dataset plugs its
//! repository and cross-field rules in through [`DatasetService`].

pub mod demographics;
pub mod engagement;
pub mod hiring;
pub mod hr_operations;
pub mod leavers;
pub mod metrics;
pub mod payroll;
pub mod training;

pub use demographics::DemographicsService;
pub use engagement::EngagementService;
pub use hiring::HiringService;
pub use hr_operations::HrOperationsService;
pub use leavers::LeaversService;
pub use metrics::MetricsService;
pub use payroll::PayrollService;
pub use training::TrainingService;

use diesel::PgConnection;
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;
use validator::Validate;

use crate::db::models::api::DatasetFilter;
use crate::error::{AppError, AppResult};

pub trait DatasetService: Send + Sync + 'static {
    /// URL segment and cache key suffix, e.g. `hr-operations`.
    const RESOURCE: &'static str;
    /// Human readable singular used in messages.
    const LABEL: &'static str;

    type Row: Serialize + Send + 'static;
    /// A complete record, from a JSON body or one spreadsheet row.
    type Input: DeserializeOwned + Validate + Send + 'static;
    type Changes: DeserializeOwned + Validate + Send + 'static;
    type Summary: Serialize + DeserializeOwned + Send + Sync + 'static;

    /// Rules spanning several fields of a complete record.
    fn check(_input: &Self::Input) -> AppResult<()> {
        Ok(())
    }

    fn list(conn: &mut PgConnection, filter: &DatasetFilter) -> AppResult<Vec<Self::Row>>;

    fn find(conn: &mut PgConnection, id: Uuid) -> AppResult<Option<Self::Row>>;

    fn insert(conn: &mut PgConnection, input: Self::Input) -> AppResult<Self::Row>;

    fn insert_batch(conn: &mut PgConnection, rows: Vec<Self::Input>) -> AppResult<usize>;

    /// Applies a partial update; `None` when the record does not exist.
    fn update(conn: &mut PgConnection, id: Uuid, changes: Self::Changes) -> AppResult<Option<Self::Row>>;

    fn remove(conn: &mut PgConnection, id: Uuid) -> AppResult<bool>;

    fn summary(conn: &mut PgConnection) -> AppResult<Self::Summary>;

    fn get(conn: &mut PgConnection, id: Uuid) -> AppResult<Self::Row> {
        Self::find(conn, id)?.ok_or_else(|| AppError::not_found(Self::LABEL))
    }

    fn create(conn: &mut PgConnection, input: Self::Input) -> AppResult<Self::Row> {
        Self::check(&input)?;
        Self::insert(conn, input)
    }

    fn modify(conn: &mut PgConnection, id: Uuid, changes: Self::Changes) -> AppResult<Self::Row> {
        Self::update(conn, id, changes)?.ok_or_else(|| AppError::not_found(Self::LABEL))
    }

    fn delete(conn: &mut PgConnection, id: Uuid) -> AppResult<()> {
        if Self::remove(conn, id)? {
            Ok(())
        } else {
            Err(AppError::not_found(Self::LABEL))
        }
    }

    /// Parses and validates every row, then inserts all of them or none.
    fn import(conn: &mut PgConnection, bytes: &[u8]) -> AppResult<usize> {
        let rows = crate::utils::ingest::parse_rows::<Self::Input, _>(bytes, Self::check)?;
        let count = rows.len();
        let inserted = Self::insert_batch(conn, rows)?;
        tracing::info!(resource = Self::RESOURCE, rows = count, "Imported spreadsheet");
        Ok(inserted)
    }
}

/// Implements the storage half of [`DatasetService`] by delegating to a
/// repository whose insert type is the service's input type.
macro_rules! delegate_to_repo {
    ($repo:ty) => {
        fn list(
            conn: &mut diesel::PgConnection,
            filter: &crate::db::models::api::DatasetFilter,
        ) -> crate::error::AppResult<Vec<Self::Row>> {
            Ok(<$repo>::list(conn, filter)?)
        }

        fn find(conn: &mut diesel::PgConnection, id: uuid::Uuid) -> crate::error::AppResult<Option<Self::Row>> {
            Ok(<$repo>::find_by_id(conn, id)?)
        }

        fn insert(conn: &mut diesel::PgConnection, input: Self::Input) -> crate::error::AppResult<Self::Row> {
            Ok(<$repo>::insert(conn, &input)?)
        }

        fn insert_batch(conn: &mut diesel::PgConnection, rows: Vec<Self::Input>) -> crate::error::AppResult<usize> {
            Ok(<$repo>::insert_batch(conn, &rows)?)
        }

        fn remove(conn: &mut diesel::PgConnection, id: uuid::Uuid) -> crate::error::AppResult<bool> {
            Ok(<$repo>::delete(conn, id)? > 0)
        }

        fn summary(conn: &mut diesel::PgConnection) -> crate::error::AppResult<Self::Summary> {
            Ok(<$repo>::summary(conn)?)
        }
    };
}
pub(crate) use delegate_to_repo;
