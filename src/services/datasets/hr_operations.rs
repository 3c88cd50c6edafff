use diesel::prelude::*;
use uuid::Uuid;

use super::{DatasetService, delegate_to_repo};
use crate::db::models::hr_operation::{
    HrOperation, HrOperationsSummary, NewHrOperation, UpdateHrOperation,
};
use crate::db::repositories::datasets::HrOperationRepo;
use crate::error::{AppError, AppResult};
use crate::validation::datasets::validate_request_counts;

pub struct HrOperationsService;

impl DatasetService for HrOperationsService {
    const RESOURCE: &'static str = "hr-operations";
    const LABEL: &'static str = "HR operations record";

    type Row = HrOperation;
    type Input = NewHrOperation;
    type Changes = UpdateHrOperation;
    type Summary = HrOperationsSummary;

    fn check(input: &NewHrOperation) -> AppResult<()> {
        validate_request_counts(input.open_requests, input.resolved_requests)
    }

    fn update(
        conn: &mut PgConnection,
        id: Uuid,
        changes: UpdateHrOperation,
    ) -> AppResult<Option<HrOperation>> {
        conn.transaction::<_, AppError, _>(|conn| {
            let Some(existing) = HrOperationRepo::find_by_id(conn, id)? else {
                return Ok(None);
            };
            validate_request_counts(
                changes.open_requests.unwrap_or(existing.open_requests),
                changes.resolved_requests.unwrap_or(existing.resolved_requests),
            )?;
            Ok(HrOperationRepo::update(conn, id, &changes)?)
        })
    }

    delegate_to_repo!(HrOperationRepo);
}
