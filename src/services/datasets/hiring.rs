use diesel::prelude::*;
use uuid::Uuid;

use super::{DatasetService, delegate_to_repo};
use crate::db::models::hiring::{HiringRecord, HiringSummary, NewHiringRecord, UpdateHiringRecord};
use crate::db::repositories::datasets::HiringRepo;
use crate::error::{AppError, AppResult};
use crate::validation::datasets::validate_hiring_funnel;

pub struct HiringService;

impl DatasetService for HiringService {
    const RESOURCE: &'static str = "hiring";
    const LABEL: &'static str = "Hiring record";

    type Row = HiringRecord;
    type Input = NewHiringRecord;
    type Changes = UpdateHiringRecord;
    type Summary = HiringSummary;

    fn check(input: &NewHiringRecord) -> AppResult<()> {
        validate_hiring_funnel(input.offers_made, input.hires)
    }

    fn update(
        conn: &mut PgConnection,
        id: Uuid,
        changes: UpdateHiringRecord,
    ) -> AppResult<Option<HiringRecord>> {
        conn.transaction::<_, AppError, _>(|conn| {
            let Some(existing) = HiringRepo::find_by_id(conn, id)? else {
                return Ok(None);
            };
            validate_hiring_funnel(
                changes.offers_made.unwrap_or(existing.offers_made),
                changes.hires.unwrap_or(existing.hires),
            )?;
            Ok(HiringRepo::update(conn, id, &changes)?)
        })
    }

    delegate_to_repo!(HiringRepo);
}
