use diesel::prelude::*;
use uuid::Uuid;

use super::{DatasetService, delegate_to_repo};
use crate::db::models::leaver::{Leaver, LeaversSummary, NewLeaver, UpdateLeaver};
use crate::db::repositories::datasets::LeaverRepo;
use crate::error::AppResult;

pub struct LeaversService;

impl DatasetService for LeaversService {
    const RESOURCE: &'static str = "leavers";
    const LABEL: &'static str = "Leaver";

    type Row = Leaver;
    type Input = NewLeaver;
    type Changes = UpdateLeaver;
    type Summary = LeaversSummary;

    fn update(conn: &mut PgConnection, id: Uuid, changes: UpdateLeaver) -> AppResult<Option<Leaver>> {
        Ok(LeaverRepo::update(conn, id, &changes)?)
    }

    delegate_to_repo!(LeaverRepo);
}
