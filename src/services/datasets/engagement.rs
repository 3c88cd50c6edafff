use diesel::prelude::*;
use uuid::Uuid;

use super::{DatasetService, delegate_to_repo};
use crate::db::models::engagement::{
    EngagementSummary, EngagementSurvey, NewEngagementSurvey, UpdateEngagementSurvey,
};
use crate::db::repositories::datasets::EngagementRepo;
use crate::error::AppResult;
use crate::validation::datasets::validate_enps;

pub struct EngagementService;

impl DatasetService for EngagementService {
    const RESOURCE: &'static str = "engagement";
    const LABEL: &'static str = "Engagement survey";

    type Row = EngagementSurvey;
    type Input = NewEngagementSurvey;
    type Changes = UpdateEngagementSurvey;
    type Summary = EngagementSummary;

    fn check(input: &NewEngagementSurvey) -> AppResult<()> {
        validate_enps(input.enps)
    }

    fn update(
        conn: &mut PgConnection,
        id: Uuid,
        changes: UpdateEngagementSurvey,
    ) -> AppResult<Option<EngagementSurvey>> {
        if let Some(enps) = changes.enps {
            validate_enps(enps)?;
        }
        Ok(EngagementRepo::update(conn, id, &changes)?)
    }

    delegate_to_repo!(EngagementRepo);
}
