use diesel::prelude::*;
use uuid::Uuid;

use super::{DatasetService, delegate_to_repo};
use crate::db::models::demographic::{
    Demographic, DemographicsSummary, NewDemographic, UpdateDemographic,
};
use crate::db::repositories::datasets::DemographicRepo;
use crate::error::AppResult;

pub struct DemographicsService;

impl DatasetService for DemographicsService {
    const RESOURCE: &'static str = "demographics";
    const LABEL: &'static str = "Demographic record";

    type Row = Demographic;
    type Input = NewDemographic;
    type Changes = UpdateDemographic;
    type Summary = DemographicsSummary;

    fn update(
        conn: &mut PgConnection,
        id: Uuid,
        changes: UpdateDemographic,
    ) -> AppResult<Option<Demographic>> {
        Ok(DemographicRepo::update(conn, id, &changes)?)
    }

    delegate_to_repo!(DemographicRepo);
}
