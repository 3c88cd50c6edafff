use diesel::prelude::*;
use uuid::Uuid;

use super::{DatasetService, delegate_to_repo};
use crate::db::models::training::{
    NewTrainingProgram, TrainingProgram, TrainingSummary, UpdateTrainingProgram,
};
use crate::db::repositories::datasets::TrainingRepo;
use crate::error::{AppError, AppResult};
use crate::validation::datasets::{validate_training_completion, validate_training_schedule};

pub struct TrainingService;

impl DatasetService for TrainingService {
    const RESOURCE: &'static str = "training";
    const LABEL: &'static str = "Training program";

    type Row = TrainingProgram;
    type Input = NewTrainingProgram;
    type Changes = UpdateTrainingProgram;
    type Summary = TrainingSummary;

    fn check(input: &NewTrainingProgram) -> AppResult<()> {
        validate_training_schedule(input.start_date, input.end_date)?;
        validate_training_completion(input.participants, input.completed)
    }

    fn update(
        conn: &mut PgConnection,
        id: Uuid,
        changes: UpdateTrainingProgram,
    ) -> AppResult<Option<TrainingProgram>> {
        conn.transaction::<_, AppError, _>(|conn| {
            let Some(existing) = TrainingRepo::find_by_id(conn, id)? else {
                return Ok(None);
            };
            validate_training_schedule(
                changes.start_date.unwrap_or(existing.start_date),
                changes.end_date.unwrap_or(existing.end_date),
            )?;
            validate_training_completion(
                changes.participants.unwrap_or(existing.participants),
                changes.completed.unwrap_or(existing.completed),
            )?;
            Ok(TrainingRepo::update(conn, id, &changes)?)
        })
    }

    delegate_to_repo!(TrainingRepo);
}
