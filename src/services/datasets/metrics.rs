use diesel::prelude::*;
use uuid::Uuid;

use super::{DatasetService, delegate_to_repo};
use crate::db::models::metric::{Metric, MetricsSummary, NewMetric, UpdateMetric};
use crate::db::repositories::datasets::MetricRepo;
use crate::error::AppResult;

pub struct MetricsService;

impl DatasetService for MetricsService {
    const RESOURCE: &'static str = "metrics";
    const LABEL: &'static str = "Metric";

    type Row = Metric;
    type Input = NewMetric;
    type Changes = UpdateMetric;
    type Summary = MetricsSummary;

    fn update(conn: &mut PgConnection, id: Uuid, changes: UpdateMetric) -> AppResult<Option<Metric>> {
        Ok(MetricRepo::update(conn, id, &changes)?)
    }

    delegate_to_repo!(MetricRepo);
}
