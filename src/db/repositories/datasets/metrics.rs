use diesel::prelude::*;
use diesel::sql_query;

use crate::db::models::metric::{LatestMetric, Metric, MetricsSummary, NewMetric, UpdateMetric};

dataset_repo!(
    MetricRepo,
    table = hr_metrics,
    row = Metric,
    new = NewMetric,
    changes = UpdateMetric,
    date = period,
    group = category by category,
);

impl MetricRepo {
    pub fn summary(conn: &mut PgConnection) -> Result<MetricsSummary, diesel::result::Error> {
        let latest = sql_query(
            "SELECT name, category, value, target, unit, period, attainment FROM ( \
                 SELECT DISTINCT ON (name) name, category, value, target, unit, period, \
                        CASE WHEN target IS NULL OR target = 0 THEN NULL \
                             ELSE ROUND((value * 100.0 / target)::numeric, 1)::float8 END AS attainment \
                 FROM hr_metrics ORDER BY name, period DESC, created_at DESC \
             ) latest ORDER BY category, name",
        )
        .load::<LatestMetric>(conn)?;

        Ok(MetricsSummary { latest })
    }
}
