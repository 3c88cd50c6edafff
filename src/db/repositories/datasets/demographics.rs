use diesel::prelude::*;
use diesel::sql_query;

use crate::db::models::demographic::{
    Demographic, DemographicBucket, DemographicTotals, DemographicsSummary, NewDemographic,
    UpdateDemographic,
};

dataset_repo!(
    DemographicRepo,
    table = demographics,
    row = Demographic,
    new = NewDemographic,
    changes = UpdateDemographic,
    date = hire_date,
    group = department by department,
);

impl DemographicRepo {
    fn buckets(conn: &mut PgConnection, column: &str) -> Result<Vec<DemographicBucket>, diesel::result::Error> {
        // column 只来自下面的固定列表
        sql_query(format!(
            "SELECT {column} AS label, COUNT(*)::int8 AS employees \
             FROM demographics GROUP BY {column} ORDER BY employees DESC, label"
        ))
        .load::<DemographicBucket>(conn)
    }

    pub fn summary(conn: &mut PgConnection) -> Result<DemographicsSummary, diesel::result::Error> {
        let totals = sql_query(
            "SELECT COUNT(*)::int8 AS employees, \
                    COALESCE(ROUND(AVG(age)::numeric, 1), 0)::float8 AS avg_age \
             FROM demographics",
        )
        .get_result::<DemographicTotals>(conn)?;

        // Every band is reported, empty ones with zero.
        let by_age_band = sql_query(
            "SELECT bands.label, COUNT(d.id)::int8 AS employees \
             FROM (VALUES (1, '<25', 0, 24), (2, '25-34', 25, 34), (3, '35-44', 35, 44), \
                          (4, '45-54', 45, 54), (5, '55+', 55, 200)) AS bands(ord, label, lo, hi) \
             LEFT JOIN demographics d ON d.age BETWEEN bands.lo AND bands.hi \
             GROUP BY bands.ord, bands.label ORDER BY bands.ord",
        )
        .load::<DemographicBucket>(conn)?;

        Ok(DemographicsSummary {
            totals,
            by_gender: Self::buckets(conn, "gender")?,
            by_age_band,
            by_department: Self::buckets(conn, "department")?,
            by_employment_type: Self::buckets(conn, "employment_type")?,
        })
    }
}
