use diesel::prelude::*;
use diesel::sql_query;

use crate::db::models::hiring::{
    DepartmentHiring, HiringRecord, HiringSummary, HiringTotals, MonthlyHiring, NewHiringRecord,
    UpdateHiringRecord,
};

dataset_repo!(
    HiringRepo,
    table = hiring_records,
    row = HiringRecord,
    new = NewHiringRecord,
    changes = UpdateHiringRecord,
    date = month,
    group = department by department,
);

impl HiringRepo {
    pub fn summary(conn: &mut PgConnection) -> Result<HiringSummary, diesel::result::Error> {
        let monthly = sql_query(
            "SELECT to_char(date_trunc('month', month), 'YYYY-MM') AS month, \
                    SUM(positions_open)::int8 AS positions_open, \
                    SUM(offers_made)::int8 AS offers_made, \
                    SUM(hires)::int8 AS hires \
             FROM hiring_records GROUP BY 1 ORDER BY 1",
        )
        .load::<MonthlyHiring>(conn)?;

        let by_department = sql_query(
            "SELECT department, \
                    SUM(hires)::int8 AS hires, \
                    ROUND(AVG(time_to_hire_days)::numeric, 1)::float8 AS avg_time_to_hire_days \
             FROM hiring_records GROUP BY department ORDER BY hires DESC, department",
        )
        .load::<DepartmentHiring>(conn)?;

        let totals = sql_query(
            "SELECT COALESCE(SUM(positions_open), 0)::int8 AS positions_open, \
                    COALESCE(SUM(applications_received), 0)::int8 AS applications_received, \
                    COALESCE(SUM(offers_made), 0)::int8 AS offers_made, \
                    COALESCE(SUM(hires), 0)::int8 AS hires, \
                    COALESCE(ROUND(AVG(time_to_hire_days)::numeric, 1), 0)::float8 AS avg_time_to_hire_days, \
                    COALESCE(ROUND(AVG(cost_per_hire)::numeric, 2), 0)::float8 AS avg_cost_per_hire, \
                    COALESCE(ROUND((SUM(hires) * 100.0 / NULLIF(SUM(offers_made), 0))::numeric, 1), 0)::float8 \
                        AS offer_acceptance_rate \
             FROM hiring_records",
        )
        .get_result::<HiringTotals>(conn)?;

        Ok(HiringSummary {
            monthly,
            by_department,
            totals,
        })
    }
}
