use diesel::prelude::*;
use diesel::sql_query;

use crate::db::models::hr_operation::{
    DepartmentOperations, HrOperation, HrOperationsSummary, MonthlyOperations, NewHrOperation,
    UpdateHrOperation,
};

dataset_repo!(
    HrOperationRepo,
    table = hr_operations,
    row = HrOperation,
    new = NewHrOperation,
    changes = UpdateHrOperation,
    date = period,
    group = department by department,
);

impl HrOperationRepo {
    pub fn summary(conn: &mut PgConnection) -> Result<HrOperationsSummary, diesel::result::Error> {
        let monthly = sql_query(
            "SELECT to_char(date_trunc('month', period), 'YYYY-MM') AS month, \
                    SUM(headcount)::int8 AS headcount, \
                    SUM(new_joiners)::int8 AS new_joiners, \
                    ROUND(AVG(absenteeism_rate)::numeric, 2)::float8 AS avg_absenteeism_rate \
             FROM hr_operations GROUP BY 1 ORDER BY 1",
        )
        .load::<MonthlyOperations>(conn)?;

        let by_department = sql_query(
            "SELECT department, \
                    ROUND(SUM(overtime_hours)::numeric, 1)::float8 AS overtime_hours, \
                    SUM(open_requests)::int8 AS open_requests, \
                    SUM(resolved_requests)::int8 AS resolved_requests, \
                    COALESCE(ROUND((SUM(resolved_requests) * 100.0 / NULLIF(SUM(open_requests), 0))::numeric, 1), 0)::float8 \
                        AS resolution_rate \
             FROM hr_operations GROUP BY department ORDER BY department",
        )
        .load::<DepartmentOperations>(conn)?;

        Ok(HrOperationsSummary {
            monthly,
            by_department,
        })
    }
}
