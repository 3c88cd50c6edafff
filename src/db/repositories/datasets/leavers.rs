use diesel::prelude::*;
use diesel::sql_query;

use crate::db::models::leaver::{
    DepartmentLeavers, Leaver, LeaversByReason, LeaversSummary, MonthlyLeavers, NewLeaver,
    UpdateLeaver,
};

dataset_repo!(
    LeaverRepo,
    table = leavers,
    row = Leaver,
    new = NewLeaver,
    changes = UpdateLeaver,
    date = leave_date,
    group = department by department,
);

impl LeaverRepo {
    pub fn summary(conn: &mut PgConnection) -> Result<LeaversSummary, diesel::result::Error> {
        let total = crate::schema::leavers::table
            .count()
            .get_result::<i64>(conn)?;

        let monthly = sql_query(
            "SELECT to_char(date_trunc('month', leave_date), 'YYYY-MM') AS month, \
                    COUNT(*)::int8 AS leavers \
             FROM leavers GROUP BY 1 ORDER BY 1",
        )
        .load::<MonthlyLeavers>(conn)?;

        let by_reason = sql_query(
            "SELECT reason, COUNT(*)::int8 AS leavers \
             FROM leavers GROUP BY reason ORDER BY leavers DESC, reason",
        )
        .load::<LeaversByReason>(conn)?;

        let by_department = sql_query(
            "SELECT department, COUNT(*)::int8 AS leavers, \
                    ROUND(AVG(tenure_months)::numeric, 1)::float8 AS avg_tenure_months \
             FROM leavers GROUP BY department ORDER BY leavers DESC, department",
        )
        .load::<DepartmentLeavers>(conn)?;

        Ok(LeaversSummary {
            total,
            monthly,
            by_reason,
            by_department,
        })
    }
}
