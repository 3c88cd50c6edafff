use diesel::prelude::*;
use diesel::sql_query;

use crate::db::models::payroll::{
    DepartmentPayroll, MonthlyPayroll, NewPayrollRecord, PayrollChangeset, PayrollRecord,
    PayrollSummary, PayrollTotals,
};

dataset_repo!(
    PayrollRepo,
    table = payroll_records,
    row = PayrollRecord,
    new = NewPayrollRecord,
    changes = PayrollChangeset,
    date = pay_period,
    group = department by department,
);

impl PayrollRepo {
    pub fn summary(conn: &mut PgConnection) -> Result<PayrollSummary, diesel::result::Error> {
        let monthly = sql_query(
            "SELECT to_char(date_trunc('month', pay_period), 'YYYY-MM') AS month, \
                    ROUND(SUM(base_salary + allowances)::numeric, 2)::float8 AS gross_pay, \
                    ROUND(SUM(deductions)::numeric, 2)::float8 AS deductions, \
                    ROUND(SUM(net_pay)::numeric, 2)::float8 AS net_pay, \
                    COUNT(DISTINCT employee_code)::int8 AS employees \
             FROM payroll_records GROUP BY 1 ORDER BY 1",
        )
        .load::<MonthlyPayroll>(conn)?;

        let by_department = sql_query(
            "SELECT department, \
                    ROUND(SUM(net_pay)::numeric, 2)::float8 AS total_net_pay, \
                    ROUND(AVG(net_pay)::numeric, 2)::float8 AS avg_net_pay \
             FROM payroll_records GROUP BY department ORDER BY total_net_pay DESC, department",
        )
        .load::<DepartmentPayroll>(conn)?;

        let totals = sql_query(
            "SELECT COALESCE(ROUND(SUM(base_salary + allowances)::numeric, 2), 0)::float8 AS gross_pay, \
                    COALESCE(ROUND(SUM(deductions)::numeric, 2), 0)::float8 AS deductions, \
                    COALESCE(ROUND(SUM(net_pay)::numeric, 2), 0)::float8 AS net_pay, \
                    COUNT(*)::int8 AS records \
             FROM payroll_records",
        )
        .get_result::<PayrollTotals>(conn)?;

        Ok(PayrollSummary {
            monthly,
            by_department,
            totals,
        })
    }
}
