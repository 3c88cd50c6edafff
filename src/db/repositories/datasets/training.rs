use diesel::prelude::*;
use diesel::sql_query;

use crate::db::models::training::{
    DepartmentTraining, MonthlyTraining, NewTrainingProgram, TrainingByStatus, TrainingProgram,
    TrainingSummary, UpdateTrainingProgram,
};

dataset_repo!(
    TrainingRepo,
    table = training_programs,
    row = TrainingProgram,
    new = NewTrainingProgram,
    changes = UpdateTrainingProgram,
    date = start_date,
    group = department by department,
);

impl TrainingRepo {
    pub fn summary(conn: &mut PgConnection) -> Result<TrainingSummary, diesel::result::Error> {
        let by_department = sql_query(
            "SELECT department, \
                    COUNT(*)::int8 AS programs, \
                    SUM(participants)::int8 AS participants, \
                    COALESCE(ROUND((SUM(completed) * 100.0 / NULLIF(SUM(participants), 0))::numeric, 1), 0)::float8 \
                        AS completion_rate, \
                    ROUND(SUM(cost)::numeric, 2)::float8 AS total_cost \
             FROM training_programs GROUP BY department ORDER BY department",
        )
        .load::<DepartmentTraining>(conn)?;

        let by_status = sql_query(
            "SELECT status, COUNT(*)::int8 AS programs \
             FROM training_programs GROUP BY status ORDER BY programs DESC, status",
        )
        .load::<TrainingByStatus>(conn)?;

        let monthly = sql_query(
            "SELECT to_char(date_trunc('month', start_date), 'YYYY-MM') AS month, \
                    COUNT(*)::int8 AS programs, \
                    SUM(participants)::int8 AS participants \
             FROM training_programs GROUP BY 1 ORDER BY 1",
        )
        .load::<MonthlyTraining>(conn)?;

        Ok(TrainingSummary {
            by_department,
            by_status,
            monthly,
        })
    }
}
