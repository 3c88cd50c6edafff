use diesel::prelude::*;
use diesel::sql_query;

use crate::db::models::engagement::{
    DepartmentEngagement, EngagementSummary, EngagementSurvey, MonthlyEngagement,
    NewEngagementSurvey, UpdateEngagementSurvey,
};

dataset_repo!(
    EngagementRepo,
    table = engagement_surveys,
    row = EngagementSurvey,
    new = NewEngagementSurvey,
    changes = UpdateEngagementSurvey,
    date = period,
    group = department by department,
);

impl EngagementRepo {
    pub fn summary(conn: &mut PgConnection) -> Result<EngagementSummary, diesel::result::Error> {
        let monthly = sql_query(
            "SELECT to_char(date_trunc('month', period), 'YYYY-MM') AS month, \
                    ROUND(AVG(score)::numeric, 1)::float8 AS avg_score, \
                    ROUND(AVG(participation_rate)::numeric, 1)::float8 AS avg_participation_rate \
             FROM engagement_surveys GROUP BY 1 ORDER BY 1",
        )
        .load::<MonthlyEngagement>(conn)?;

        let by_department = sql_query(
            "SELECT department, \
                    ROUND(AVG(score)::numeric, 1)::float8 AS avg_score, \
                    ROUND(AVG(enps)::numeric, 1)::float8 AS avg_enps, \
                    SUM(respondents)::int8 AS respondents \
             FROM engagement_surveys GROUP BY department ORDER BY avg_score DESC, department",
        )
        .load::<DepartmentEngagement>(conn)?;

        Ok(EngagementSummary {
            monthly,
            by_department,
        })
    }
}
