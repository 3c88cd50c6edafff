use diesel::prelude::*;
use uuid::Uuid;

use super::DatasetService;
use crate::db::models::api::DatasetFilter;
use crate::db::models::payroll::{
    NewPayrollRecord, PayrollChangeset, PayrollInput, PayrollRecord, PayrollSummary,
    UpdatePayrollRecord,
};
use crate::db::repositories::datasets::PayrollRepo;
use crate::error::{AppError, AppResult};
use crate::validation::datasets::compute_net_pay;

pub struct PayrollService;

impl PayrollService {
    /// Net pay always comes from the amounts, never from the client.
    pub fn to_record(input: PayrollInput) -> AppResult<NewPayrollRecord> {
        let net_pay = compute_net_pay(input.base_salary, input.allowances, input.deductions)?;
        Ok(NewPayrollRecord {
            employee_code: input.employee_code,
            employee_name: input.employee_name,
            department: input.department,
            pay_period: input.pay_period,
            base_salary: input.base_salary,
            allowances: input.allowances,
            deductions: input.deductions,
            net_pay,
        })
    }

    /// Builds the changeset for a partial update, recomputing net pay from
    /// the merged amounts when any of them changes.
    pub fn to_changeset(
        existing: &PayrollRecord,
        changes: UpdatePayrollRecord,
    ) -> AppResult<PayrollChangeset> {
        let net_pay = if changes.touches_amounts() {
            Some(compute_net_pay(
                changes.base_salary.unwrap_or(existing.base_salary),
                changes.allowances.unwrap_or(existing.allowances),
                changes.deductions.unwrap_or(existing.deductions),
            )?)
        } else {
            None
        };

        Ok(PayrollChangeset {
            employee_code: changes.employee_code,
            employee_name: changes.employee_name,
            department: changes.department,
            pay_period: changes.pay_period,
            base_salary: changes.base_salary,
            allowances: changes.allowances,
            deductions: changes.deductions,
            net_pay,
        })
    }
}

impl DatasetService for PayrollService {
    const RESOURCE: &'static str = "payroll";
    const LABEL: &'static str = "Payroll record";

    type Row = PayrollRecord;
    type Input = PayrollInput;
    type Changes = UpdatePayrollRecord;
    type Summary = PayrollSummary;

    fn check(input: &PayrollInput) -> AppResult<()> {
        compute_net_pay(input.base_salary, input.allowances, input.deductions).map(|_| ())
    }

    fn list(conn: &mut PgConnection, filter: &DatasetFilter) -> AppResult<Vec<PayrollRecord>> {
        Ok(PayrollRepo::list(conn, filter)?)
    }

    fn find(conn: &mut PgConnection, id: Uuid) -> AppResult<Option<PayrollRecord>> {
        Ok(PayrollRepo::find_by_id(conn, id)?)
    }

    fn insert(conn: &mut PgConnection, input: PayrollInput) -> AppResult<PayrollRecord> {
        let record = Self::to_record(input)?;
        Ok(PayrollRepo::insert(conn, &record)?)
    }

    fn insert_batch(conn: &mut PgConnection, rows: Vec<PayrollInput>) -> AppResult<usize> {
        let records = rows
            .into_iter()
            .map(Self::to_record)
            .collect::<AppResult<Vec<_>>>()?;
        Ok(PayrollRepo::insert_batch(conn, &records)?)
    }

    fn update(
        conn: &mut PgConnection,
        id: Uuid,
        changes: UpdatePayrollRecord,
    ) -> AppResult<Option<PayrollRecord>> {
        conn.transaction::<_, AppError, _>(|conn| {
            let Some(existing) = PayrollRepo::find_by_id(conn, id)? else {
                return Ok(None);
            };
            let changeset = Self::to_changeset(&existing, changes)?;
            Ok(PayrollRepo::update(conn, id, &changeset)?)
        })
    }

    fn remove(conn: &mut PgConnection, id: Uuid) -> AppResult<bool> {
        Ok(PayrollRepo::delete(conn, id)? > 0)
    }

    fn summary(conn: &mut PgConnection) -> AppResult<PayrollSummary> {
        Ok(PayrollRepo::summary(conn)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn input(base: f64, allowances: f64, deductions: f64) -> PayrollInput {
        PayrollInput {
            employee_code: "E-001".to_string(),
            employee_name: "Amina Yusuf".to_string(),
            department: "Finance".to_string(),
            pay_period: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
            base_salary: base,
            allowances,
            deductions,
        }
    }

    fn existing() -> PayrollRecord {
        PayrollRecord {
            id: Uuid::new_v4(),
            employee_code: "E-001".to_string(),
            employee_name: "Amina Yusuf".to_string(),
            department: "Finance".to_string(),
            pay_period: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
            base_salary: 4000.0,
            allowances: 500.0,
            deductions: 700.0,
            net_pay: 3800.0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_net_pay_is_derived_on_create() {
        let record = PayrollService::to_record(input(4000.0, 500.0, 700.0)).unwrap();
        assert_eq!(record.net_pay, 3800.0);
        assert!(PayrollService::to_record(input(100.0, 0.0, 200.0)).is_err());
    }

    #[test]
    fn test_net_pay_recomputed_only_when_amounts_change() {
        let renamed = UpdatePayrollRecord {
            employee_name: Some("Amina Y.".to_string()),
            ..Default::default()
        };
        let changeset = PayrollService::to_changeset(&existing(), renamed).unwrap();
        assert_eq!(changeset.net_pay, None);

        let raise = UpdatePayrollRecord {
            base_salary: Some(4500.0),
            ..Default::default()
        };
        let changeset = PayrollService::to_changeset(&existing(), raise).unwrap();
        assert_eq!(changeset.net_pay, Some(4300.0));

        let too_much = UpdatePayrollRecord {
            deductions: Some(10_000.0),
            ..Default::default()
        };
        assert!(PayrollService::to_changeset(&existing(), too_much).is_err());
    }

    #[test]
    fn test_check_rejects_negative_net() {
        assert!(PayrollService::check(&input(100.0, 0.0, 50.0)).is_ok());
        assert!(PayrollService::check(&input(100.0, 0.0, 150.0)).is_err());
    }
}
