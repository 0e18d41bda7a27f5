//! Pure finance summary computations.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::contract::{Contract, ContractStatus};
use crate::domain::foundation::{Money, ProjectId};
use crate::domain::project::Project;
use crate::domain::transaction::{Transaction, TransactionKind};

/// Financial picture of a single project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectFinanceSummary {
    pub project_id: ProjectId,
    /// Sum of income transactions tied to the project.
    pub income: Money,
    /// Sum of expense transactions tied to the project.
    pub expense: Money,
    /// `income - expense`.
    pub profit: Money,
    /// Sum of active and completed contract values.
    pub contracted_total: Money,
    /// Sum of all installment amounts across the project's contracts.
    pub installments_total: Money,
    /// Sum of the paid installment amounts.
    pub installments_paid: Money,
    /// `installments_paid / installments_total`, in [0, 1]; 0 when nothing
    /// is scheduled.
    pub payment_progress: f64,
    /// `income / worked_hours`, rounded to whole cents. `None` when no hours
    /// have been logged.
    pub effective_hourly_rate: Option<Money>,
}

/// Computes the financial summary for one project.
///
/// `transactions` and `contracts` may contain rows for other projects; only
/// those referencing `project.id()` are counted, so callers can pass
/// pre-filtered or raw result sets alike.
pub fn project_summary(
    project: &Project,
    transactions: &[Transaction],
    contracts: &[Contract],
) -> ProjectFinanceSummary {
    let project_id = *project.id();

    let mut income = Money::ZERO;
    let mut expense = Money::ZERO;
    for tx in transactions
        .iter()
        .filter(|tx| tx.project_id() == Some(&project_id))
    {
        match tx.kind() {
            TransactionKind::Income => income += tx.amount(),
            TransactionKind::Expense => expense += tx.amount(),
        }
    }

    let mut contracted_total = Money::ZERO;
    let mut installments_total = Money::ZERO;
    let mut installments_paid = Money::ZERO;
    for contract in contracts
        .iter()
        .filter(|c| c.project_id() == Some(&project_id))
    {
        if matches!(
            contract.status(),
            ContractStatus::Active | ContractStatus::Completed
        ) {
            contracted_total += contract.value();
        }
        installments_total += contract.installments_total();
        installments_paid += contract.installments_paid();
    }

    let effective_hourly_rate = if project.worked_hours() > 0.0 {
        let rate = income.cents() as f64 / project.worked_hours();
        Some(Money::from_cents(rate.round() as i64))
    } else {
        None
    };

    ProjectFinanceSummary {
        project_id,
        income,
        expense,
        profit: income - expense,
        contracted_total,
        installments_total,
        installments_paid,
        payment_progress: installments_paid.ratio_of(installments_total),
        effective_hourly_rate,
    }
}

/// Income/expense totals for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyTotals {
    /// `YYYY-MM` bucket key.
    pub month: String,
    pub income: Money,
    pub expense: Money,
    pub balance: Money,
}

/// Ledger-wide totals with a per-month breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerSummary {
    pub income: Money,
    pub expense: Money,
    pub balance: Money,
    /// Months in ascending order; only months with activity appear.
    pub months: Vec<MonthlyTotals>,
}

/// Folds the ledger into overall and per-month totals.
pub fn ledger_summary(transactions: &[Transaction]) -> LedgerSummary {
    let mut income = Money::ZERO;
    let mut expense = Money::ZERO;
    let mut buckets: BTreeMap<String, (Money, Money)> = BTreeMap::new();

    for tx in transactions {
        let bucket = buckets.entry(tx.occurred_at().month_key()).or_default();
        match tx.kind() {
            TransactionKind::Income => {
                income += tx.amount();
                bucket.0 += tx.amount();
            }
            TransactionKind::Expense => {
                expense += tx.amount();
                bucket.1 += tx.amount();
            }
        }
    }

    LedgerSummary {
        income,
        expense,
        balance: income - expense,
        months: buckets
            .into_iter()
            .map(|(month, (income, expense))| MonthlyTotals {
                month,
                income,
                expense,
                balance: income - expense,
            })
            .collect(),
    }
}
