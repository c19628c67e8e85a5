use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::loan::Loan;

/// dashboard-level aggregates over a loan collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub total_debt: Money,
    pub total_monthly_payment: Money,
    pub active_loans: usize,
    /// simple mean of the annual rates, not balance-weighted
    pub average_rate: Rate,
    pub debt_by_kind: BTreeMap<String, Money>,
}

/// summarize the portfolio; all figures are zero/empty for no loans
pub fn summarize(loans: &[Loan]) -> PortfolioSummary {
    let total_debt = loans.iter().map(|l| l.balance).sum();
    let total_monthly_payment = loans.iter().map(|l| l.monthly_payment).sum();
    let active_loans = loans.iter().filter(|l| l.is_active).count();

    let average_rate = if loans.is_empty() {
        Rate::ZERO
    } else {
        let sum: Decimal = loans.iter().map(|l| l.interest_rate.as_percent()).sum();
        Rate::from_percent(sum / Decimal::from(loans.len()))
    };

    let mut debt_by_kind = BTreeMap::new();
    for loan in loans {
        *debt_by_kind
            .entry(loan.kind.as_str().to_string())
            .or_insert(Money::ZERO) += loan.balance;
    }

    PortfolioSummary {
        total_debt,
        total_monthly_payment,
        active_loans,
        average_rate,
        debt_by_kind,
    }
}

/// first loan with the strictly highest rate
pub fn highest_interest_loan(loans: &[Loan]) -> Option<&Loan> {
    loans
        .iter()
        .reduce(|best, l| if l.interest_rate > best.interest_rate { l } else { best })
}

/// first loan with the strictly smallest balance
pub fn smallest_balance_loan(loans: &[Loan]) -> Option<&Loan> {
    loans
        .iter()
        .reduce(|best, l| if l.balance < best.balance { l } else { best })
}
