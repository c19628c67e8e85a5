use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization::{flat_interest_paid, flat_months_to_payoff};
use crate::decimal::Money;
use crate::errors::{EngineError, Result};
use crate::loan::{Loan, LoanId};
use crate::portfolio::{highest_interest_loan, smallest_balance_loan};

/// extra-budget allocation policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// extra budget to the highest-interest loan
    Avalanche,
    /// extra budget to the smallest-balance loan
    Snowball,
    /// 60/40 split between highest-interest and smallest-balance loans
    Hybrid,
}

/// per-loan slice of a payment plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentPlanEntry {
    pub loan_id: LoanId,
    pub loan_name: String,
    /// contractual payment plus allocated extra
    pub monthly_payment: Money,
    pub extra_payment: Money,
    /// `None` means the effective payment can never retire the balance
    pub months_to_payoff: Option<u32>,
    pub interest_paid: Money,
    pub total_paid: Money,
}

/// a full repayment plan under one allocation policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentPlan {
    pub strategy: Strategy,
    pub entries: Vec<PaymentPlanEntry>,
    /// the portfolio is paid off when its slowest loan finishes; `None`
    /// if any loan never pays off
    pub total_months: Option<u32>,
    pub total_interest: Money,
}

impl PaymentPlan {
    /// allocate `extra_budget` across `loans` under `strategy` and compute
    /// the flat-approximation payoff figures for each loan
    pub fn build(loans: &[Loan], extra_budget: Money, strategy: Strategy) -> Result<Self> {
        if extra_budget.is_negative() {
            return Err(EngineError::NegativeExtraBudget {
                budget: extra_budget,
            });
        }
        if loans.is_empty() {
            return Err(EngineError::EmptyPortfolio);
        }
        for loan in loans {
            loan.validate()?;
        }

        let entries = match strategy {
            Strategy::Avalanche => {
                let mut ordered: Vec<&Loan> = loans.iter().collect();
                // stable sort keeps input order among equal rates
                ordered.sort_by(|a, b| b.interest_rate.cmp(&a.interest_rate));
                allocate_first(&ordered, extra_budget)
            }
            Strategy::Snowball => {
                let mut ordered: Vec<&Loan> = loans.iter().collect();
                ordered.sort_by(|a, b| a.balance.cmp(&b.balance));
                allocate_first(&ordered, extra_budget)
            }
            Strategy::Hybrid => allocate_hybrid(loans, extra_budget),
        };

        let total_months = entries
            .iter()
            .map(|e| e.months_to_payoff)
            .try_fold(0u32, |acc, m| m.map(|m| acc.max(m)));
        let total_interest = entries.iter().map(|e| e.interest_paid).sum();

        Ok(Self {
            strategy,
            entries,
            total_months,
            total_interest,
        })
    }
}

/// the entire extra budget goes to the first loan in priority order
fn allocate_first(ordered: &[&Loan], extra_budget: Money) -> Vec<PaymentPlanEntry> {
    ordered
        .iter()
        .enumerate()
        .map(|(i, loan)| {
            let extra = if i == 0 { extra_budget } else { Money::ZERO };
            plan_entry(loan, extra)
        })
        .collect()
}

/// 60% to the highest-interest loan, 40% to the smallest-balance loan; the
/// full budget if they are the same loan
fn allocate_hybrid(loans: &[Loan], extra_budget: Money) -> Vec<PaymentPlanEntry> {
    let highest_interest = highest_interest_loan(loans).map(|l| l.id);
    let smallest_balance = smallest_balance_loan(loans).map(|l| l.id);

    loans
        .iter()
        .map(|loan| {
            let id = Some(loan.id);
            let extra = if id == highest_interest && id == smallest_balance {
                extra_budget
            } else if id == highest_interest {
                extra_budget * dec!(0.6)
            } else if id == smallest_balance {
                extra_budget * dec!(0.4)
            } else {
                Money::ZERO
            };
            plan_entry(loan, extra)
        })
        .collect()
}

fn plan_entry(loan: &Loan, extra: Money) -> PaymentPlanEntry {
    let monthly_payment = loan.monthly_payment + extra;
    let months_to_payoff = flat_months_to_payoff(loan.balance, monthly_payment);

    let (interest_paid, total_paid) = match months_to_payoff {
        Some(months) => (
            flat_interest_paid(loan.balance, monthly_payment, months),
            monthly_payment * Decimal::from(months),
        ),
        None => (Money::ZERO, Money::ZERO),
    };

    PaymentPlanEntry {
        loan_id: loan.id,
        loan_name: loan.name.clone(),
        monthly_payment,
        extra_payment: extra,
        months_to_payoff,
        interest_paid,
        total_paid,
    }
}

/// all three plans side by side for the same budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyComparison {
    pub avalanche: PaymentPlan,
    pub snowball: PaymentPlan,
    pub hybrid: PaymentPlan,
}

impl StrategyComparison {
    pub fn run(loans: &[Loan], extra_budget: Money) -> Result<Self> {
        Ok(Self {
            avalanche: PaymentPlan::build(loans, extra_budget, Strategy::Avalanche)?,
            snowball: PaymentPlan::build(loans, extra_budget, Strategy::Snowball)?,
            hybrid: PaymentPlan::build(loans, extra_budget, Strategy::Hybrid)?,
        })
    }

    /// the policy with the lowest flat-approximation total interest
    pub fn cheapest(&self) -> &PaymentPlan {
        let mut best = &self.avalanche;
        for plan in [&self.snowball, &self.hybrid] {
            if plan.total_interest < best.total_interest {
                best = plan;
            }
        }
        best
    }
}
