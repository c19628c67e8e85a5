use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization::{flat_months_to_payoff, monthly_payment};
use crate::decimal::{Money, Rate};
use crate::errors::{EngineError, Result};
use crate::loan::{Loan, LoanId};

/// extra-payment sweep points, in whole currency units per month
pub const EXTRA_PAYMENT_SWEEP: [i64; 3] = [200, 500, 1000];
/// refinance sweep points, in percentage-point reductions
pub const RATE_REDUCTION_SWEEP: [Decimal; 3] = [dec!(0.5), dec!(1.0), dec!(2.0)];

const RATE_FLOOR: Decimal = dec!(0.1);

/// flat-approximation cost of a loan left on its contractual payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanBaseline {
    pub loan_id: LoanId,
    pub loan_name: String,
    pub horizon_months: u32,
    pub total_interest: Money,
    pub total_paid: Money,
}

impl LoanBaseline {
    fn for_loan(loan: &Loan) -> Self {
        let horizon = loan.horizon_months();
        let total_paid = loan.monthly_payment * Decimal::from(horizon);
        Self {
            loan_id: loan.id,
            loan_name: loan.name.clone(),
            horizon_months: horizon,
            total_interest: total_paid - loan.balance,
            total_paid,
        }
    }
}

/// one loan under an extra-payment sweep point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraPaymentLoanOutcome {
    pub loan_id: LoanId,
    pub loan_name: String,
    /// this loan's even share of the sweep amount
    pub extra_payment: Money,
    pub new_monthly_payment: Money,
    pub new_term: u32,
    pub new_interest: Money,
    pub interest_saved: Money,
    /// months cut off the baseline horizon; negative if the new term is longer
    pub time_saved: i64,
}

/// portfolio outcome at one extra-payment sweep point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraPaymentSweepPoint {
    pub extra_amount: Money,
    pub loans: Vec<ExtraPaymentLoanOutcome>,
    pub total_interest_saved: Money,
    /// max across loans, not a sum; the slowest loan gates the timeline
    pub total_time_saved: i64,
}

/// one loan under a refinance sweep point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefinanceLoanOutcome {
    pub loan_id: LoanId,
    pub loan_name: String,
    pub new_rate: Rate,
    pub new_monthly_payment: Money,
    pub new_interest: Money,
    pub interest_saved: Money,
    pub monthly_saved: Money,
}

/// portfolio outcome at one rate-reduction sweep point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefinanceSweepPoint {
    pub rate_reduction: Decimal,
    pub loans: Vec<RefinanceLoanOutcome>,
    pub total_interest_saved: Money,
    pub total_monthly_saved: Money,
}

/// fixed parameter sweeps over the whole portfolio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsAnalysis {
    pub baseline: Vec<LoanBaseline>,
    pub extra_payment: Vec<ExtraPaymentSweepPoint>,
    pub refinance: Vec<RefinanceSweepPoint>,
}

impl SavingsAnalysis {
    /// run both sweeps against the portfolio
    pub fn run(loans: &[Loan]) -> Result<Self> {
        if loans.is_empty() {
            return Err(EngineError::EmptyPortfolio);
        }
        for loan in loans {
            loan.validate()?;
        }

        let baseline: Vec<LoanBaseline> = loans.iter().map(LoanBaseline::for_loan).collect();
        let loan_count = Decimal::from(loans.len());

        let extra_payment = EXTRA_PAYMENT_SWEEP
            .iter()
            .map(|&amount| {
                extra_payment_point(loans, &baseline, Money::from_major(amount), loan_count)
            })
            .collect::<Result<Vec<_>>>()?;

        let refinance = RATE_REDUCTION_SWEEP
            .iter()
            .map(|&reduction| refinance_point(loans, &baseline, reduction))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            baseline,
            extra_payment,
            refinance,
        })
    }

    /// sweep point with the most interest saved; first occurrence wins ties
    pub fn best_extra_payment(&self) -> Option<&ExtraPaymentSweepPoint> {
        first_max_by(&self.extra_payment, |p| p.total_interest_saved)
    }

    /// rate reduction with the most interest saved; first occurrence wins ties
    pub fn best_refinance(&self) -> Option<&RefinanceSweepPoint> {
        first_max_by(&self.refinance, |p| p.total_interest_saved)
    }
}

fn first_max_by<T, K: PartialOrd>(items: &[T], key: impl Fn(&T) -> K) -> Option<&T> {
    items
        .iter()
        .reduce(|best, item| if key(item) > key(best) { item } else { best })
}

fn extra_payment_point(
    loans: &[Loan],
    baseline: &[LoanBaseline],
    extra_amount: Money,
    loan_count: Decimal,
) -> Result<ExtraPaymentSweepPoint> {
    let share = extra_amount / loan_count;

    let outcomes = loans
        .iter()
        .zip(baseline)
        .map(|(loan, base)| {
            let new_payment = loan.monthly_payment + share;
            let new_term = flat_months_to_payoff(loan.balance, new_payment)
                .ok_or_else(|| EngineError::CalculationError {
                    message: format!("non-positive payment for {}", loan.name),
                })?;
            let new_total_paid = new_payment * Decimal::from(new_term);
            let new_interest = new_total_paid - loan.balance;

            Ok(ExtraPaymentLoanOutcome {
                loan_id: loan.id,
                loan_name: loan.name.clone(),
                extra_payment: share,
                new_monthly_payment: new_payment,
                new_term,
                new_interest,
                interest_saved: base.total_interest - new_interest,
                time_saved: base.horizon_months as i64 - new_term as i64,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let total_interest_saved = outcomes.iter().map(|o| o.interest_saved).sum();
    let total_time_saved = outcomes.iter().map(|o| o.time_saved).max().unwrap_or(0);

    Ok(ExtraPaymentSweepPoint {
        extra_amount,
        loans: outcomes,
        total_interest_saved,
        total_time_saved,
    })
}

fn refinance_point(
    loans: &[Loan],
    baseline: &[LoanBaseline],
    rate_reduction: Decimal,
) -> Result<RefinanceSweepPoint> {
    let outcomes = loans
        .iter()
        .zip(baseline)
        .map(|(loan, base)| {
            let new_rate = loan.interest_rate.reduced(rate_reduction, RATE_FLOOR);
            let horizon = loan.horizon_months();
            let new_payment = monthly_payment(loan.balance, new_rate, horizon)?;
            let new_total_paid = new_payment * Decimal::from(horizon);
            let new_interest = new_total_paid - loan.balance;

            Ok(RefinanceLoanOutcome {
                loan_id: loan.id,
                loan_name: loan.name.clone(),
                new_rate,
                new_monthly_payment: new_payment,
                new_interest,
                interest_saved: base.total_interest - new_interest,
                monthly_saved: loan.monthly_payment - new_payment,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let total_interest_saved = outcomes.iter().map(|o| o.interest_saved).sum();
    let total_monthly_saved = outcomes.iter().map(|o| o.monthly_saved).sum();

    Ok(RefinanceSweepPoint {
        rate_reduction,
        loans: outcomes,
        total_interest_saved,
        total_monthly_saved,
    })
}
