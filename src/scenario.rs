use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization::{flat_months_to_payoff, monthly_payment};
use crate::decimal::{Money, Rate};
use crate::errors::{EngineError, Result};
use crate::loan::{Loan, LoanId};

/// fixed rate shock applied by the stress scenario, in percentage points
const STRESS_RATE_SHOCK: Decimal = dec!(2);
/// payment factor modeling a 10% income loss under stress
const STRESS_INCOME_FACTOR: Decimal = dec!(0.9);
/// rates never drop below this floor, in percentage points
const RATE_FLOOR: Decimal = dec!(0.1);

/// named what-if transforms over a loan portfolio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    /// the portfolio as-is; baseline for every comparison
    Current,
    RateIncrease,
    RateDecrease,
    ExtraPayments,
    Refinance,
    EconomicStress,
}

impl ScenarioKind {
    pub const ALL: [ScenarioKind; 6] = [
        ScenarioKind::Current,
        ScenarioKind::RateIncrease,
        ScenarioKind::RateDecrease,
        ScenarioKind::ExtraPayments,
        ScenarioKind::Refinance,
        ScenarioKind::EconomicStress,
    ];
}

/// caller-supplied simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioParams {
    /// percentage points added under RateIncrease
    pub rate_increase_delta: Decimal,
    /// percentage points removed under RateDecrease
    pub rate_decrease_delta: Decimal,
    /// monthly budget split evenly across loans under ExtraPayments
    pub extra_budget: Money,
    /// target rate under Refinance; each loan's rate minus one point
    /// (floored) when unset
    pub refinance_rate: Option<Rate>,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            rate_increase_delta: dec!(2),
            rate_decrease_delta: dec!(1),
            extra_budget: Money::from_major(500),
            refinance_rate: None,
        }
    }
}

/// one loan evaluated under a scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanScenarioEntry {
    pub loan_id: LoanId,
    pub loan_name: String,
    pub new_rate: Rate,
    /// recomputed base payment under the scenario rate
    pub new_payment: Money,
    pub extra_payment: Money,
    /// base payment plus extra; what is actually paid each month
    pub total_payment: Money,
    /// `None` means the payment can never retire the balance
    pub months_to_payoff: Option<u32>,
    pub total_paid: Money,
    pub total_interest: Money,
    /// contractual payment minus the recomputed one
    pub monthly_savings: Money,
    /// flat-baseline interest minus scenario interest; negative for
    /// adverse scenarios
    pub interest_savings: Money,
}

/// aggregate view over every loan in a scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub total_interest: Money,
    pub total_monthly_payment: Money,
    /// slowest loan gates the portfolio payoff; `None` if any loan never
    /// pays off
    pub max_payoff_months: Option<u32>,
    pub total_interest_savings: Money,
}

/// a scenario evaluated over the whole portfolio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub kind: ScenarioKind,
    pub loans: Vec<LoanScenarioEntry>,
    pub summary: ScenarioSummary,
}

impl ScenarioOutcome {
    /// evaluate one scenario over the portfolio
    pub fn evaluate(loans: &[Loan], kind: ScenarioKind, params: &ScenarioParams) -> Result<Self> {
        if loans.is_empty() {
            return Err(EngineError::EmptyPortfolio);
        }
        if params.extra_budget.is_negative() {
            return Err(EngineError::NegativeExtraBudget {
                budget: params.extra_budget,
            });
        }
        for loan in loans {
            loan.validate()?;
        }

        let loan_count = Decimal::from(loans.len());
        let entries = loans
            .iter()
            .map(|loan| evaluate_loan(loan, kind, params, loan_count))
            .collect::<Result<Vec<_>>>()?;

        let total_interest = entries.iter().map(|e| e.total_interest).sum();
        let total_monthly_payment = entries.iter().map(|e| e.total_payment).sum();
        let max_payoff_months = entries
            .iter()
            .map(|e| e.months_to_payoff)
            .try_fold(0u32, |acc, m| m.map(|m| acc.max(m)));
        let total_interest_savings = entries.iter().map(|e| e.interest_savings).sum();

        Ok(Self {
            kind,
            loans: entries,
            summary: ScenarioSummary {
                total_interest,
                total_monthly_payment,
                max_payoff_months,
                total_interest_savings,
            },
        })
    }

    /// evaluate every scenario kind for the comparison view
    pub fn evaluate_all(loans: &[Loan], params: &ScenarioParams) -> Result<Vec<Self>> {
        ScenarioKind::ALL
            .iter()
            .map(|kind| Self::evaluate(loans, *kind, params))
            .collect()
    }
}

fn evaluate_loan(
    loan: &Loan,
    kind: ScenarioKind,
    params: &ScenarioParams,
    loan_count: Decimal,
) -> Result<LoanScenarioEntry> {
    let mut new_rate = loan.interest_rate;
    let mut extra_payment = Money::ZERO;
    let mut payment_factor = Decimal::ONE;

    match kind {
        ScenarioKind::Current => {}
        ScenarioKind::RateIncrease => {
            new_rate = loan.interest_rate.shifted(params.rate_increase_delta);
        }
        ScenarioKind::RateDecrease => {
            new_rate = loan
                .interest_rate
                .reduced(params.rate_decrease_delta, RATE_FLOOR);
        }
        ScenarioKind::ExtraPayments => {
            extra_payment = params.extra_budget / loan_count;
        }
        ScenarioKind::Refinance => {
            new_rate = params
                .refinance_rate
                .unwrap_or_else(|| loan.interest_rate.reduced(dec!(1), RATE_FLOOR));
        }
        ScenarioKind::EconomicStress => {
            new_rate = loan.interest_rate.shifted(STRESS_RATE_SHOCK);
            payment_factor = STRESS_INCOME_FACTOR;
        }
    }

    let horizon = loan.horizon_months();
    let new_payment = if kind == ScenarioKind::Current {
        loan.monthly_payment
    } else {
        monthly_payment(loan.balance, new_rate, horizon)? * payment_factor
    };

    let total_payment = new_payment + extra_payment;
    let months_to_payoff = flat_months_to_payoff(loan.balance, total_payment);

    let (total_paid, total_interest) = match months_to_payoff {
        Some(months) => {
            let paid = total_payment * Decimal::from(months);
            (paid, paid - loan.balance)
        }
        None => (Money::ZERO, Money::ZERO),
    };

    // flat baseline: contractual payment over the horizon
    let baseline_interest =
        loan.monthly_payment * Decimal::from(horizon) - loan.balance;

    Ok(LoanScenarioEntry {
        loan_id: loan.id,
        loan_name: loan.name.clone(),
        new_rate,
        new_payment,
        extra_payment,
        total_payment,
        months_to_payoff,
        total_paid,
        total_interest,
        monthly_savings: loan.monthly_payment - new_payment,
        interest_savings: baseline_interest - total_interest,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loan::{fixtures, LoanBuilder, LoanKind};
    use chrono::NaiveDate;

    fn credit_card() -> Loan {
        LoanBuilder::new()
            .name("Credit Card")
            .kind(LoanKind::CreditCard)
            .balance(Money::from_major(8_500))
            .rate(Rate::from_percent(dec!(18.99)))
            .monthly_payment(Money::from_major(255))
            .credit_limit(Money::from_major(15_000))
            .due_date(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_current_keeps_contractual_payment() {
        let loans = fixtures::sample_loans();
        let outcome =
            ScenarioOutcome::evaluate(&loans, ScenarioKind::Current, &ScenarioParams::default())
                .unwrap();

        for (entry, loan) in outcome.loans.iter().zip(&loans) {
            assert_eq!(entry.new_rate, loan.interest_rate);
            assert_eq!(entry.new_payment, loan.monthly_payment);
            assert_eq!(entry.extra_payment, Money::ZERO);
            assert!(entry.monthly_savings.is_zero());
        }
    }

    #[test]
    fn test_rate_increase_costs_more_than_current() {
        let loans = fixtures::sample_loans();
        let params = ScenarioParams::default();
        let current =
            ScenarioOutcome::evaluate(&loans, ScenarioKind::Current, &params).unwrap();
        let increased =
            ScenarioOutcome::evaluate(&loans, ScenarioKind::RateIncrease, &params).unwrap();

        assert!(
            increased.summary.total_interest >= current.summary.total_interest
        );

        // per-loan monotonicity holds for loans amortizing on a known
        // remaining term; the revolving card pays a contractual amount far
        // above its 360-month annuity, which the flat approximation does not
        // order against a re-amortized payment
        for ((up, base), loan) in increased.loans.iter().zip(&current.loans).zip(&loans) {
            assert!(up.new_rate > base.new_rate);
            if loan.remaining_term.is_some() {
                assert!(up.total_interest >= base.total_interest);
            }
        }
    }

    #[test]
    fn test_rate_decrease_floors_at_point_one() {
        let cheap = LoanBuilder::new()
            .name("cheap")
            .kind(LoanKind::Personal)
            .balance(Money::from_major(1_000))
            .rate(Rate::from_percent(dec!(0.5)))
            .monthly_payment(Money::from_major(100))
            .due_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
            .build()
            .unwrap();

        let outcome = ScenarioOutcome::evaluate(
            &[cheap],
            ScenarioKind::RateDecrease,
            &ScenarioParams::default(),
        )
        .unwrap();
        assert_eq!(outcome.loans[0].new_rate, Rate::from_percent(dec!(0.1)));
    }

    #[test]
    fn test_extra_payments_beats_current_on_card() {
        // doubling the card payment must strictly cut both time and interest
        let loans = vec![credit_card()];
        let params = ScenarioParams {
            extra_budget: Money::from_major(255),
            ..ScenarioParams::default()
        };

        let current =
            ScenarioOutcome::evaluate(&loans, ScenarioKind::Current, &params).unwrap();
        let extra =
            ScenarioOutcome::evaluate(&loans, ScenarioKind::ExtraPayments, &params).unwrap();

        assert!(
            extra.loans[0].months_to_payoff.unwrap()
                < current.loans[0].months_to_payoff.unwrap()
        );
        assert!(extra.loans[0].total_interest < current.loans[0].total_interest);
    }

    #[test]
    fn test_extra_budget_split_evenly() {
        let loans = fixtures::sample_loans();
        let params = ScenarioParams {
            extra_budget: Money::from_major(500),
            ..ScenarioParams::default()
        };
        let outcome =
            ScenarioOutcome::evaluate(&loans, ScenarioKind::ExtraPayments, &params).unwrap();

        for entry in &outcome.loans {
            assert_eq!(entry.extra_payment, Money::from_major(125));
        }
    }

    #[test]
    fn test_refinance_defaults_to_rate_minus_one() {
        let loans = fixtures::sample_loans();
        let outcome = ScenarioOutcome::evaluate(
            &loans,
            ScenarioKind::Refinance,
            &ScenarioParams::default(),
        )
        .unwrap();

        for (entry, loan) in outcome.loans.iter().zip(&loans) {
            assert_eq!(
                entry.new_rate.as_percent(),
                loan.interest_rate.as_percent() - dec!(1)
            );
        }
    }

    #[test]
    fn test_refinance_default_floors_sub_point_rates() {
        // a loan already under 1% must not refinance below the floor
        let cheap = LoanBuilder::new()
            .name("cheap")
            .kind(LoanKind::Auto)
            .balance(Money::from_major(10_000))
            .rate(Rate::from_percent(dec!(0.9)))
            .monthly_payment(Money::from_major(300))
            .due_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
            .build()
            .unwrap();

        let outcome = ScenarioOutcome::evaluate(
            &[cheap],
            ScenarioKind::Refinance,
            &ScenarioParams::default(),
        )
        .unwrap();
        assert_eq!(outcome.loans[0].new_rate, Rate::from_percent(dec!(0.1)));
    }

    #[test]
    fn test_refinance_with_explicit_target() {
        let loans = fixtures::sample_loans();
        let params = ScenarioParams {
            refinance_rate: Some(Rate::from_percent(dec!(5.5))),
            ..ScenarioParams::default()
        };
        let outcome =
            ScenarioOutcome::evaluate(&loans, ScenarioKind::Refinance, &params).unwrap();
        for entry in &outcome.loans {
            assert_eq!(entry.new_rate, Rate::from_percent(dec!(5.5)));
        }
    }

    #[test]
    fn test_stress_applies_shock_and_income_cut() {
        let loans = vec![credit_card()];
        let outcome = ScenarioOutcome::evaluate(
            &loans,
            ScenarioKind::EconomicStress,
            &ScenarioParams::default(),
        )
        .unwrap();

        let entry = &outcome.loans[0];
        assert_eq!(entry.new_rate, Rate::from_percent(dec!(20.99)));

        // the stressed payment is 90% of the re-amortized one
        let full = monthly_payment(
            Money::from_major(8_500),
            Rate::from_percent(dec!(20.99)),
            360,
        )
        .unwrap();
        assert_eq!(entry.new_payment, full * dec!(0.9));
    }

    #[test]
    fn test_summary_aggregation() {
        let loans = fixtures::sample_loans();
        let outcome = ScenarioOutcome::evaluate(
            &loans,
            ScenarioKind::RateDecrease,
            &ScenarioParams::default(),
        )
        .unwrap();

        let interest: Money = outcome.loans.iter().map(|e| e.total_interest).sum();
        let payments: Money = outcome.loans.iter().map(|e| e.total_payment).sum();
        let savings: Money = outcome.loans.iter().map(|e| e.interest_savings).sum();
        let max = outcome
            .loans
            .iter()
            .filter_map(|e| e.months_to_payoff)
            .max();

        assert_eq!(outcome.summary.total_interest, interest);
        assert_eq!(outcome.summary.total_monthly_payment, payments);
        assert_eq!(outcome.summary.total_interest_savings, savings);
        assert_eq!(outcome.summary.max_payoff_months, max);
    }

    #[test]
    fn test_evaluate_all_covers_every_kind() {
        let loans = fixtures::sample_loans();
        let outcomes =
            ScenarioOutcome::evaluate_all(&loans, &ScenarioParams::default()).unwrap();
        assert_eq!(outcomes.len(), ScenarioKind::ALL.len());
        assert_eq!(outcomes[0].kind, ScenarioKind::Current);
    }

    #[test]
    fn test_empty_portfolio_rejected() {
        let err = ScenarioOutcome::evaluate(
            &[],
            ScenarioKind::Current,
            &ScenarioParams::default(),
        );
        assert!(matches!(err, Err(EngineError::EmptyPortfolio)));
    }
}
