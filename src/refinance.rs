use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amortization::AmortizationSchedule;
use crate::decimal::{Money, Rate};
use crate::errors::{EngineError, Result};

/// terms for a two-loan current-vs-refinanced comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RefinanceInputs {
    pub current_balance: Money,
    pub current_rate: Rate,
    pub remaining_term: u32,
    pub new_rate: Rate,
    pub new_term: u32,
    /// rolled into the refinanced principal, not paid out of pocket
    pub closing_costs: Money,
    /// equity taken as cash, also rolled into the refinanced principal
    pub cash_out: Money,
}

/// full schedules for both loans plus the comparison metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefinanceComparison {
    pub inputs: RefinanceInputs,
    pub current_schedule: AmortizationSchedule,
    pub new_schedule: AmortizationSchedule,
    pub current_payment: Money,
    pub new_payment: Money,
    /// new payment minus current payment; negative when refinancing lowers it
    pub monthly_difference: Money,
    pub total_interest_savings: Money,
    /// interest savings net of closing costs
    pub net_savings: Money,
    /// months until cumulative payment savings offset closing costs; zero
    /// when the payments are identical
    pub break_even_months: Decimal,
}

impl RefinanceComparison {
    pub fn compare(inputs: RefinanceInputs) -> Result<Self> {
        if inputs.closing_costs.is_negative() {
            return Err(EngineError::CalculationError {
                message: format!("negative closing costs: {}", inputs.closing_costs),
            });
        }
        if inputs.cash_out.is_negative() {
            return Err(EngineError::CalculationError {
                message: format!("negative cash-out: {}", inputs.cash_out),
            });
        }

        let new_principal = inputs.current_balance + inputs.cash_out + inputs.closing_costs;

        let current_schedule = AmortizationSchedule::generate(
            inputs.current_balance,
            inputs.current_rate,
            inputs.remaining_term,
            Money::ZERO,
        )?;
        let new_schedule = AmortizationSchedule::generate(
            new_principal,
            inputs.new_rate,
            inputs.new_term,
            Money::ZERO,
        )?;

        let current_payment = current_schedule.monthly_payment;
        let new_payment = new_schedule.monthly_payment;
        let monthly_difference = new_payment - current_payment;
        let total_interest_savings =
            current_schedule.total_interest - new_schedule.total_interest;
        let net_savings = total_interest_savings - inputs.closing_costs;

        // guard the zero-difference case instead of propagating a division
        // by zero to the caller
        let break_even_months = if monthly_difference.is_zero() {
            Decimal::ZERO
        } else {
            inputs.closing_costs.as_decimal() / monthly_difference.abs().as_decimal()
        };

        Ok(Self {
            inputs,
            current_schedule,
            new_schedule,
            current_payment,
            new_payment,
            monthly_difference,
            total_interest_savings,
            net_savings,
            break_even_months,
        })
    }

    /// true when the refinanced loan costs less overall after closing costs
    pub fn is_worthwhile(&self) -> bool {
        self.net_savings.is_positive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn base_inputs() -> RefinanceInputs {
        RefinanceInputs {
            current_balance: Money::from_major(200_000),
            current_rate: Rate::from_percent_u32(5),
            remaining_term: 300,
            new_rate: Rate::from_percent(dec!(3.5)),
            new_term: 300,
            closing_costs: Money::from_major(4_000),
            cash_out: Money::ZERO,
        }
    }

    #[test]
    fn test_closing_costs_roll_into_principal() {
        let comparison = RefinanceComparison::compare(base_inputs()).unwrap();
        assert_eq!(
            comparison.new_schedule.principal,
            Money::from_major(204_000)
        );
    }

    #[test]
    fn test_break_even_formula() {
        let comparison = RefinanceComparison::compare(base_inputs()).unwrap();

        // the lower rate outweighs the rolled-in costs
        assert!(comparison.monthly_difference.is_negative());
        let expected = Money::from_major(4_000).as_decimal()
            / comparison.monthly_difference.abs().as_decimal();
        assert_eq!(comparison.break_even_months, expected);
        assert!(comparison.break_even_months > Decimal::ZERO);
    }

    #[test]
    fn test_zero_difference_break_even_is_zero() {
        let inputs = RefinanceInputs {
            new_rate: Rate::from_percent_u32(5),
            closing_costs: Money::ZERO,
            ..base_inputs()
        };
        let comparison = RefinanceComparison::compare(inputs).unwrap();

        assert!(comparison.monthly_difference.is_zero());
        assert_eq!(comparison.break_even_months, Decimal::ZERO);
    }

    #[test]
    fn test_interest_and_net_savings() {
        let comparison = RefinanceComparison::compare(base_inputs()).unwrap();

        let expected_savings = comparison.current_schedule.total_interest
            - comparison.new_schedule.total_interest;
        assert_eq!(comparison.total_interest_savings, expected_savings);
        assert_eq!(
            comparison.net_savings,
            expected_savings - Money::from_major(4_000)
        );
        assert!(comparison.is_worthwhile());
    }

    #[test]
    fn test_cash_out_increases_new_payment() {
        let without = RefinanceComparison::compare(base_inputs()).unwrap();
        let with_cash = RefinanceComparison::compare(RefinanceInputs {
            cash_out: Money::from_major(25_000),
            ..base_inputs()
        })
        .unwrap();

        assert_eq!(
            with_cash.new_schedule.principal,
            Money::from_major(229_000)
        );
        assert!(with_cash.new_payment > without.new_payment);
    }

    #[test]
    fn test_negative_closing_costs_rejected() {
        let err = RefinanceComparison::compare(RefinanceInputs {
            closing_costs: Money::from_major(-1),
            ..base_inputs()
        });
        assert!(matches!(err, Err(EngineError::CalculationError { .. })));
    }

    #[test]
    fn test_shorter_term_refinance() {
        // 15-year refinance: higher payment, much less interest
        let comparison = RefinanceComparison::compare(RefinanceInputs {
            new_term: 180,
            ..base_inputs()
        })
        .unwrap();

        assert!(comparison.new_payment > comparison.current_payment);
        assert!(comparison.total_interest_savings.is_positive());
        assert!(comparison.break_even_months > Decimal::ZERO);
    }
}
