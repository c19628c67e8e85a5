use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{EngineError, Result};

/// one row of a generated amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub month: u32,
    pub payment: Money,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub remaining_balance: Money,
    pub cumulative_interest: Money,
}

/// whether a schedule actually retired the balance within its cap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayoffStatus {
    /// balance driven to within the paid-off epsilon
    PaidOff,
    /// month cap reached with balance still outstanding; the payment does
    /// not amortize the loan
    InsufficientPayment,
}

/// full amortization schedule plus summary figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub principal: Money,
    pub interest_rate: Rate,
    pub monthly_payment: Money,
    pub extra_payment: Money,
    pub entries: Vec<ScheduleEntry>,
    pub total_interest: Money,
    pub total_months: u32,
    pub final_balance: Money,
    pub status: PayoffStatus,
}

/// standard fixed-payment annuity amount
pub fn monthly_payment(principal: Money, rate: Rate, term_months: u32) -> Result<Money> {
    if term_months == 0 {
        return Err(EngineError::InvalidTerm { months: 0 });
    }
    if principal.is_negative() {
        return Err(EngineError::NegativePrincipal { principal });
    }
    if rate.as_percent() < Decimal::ZERO {
        return Err(EngineError::InvalidRate { rate });
    }

    let monthly_rate = rate.monthly_fraction();
    if monthly_rate.is_zero() {
        return Ok(principal / Decimal::from(term_months));
    }

    // payment = P * r * (1 + r)^n / ((1 + r)^n - 1)
    let compound = compound_factor(monthly_rate, term_months);
    let numerator = principal.as_decimal() * monthly_rate * compound;
    let denominator = compound - Decimal::ONE;
    Ok(Money::from_decimal(numerator / denominator))
}

fn compound_factor(monthly_rate: Decimal, months: u32) -> Decimal {
    let base = Decimal::ONE + monthly_rate;
    let mut factor = Decimal::ONE;
    for _ in 0..months {
        factor *= base;
    }
    factor
}

impl AmortizationSchedule {
    /// generate a schedule at the standard annuity payment plus an optional
    /// extra monthly amount
    pub fn generate(
        principal: Money,
        rate: Rate,
        term_months: u32,
        extra_payment: Money,
    ) -> Result<Self> {
        if extra_payment.is_negative() {
            return Err(EngineError::NegativeExtraBudget {
                budget: extra_payment,
            });
        }

        let base_payment = monthly_payment(principal, rate, term_months)?;
        let total_payment = base_payment + extra_payment;

        let mut schedule =
            Self::run_schedule(principal, rate, total_payment, term_months);
        schedule.monthly_payment = base_payment;
        schedule.extra_payment = extra_payment;
        Ok(schedule)
    }

    /// generate a schedule at an explicit caller-supplied payment, bounded
    /// by `max_months`. Used where the contractual payment rather than the
    /// annuity amount drives the payoff.
    pub fn with_payment(
        principal: Money,
        rate: Rate,
        payment: Money,
        max_months: u32,
    ) -> Result<Self> {
        if max_months == 0 {
            return Err(EngineError::InvalidTerm { months: 0 });
        }
        if principal.is_negative() {
            return Err(EngineError::NegativePrincipal { principal });
        }
        if !payment.is_positive() {
            return Err(EngineError::NonPositivePayment { payment });
        }

        Ok(Self::run_schedule(principal, rate, payment, max_months))
    }

    fn run_schedule(
        principal: Money,
        rate: Rate,
        total_payment: Money,
        max_months: u32,
    ) -> Self {
        let monthly_rate = rate.monthly_fraction();

        let mut balance = principal;
        let mut cumulative_interest = Money::ZERO;
        let mut entries = Vec::new();
        let mut month = 1u32;

        // hard month cap guards payments at or below interest-only
        while !balance.is_settled() && month <= max_months {
            let interest_portion = balance * monthly_rate;
            // final payment only covers the remainder
            let principal_portion = (total_payment - interest_portion).min(balance);

            balance = (balance - principal_portion).max(Money::ZERO);
            cumulative_interest += interest_portion;

            entries.push(ScheduleEntry {
                month,
                payment: principal_portion + interest_portion,
                principal_portion,
                interest_portion,
                remaining_balance: balance,
                cumulative_interest,
            });

            month += 1;
        }

        let status = if balance.is_settled() {
            PayoffStatus::PaidOff
        } else {
            PayoffStatus::InsufficientPayment
        };

        Self {
            principal,
            interest_rate: rate,
            monthly_payment: total_payment,
            extra_payment: Money::ZERO,
            total_interest: cumulative_interest,
            total_months: entries.len() as u32,
            final_balance: balance,
            entries,
            status,
        }
    }

    pub fn is_paid_off(&self) -> bool {
        self.status == PayoffStatus::PaidOff
    }
}

/// standard vs extra-payment schedules side by side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraPaymentImpact {
    pub standard: AmortizationSchedule,
    pub with_extra: AmortizationSchedule,
    pub interest_saved: Money,
    pub months_saved: u32,
}

impl ExtraPaymentImpact {
    /// compare a loan's standard schedule against one with an extra monthly
    /// payment applied
    pub fn analyze(
        principal: Money,
        rate: Rate,
        term_months: u32,
        extra_payment: Money,
    ) -> Result<Self> {
        let standard = AmortizationSchedule::generate(principal, rate, term_months, Money::ZERO)?;
        let with_extra =
            AmortizationSchedule::generate(principal, rate, term_months, extra_payment)?;

        let interest_saved = standard.total_interest - with_extra.total_interest;
        let months_saved = standard.total_months.saturating_sub(with_extra.total_months);

        Ok(Self {
            standard,
            with_extra,
            interest_saved,
            months_saved,
        })
    }
}

/// flat payoff approximation used by the planning engines: whole months at a
/// constant payment, interest = payment * months - balance. Not a true
/// amortized-interest figure, kept for parity with the planner views.
pub fn flat_months_to_payoff(balance: Money, payment: Money) -> Option<u32> {
    if !payment.is_positive() {
        return None;
    }
    if balance.is_settled() {
        return Some(0);
    }
    (balance.as_decimal() / payment.as_decimal())
        .ceil()
        .to_u32()
}

/// flat-approximation interest over a payoff horizon
pub fn flat_interest_paid(balance: Money, payment: Money, months: u32) -> Money {
    payment * Decimal::from(months) - balance
}
