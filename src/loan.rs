use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::{Money, Rate};
use crate::errors::{EngineError, Result};

/// unique identifier for a loan
pub type LoanId = Uuid;

/// amortization horizon used when a loan has no known remaining term
pub const DEFAULT_HORIZON_MONTHS: u32 = 360;

/// loan categories; open-ended via `Other`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanKind {
    Mortgage,
    CreditCard,
    Auto,
    Personal,
    Student,
    #[serde(untagged)]
    Other(String),
}

impl LoanKind {
    pub fn is_revolving(&self) -> bool {
        matches!(self, LoanKind::CreditCard)
    }

    pub fn as_str(&self) -> &str {
        match self {
            LoanKind::Mortgage => "mortgage",
            LoanKind::CreditCard => "credit_card",
            LoanKind::Auto => "auto",
            LoanKind::Personal => "personal",
            LoanKind::Student => "student",
            LoanKind::Other(s) => s,
        }
    }
}

/// one debt obligation, consumed read-only by every engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: LoanId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: LoanKind,
    pub balance: Money,
    pub original_amount: Option<Money>,
    pub interest_rate: Rate,
    pub monthly_payment: Money,
    pub minimum_payment: Option<Money>,
    pub due_date: NaiveDate,
    pub term: Option<u32>,
    pub remaining_term: Option<u32>,
    pub credit_limit: Option<Money>,
    pub is_active: bool,
    pub start_date: Option<NaiveDate>,
}

impl Loan {
    /// check record invariants before it enters any engine
    pub fn validate(&self) -> Result<()> {
        if self.balance.is_negative() {
            return Err(EngineError::InvalidLoan {
                name: self.name.clone(),
                message: format!("negative balance {}", self.balance),
            });
        }
        if self.interest_rate.as_percent() < Decimal::ZERO {
            return Err(EngineError::InvalidRate {
                rate: self.interest_rate,
            });
        }
        if !self.monthly_payment.is_positive() {
            // a non-positive payment makes schedule generation non-terminating
            return Err(EngineError::NonPositivePayment {
                payment: self.monthly_payment,
            });
        }
        Ok(())
    }

    /// floor payment, falling back to the contractual payment
    pub fn minimum_payment(&self) -> Money {
        self.minimum_payment.unwrap_or(self.monthly_payment)
    }

    /// months used as the amortization horizon for scenario and savings math
    pub fn horizon_months(&self) -> u32 {
        self.remaining_term.unwrap_or(DEFAULT_HORIZON_MONTHS)
    }

    /// credit utilization as a percentage; only meaningful for revolving
    /// loans with a positive credit limit
    pub fn utilization(&self) -> Option<Decimal> {
        match self.credit_limit {
            Some(limit) if self.kind.is_revolving() && limit.is_positive() => {
                Some(self.balance.as_decimal() / limit.as_decimal() * Decimal::from(100))
            }
            _ => None,
        }
    }

    /// fraction of the original principal already repaid, as a percentage
    pub fn progress(&self) -> Option<Decimal> {
        match self.original_amount {
            Some(original) if original.is_positive() => {
                let paid = original - self.balance;
                Some(paid.as_decimal() / original.as_decimal() * Decimal::from(100))
            }
            _ => None,
        }
    }
}

/// builder for loan records
#[derive(Debug, Clone, Default)]
pub struct LoanBuilder {
    name: Option<String>,
    kind: Option<LoanKind>,
    balance: Option<Money>,
    original_amount: Option<Money>,
    interest_rate: Option<Rate>,
    monthly_payment: Option<Money>,
    minimum_payment: Option<Money>,
    due_date: Option<NaiveDate>,
    term: Option<u32>,
    remaining_term: Option<u32>,
    credit_limit: Option<Money>,
    start_date: Option<NaiveDate>,
}

impl LoanBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn kind(mut self, kind: LoanKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn balance(mut self, balance: Money) -> Self {
        self.balance = Some(balance);
        self
    }

    pub fn original_amount(mut self, amount: Money) -> Self {
        self.original_amount = Some(amount);
        self
    }

    pub fn rate(mut self, rate: Rate) -> Self {
        self.interest_rate = Some(rate);
        self
    }

    pub fn monthly_payment(mut self, payment: Money) -> Self {
        self.monthly_payment = Some(payment);
        self
    }

    pub fn minimum_payment(mut self, payment: Money) -> Self {
        self.minimum_payment = Some(payment);
        self
    }

    pub fn due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    pub fn term(mut self, months: u32) -> Self {
        self.term = Some(months);
        self
    }

    pub fn remaining_term(mut self, months: u32) -> Self {
        self.remaining_term = Some(months);
        self
    }

    pub fn credit_limit(mut self, limit: Money) -> Self {
        self.credit_limit = Some(limit);
        self
    }

    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn build(self) -> Result<Loan> {
        let missing = |field: &str| EngineError::InvalidLoan {
            name: self.name.clone().unwrap_or_default(),
            message: format!("missing required field: {field}"),
        };

        let loan = Loan {
            id: Uuid::new_v4(),
            name: self.name.clone().ok_or_else(|| missing("name"))?,
            kind: self.kind.clone().ok_or_else(|| missing("type"))?,
            balance: self.balance.ok_or_else(|| missing("balance"))?,
            original_amount: self.original_amount,
            interest_rate: self.interest_rate.ok_or_else(|| missing("interestRate"))?,
            monthly_payment: self.monthly_payment.ok_or_else(|| missing("monthlyPayment"))?,
            minimum_payment: self.minimum_payment,
            due_date: self.due_date.ok_or_else(|| missing("dueDate"))?,
            term: self.term,
            remaining_term: self.remaining_term,
            credit_limit: self.credit_limit,
            is_active: true,
            start_date: self.start_date,
        };

        loan.validate()?;
        Ok(loan)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_builder_requires_core_fields() {
        let err = LoanBuilder::new().name("incomplete").build();
        assert!(err.is_err());
    }

    #[test]
    fn test_validate_rejects_zero_payment() {
        let loan = LoanBuilder::new()
            .name("bad")
            .kind(LoanKind::Personal)
            .balance(Money::from_major(1_000))
            .rate(Rate::from_percent(dec!(5)))
            .monthly_payment(Money::ZERO)
            .due_date(date(2024, 1, 1))
            .build();
        assert!(matches!(
            loan,
            Err(EngineError::NonPositivePayment { .. })
        ));
    }

    #[test]
    fn test_utilization_credit_card_only() {
        let loans = fixtures::sample_loans();
        let card = &loans[1];
        let utilization = card.utilization().unwrap();
        assert_eq!(utilization.round_dp(2), dec!(56.67));

        // mortgage has no credit limit
        assert!(loans[0].utilization().is_none());
    }

    #[test]
    fn test_progress() {
        let loans = fixtures::sample_loans();
        let auto = &loans[2]; // 28,000 original, 22,500 left
        let progress = auto.progress().unwrap();
        assert_eq!(progress.round_dp(2), dec!(19.64));
    }

    #[test]
    fn test_minimum_payment_fallback() {
        let loans = fixtures::sample_loans();
        assert_eq!(loans[1].minimum_payment(), Money::from_major(170));
        assert_eq!(loans[0].minimum_payment(), loans[0].monthly_payment);
    }

    #[test]
    fn test_horizon_defaults_to_360() {
        let loans = fixtures::sample_loans();
        assert_eq!(loans[1].horizon_months(), 360);
        assert_eq!(loans[2].horizon_months(), 48);
    }

    #[test]
    fn test_serde_field_names() {
        let loans = fixtures::sample_loans();
        let json = serde_json::to_value(&loans[1]).unwrap();
        assert_eq!(json["type"], "credit_card");
        assert!(json.get("monthlyPayment").is_some());
        assert!(json.get("creditLimit").is_some());

        let back: Loan = serde_json::from_value(json).unwrap();
        assert_eq!(back, loans[1]);
    }
}
