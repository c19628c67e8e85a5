use thiserror::Error;

use crate::decimal::{Money, Rate};

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid term: {months} months")]
    InvalidTerm {
        months: i64,
    },

    #[error("negative principal: {principal}")]
    NegativePrincipal {
        principal: Money,
    },

    #[error("invalid interest rate: {rate}")]
    InvalidRate {
        rate: Rate,
    },

    #[error("non-positive monthly payment: {payment}")]
    NonPositivePayment {
        payment: Money,
    },

    #[error("negative extra budget: {budget}")]
    NegativeExtraBudget {
        budget: Money,
    },

    #[error("empty loan portfolio")]
    EmptyPortfolio,

    #[error("invalid loan {name}: {message}")]
    InvalidLoan {
        name: String,
        message: String,
    },

    #[error("calculation error: {message}")]
    CalculationError {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, EngineError>;
