pub mod alerts;
pub mod amortization;
pub mod decimal;
pub mod errors;
pub mod loan;
pub mod portfolio;
pub mod refinance;
pub mod savings;
pub mod scenario;
pub mod strategy;

// re-export key types
pub use decimal::{Money, Rate};
pub use errors::{EngineError, Result};
pub use alerts::{Alert, AlertKind, Severity};
pub use amortization::{
    monthly_payment, AmortizationSchedule, ExtraPaymentImpact, PayoffStatus, ScheduleEntry,
};
pub use loan::{Loan, LoanBuilder, LoanId, LoanKind, DEFAULT_HORIZON_MONTHS};
pub use portfolio::PortfolioSummary;
pub use refinance::{RefinanceComparison, RefinanceInputs};
pub use savings::{SavingsAnalysis, ExtraPaymentSweepPoint, RefinanceSweepPoint};
pub use scenario::{ScenarioKind, ScenarioOutcome, ScenarioParams, ScenarioSummary};
pub use strategy::{PaymentPlan, PaymentPlanEntry, Strategy, StrategyComparison};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
