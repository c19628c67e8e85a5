use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::loan::{Loan, LoanId};

/// utilization percentage above which a revolving loan is flagged
const UTILIZATION_THRESHOLD: Decimal = dec!(80);
/// payment-due alerts fire this many days ahead
const DUE_SOON_DAYS: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    PaymentDue,
    HighUtilization,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// one alert derived from loan state; never persisted, recomputed on demand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub severity: Severity,
    pub title: String,
    pub message: String,
    pub loan_id: LoanId,
    pub due_date: Option<NaiveDate>,
}

/// derive payment-due and utilization alerts from the portfolio. The clock
/// comes from the time provider so tests pin "today".
pub fn generate_alerts(loans: &[Loan], time_provider: &SafeTimeProvider) -> Vec<Alert> {
    let today = time_provider.now().date_naive();
    let mut alerts = Vec::new();

    for loan in loans {
        let days_until_due = (loan.due_date - today).num_days();

        if (0..=DUE_SOON_DAYS).contains(&days_until_due) {
            let severity = match days_until_due {
                0 => Severity::High,
                1 => Severity::Medium,
                _ => Severity::Low,
            };
            let title = match days_until_due {
                0 => "Payment Due Today".to_string(),
                1 => "Payment Due in 1 day".to_string(),
                n => format!("Payment Due in {n} days"),
            };
            alerts.push(Alert {
                kind: AlertKind::PaymentDue,
                severity,
                title,
                message: format!(
                    "{} payment of ${} is due",
                    loan.name, loan.monthly_payment
                ),
                loan_id: loan.id,
                due_date: Some(loan.due_date),
            });
        }

        if let Some(utilization) = loan.utilization() {
            if utilization > UTILIZATION_THRESHOLD {
                alerts.push(Alert {
                    kind: AlertKind::HighUtilization,
                    severity: Severity::High,
                    title: "High Credit Utilization".to_string(),
                    message: format!(
                        "{} is at {}% utilization",
                        loan.name,
                        utilization.round_dp(1)
                    ),
                    loan_id: loan.id,
                    due_date: None,
                });
            }
        }
    }

    alerts
}
