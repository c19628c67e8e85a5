/// run every what-if scenario over a small portfolio and dump JSON
use debt_optimizer_rs::chrono::NaiveDate;
use debt_optimizer_rs::{
    LoanBuilder, LoanKind, Money, Rate, ScenarioOutcome, ScenarioParams,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let due = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    let loans = vec![
        LoanBuilder::new()
            .name("Mortgage")
            .kind(LoanKind::Mortgage)
            .balance(Money::from_major(285_000))
            .rate(Rate::from_percent(dec!(3.25)))
            .monthly_payment(Money::from_decimal(dec!(1392.50)))
            .remaining_term(312)
            .due_date(due)
            .build()?,
        LoanBuilder::new()
            .name("Credit Card")
            .kind(LoanKind::CreditCard)
            .balance(Money::from_major(8_500))
            .rate(Rate::from_percent(dec!(18.99)))
            .monthly_payment(Money::from_major(255))
            .credit_limit(Money::from_major(15_000))
            .due_date(due)
            .build()?,
    ];

    let outcomes = ScenarioOutcome::evaluate_all(&loans, &ScenarioParams::default())?;

    for outcome in &outcomes {
        println!(
            "{:<16?} interest {:>12}  monthly {:>9}  payoff {:?} mo  savings {:>12}",
            outcome.kind,
            outcome.summary.total_interest.round_dp(2),
            outcome.summary.total_monthly_payment.round_dp(2),
            outcome.summary.max_payoff_months,
            outcome.summary.total_interest_savings.round_dp(2),
        );
    }

    // outputs are plain data, fit for the presentation boundary
    let json = serde_json::to_string_pretty(&outcomes[1])?;
    println!("\nrate_increase as JSON:\n{json}");
    Ok(())
}
