/// quick start - compute a payment and print the first year of a schedule
use debt_optimizer_rs::{AmortizationSchedule, Money, Rate};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // $250,000 mortgage at 3.5% over 30 years
    let schedule = AmortizationSchedule::generate(
        Money::from_major(250_000),
        Rate::from_percent(dec!(3.5)),
        360,
        Money::ZERO,
    )?;

    println!("monthly payment: {}", schedule.monthly_payment);
    println!("total interest:  {}", schedule.total_interest);
    println!("months to payoff: {}", schedule.total_months);

    println!("\nmonth  payment    principal  interest   balance");
    for entry in schedule.entries.iter().take(12) {
        println!(
            "{:>5}  {:>9}  {:>9}  {:>9}  {:>10}",
            entry.month,
            entry.payment.round_dp(2),
            entry.principal_portion.round_dp(2),
            entry.interest_portion.round_dp(2),
            entry.remaining_balance.round_dp(2),
        );
    }

    Ok(())
}
