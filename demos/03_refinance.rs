/// current-vs-refinanced mortgage comparison with closing costs
use debt_optimizer_rs::{Money, Rate, RefinanceComparison, RefinanceInputs};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let comparison = RefinanceComparison::compare(RefinanceInputs {
        current_balance: Money::from_major(200_000),
        current_rate: Rate::from_percent_u32(5),
        remaining_term: 300,
        new_rate: Rate::from_percent(dec!(3.5)),
        new_term: 300,
        closing_costs: Money::from_major(4_000),
        cash_out: Money::ZERO,
    })?;

    println!("current payment:  {}", comparison.current_payment.round_dp(2));
    println!("new payment:      {}", comparison.new_payment.round_dp(2));
    println!("monthly change:   {}", comparison.monthly_difference.round_dp(2));
    println!(
        "interest savings: {}",
        comparison.total_interest_savings.round_dp(2)
    );
    println!("net savings:      {}", comparison.net_savings.round_dp(2));
    println!(
        "break-even:       {} months",
        comparison.break_even_months.round_dp(1)
    );
    println!("worthwhile:       {}", comparison.is_worthwhile());
    Ok(())
}
