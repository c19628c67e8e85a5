/// compare avalanche, snowball, and hybrid repayment plans
use debt_optimizer_rs::chrono::NaiveDate;
use debt_optimizer_rs::{
    Loan, LoanBuilder, LoanKind, Money, Rate, StrategyComparison,
};
use rust_decimal_macros::dec;

fn demo_loans() -> Result<Vec<Loan>, Box<dyn std::error::Error>> {
    let due = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    Ok(vec![
        LoanBuilder::new()
            .name("Credit Card")
            .kind(LoanKind::CreditCard)
            .balance(Money::from_major(8_500))
            .rate(Rate::from_percent(dec!(18.99)))
            .monthly_payment(Money::from_major(255))
            .credit_limit(Money::from_major(15_000))
            .due_date(due)
            .build()?,
        LoanBuilder::new()
            .name("Auto Loan")
            .kind(LoanKind::Auto)
            .balance(Money::from_major(22_500))
            .rate(Rate::from_percent(dec!(4.5)))
            .monthly_payment(Money::from_major(520))
            .remaining_term(48)
            .due_date(due)
            .build()?,
        LoanBuilder::new()
            .name("Personal Loan")
            .kind(LoanKind::Personal)
            .balance(Money::from_major(12_000))
            .rate(Rate::from_percent(dec!(12.5)))
            .monthly_payment(Money::from_major(450))
            .remaining_term(28)
            .due_date(due)
            .build()?,
    ])
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let loans = demo_loans()?;
    let comparison = StrategyComparison::run(&loans, Money::from_major(500))?;

    for plan in [&comparison.avalanche, &comparison.snowball, &comparison.hybrid] {
        println!("\n{:?}", plan.strategy);
        for entry in &plan.entries {
            println!(
                "  {:<14} payment {:>8}  extra {:>7}  payoff {:?} months",
                entry.loan_name,
                entry.monthly_payment.round_dp(2),
                entry.extra_payment.round_dp(2),
                entry.months_to_payoff,
            );
        }
        println!(
            "  total interest {}  debt-free in {:?} months",
            plan.total_interest.round_dp(2),
            plan.total_months,
        );
    }

    println!(
        "\ncheapest strategy: {:?}",
        comparison.cheapest().strategy
    );
    Ok(())
}
