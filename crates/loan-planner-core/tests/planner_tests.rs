use chrono::NaiveDate;
use loan_planner_core::planner::{compare_strategies, plan_repayment, LoanInput, PlanInput, SimulationInput};
use loan_planner_core::repayment::AllocationStrategy;
use loan_planner_core::LoanPlannerError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn loan(name: &str, balance: Decimal, rate: Decimal, min_payment: Decimal) -> LoanInput {
    LoanInput {
        name: Some(name.into()),
        balance,
        rate,
        min_payment,
    }
}

fn household_plan() -> PlanInput {
    PlanInput {
        loans: vec![
            loan("Credit Card", dec!(2500), dec!(24.99), dec!(75)),
            loan("Car Loan", dec!(12000), dec!(6.5), dec!(280)),
            loan("Student Loan", dec!(18000), dec!(4.2), dec!(190)),
            loan("Medical", dec!(900), Decimal::ZERO, dec!(50)),
        ],
        budget: dec!(900),
        start_date: NaiveDate::from_ymd_opt(2025, 3, 1),
    }
}

// ===========================================================================
// Comparison
// ===========================================================================

#[test]
fn test_household_comparison() {
    let result = compare_strategies(&household_plan()).unwrap();
    let out = &result.result;

    assert_eq!(out.total_min_payments, dec!(595));
    assert_eq!(out.extra_payment, dec!(305));

    assert_eq!(out.avalanche.months, 41);
    assert_eq!(out.avalanche.years, 3);
    assert_eq!(out.avalanche.rem_months, 5);
    assert_eq!(out.avalanche.total_interest, dec!(2983.73));
    assert_eq!(out.snowball.total_interest, dec!(3111.88));

    assert_eq!(out.recommendation.lower_interest, Some(AllocationStrategy::Avalanche));
    assert_eq!(out.recommendation.interest_savings, dec!(128.15));
    assert_eq!(out.recommendation.faster, None);
    assert_eq!(out.recommendation.months_saved, 0);

    assert_eq!(out.avalanche.payoff_date, NaiveDate::from_ymd_opt(2028, 7, 1));
    assert!(result.warnings.is_empty());
}

#[test]
fn test_output_envelope() {
    let result = compare_strategies(&household_plan()).unwrap();
    assert_eq!(result.methodology, "Avalanche vs Snowball Repayment Comparison");
    assert_eq!(result.metadata.precision, "rust_decimal_128bit");
    assert_eq!(result.assumptions["loans"], 4);
    assert_eq!(result.assumptions["max_months"], 1000);
}

#[test]
fn test_comparison_serialises_strategy_names() {
    let result = compare_strategies(&household_plan()).unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["result"]["avalanche"]["strategy"], "avalanche");
    assert_eq!(json["result"]["recommendation"]["lower_interest"], "avalanche");
    assert_eq!(json["result"]["avalanche"]["payoff_date"], "2028-07-01");
}

// ===========================================================================
// Validation surfaced through the entry points
// ===========================================================================

#[test]
fn test_budget_shortfall() {
    let mut input = household_plan();
    input.budget = dec!(500);
    let err = compare_strategies(&input).unwrap_err();
    assert!(matches!(err, LoanPlannerError::BudgetShortfall { .. }));
    assert_eq!(
        err.to_string(),
        "Budget $500.00 is less than total minimum payments $595.00"
    );
}

#[test]
fn test_invalid_loan_reports_field() {
    let mut input = household_plan();
    input.loans[2].rate = dec!(-3);
    let err = compare_strategies(&input).unwrap_err();
    assert_eq!(err.field(), Some("loans[2].rate"));
}

#[test]
fn test_no_loans() {
    let input = PlanInput {
        loans: vec![],
        budget: dec!(100),
        start_date: None,
    };
    let err = compare_strategies(&input).unwrap_err();
    assert_eq!(err.field(), Some("loans"));
}

// ===========================================================================
// Single-strategy plan
// ===========================================================================

#[test]
fn test_plan_repayment_from_json() {
    let json = r#"{
        "loans": [
            {"name": "Credit Card", "balance": 5000, "rate": 20, "min_payment": 100},
            {"name": "Car Loan", "balance": 3000, "rate": 5, "min_payment": 60}
        ],
        "budget": 300,
        "strategy": "snowball",
        "include_schedule": true
    }"#;
    let input: SimulationInput = serde_json::from_str(json).unwrap();
    let result = plan_repayment(&input).unwrap();
    let out = &result.result;

    assert_eq!(out.summary.months, 34);
    assert_eq!(out.summary.total_interest, dec!(2158.80));
    assert_eq!(out.schedule.len(), 34);
    assert_eq!(out.schedule.last().unwrap().closing_balance, Decimal::ZERO);
    assert_eq!(out.extra_payment, dec!(140));
}

#[test]
fn test_plan_repayment_strategies_match_comparison() {
    let plan = household_plan();
    let comparison = compare_strategies(&plan).unwrap().result;

    for strategy in AllocationStrategy::ALL {
        let input = SimulationInput {
            loans: plan.loans.clone(),
            budget: plan.budget,
            strategy,
            start_date: plan.start_date,
            include_schedule: false,
        };
        let summary = plan_repayment(&input).unwrap().result.summary;
        let expected = match strategy {
            AllocationStrategy::Avalanche => &comparison.avalanche,
            AllocationStrategy::Snowball => &comparison.snowball,
        };
        assert_eq!(&summary, expected);
    }
}
