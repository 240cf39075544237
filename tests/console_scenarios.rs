// End-to-end menu sessions driven from an in-memory script

use bank_console::{AccountKind, AccountRegistry, Console, ConsoleConfig};
use std::io::Cursor;

fn run_session(script: &str) -> (String, AccountRegistry) {
    let mut output = Vec::new();
    let registry = {
        let mut console = Console::new(
            Cursor::new(script.as_bytes().to_vec()),
            &mut output,
            ConsoleConfig::default(),
        );
        console.run().unwrap();
        console.into_registry()
    };
    (String::from_utf8(output).unwrap(), registry)
}

#[test]
fn test_savings_scenario() {
    let script = "\
1\nS1\nAlice\n1000\n5\n\
5\nS1\n1500\n\
4\nS1\n500\n\
7\n\
8\n";
    let (out, registry) = run_session(script);

    assert!(out.contains("Savings Account created successfully!"));
    assert!(out.contains("Insufficient funds!"));
    assert!(out.contains("Deposited: $500.00. New Balance: $1500.00"));
    assert!(out.contains("Savings Account Interest: $75.00"));
    assert!(out.ends_with("Exiting system. Goodbye!\n"));

    assert_eq!(registry.find_by_number("S1").unwrap().balance(), 1500.0);
}

#[test]
fn test_checking_overdraft_scenario() {
    let script = "\
2\nC1\nBob\n200\n300\n\
5\nC1\n400\n\
5\nC1\n400\n\
6\n\
8\n";
    let (out, registry) = run_session(script);

    assert!(out.contains("Checking Account created successfully!"));
    assert!(out.contains("Withdrawn: $400.00. Remaining Balance: -$200.00"));
    assert_eq!(out.matches("Withdrawal exceeds overdraft limit!").count(), 1);
    assert!(out.contains("Account Number: C1, Holder: Bob, Balance: -$200.00"));

    assert_eq!(registry.find_by_number("C1").unwrap().balance(), -200.0);
}

#[test]
fn test_listing_and_interest_follow_insertion_order() {
    let script = "\
3\nF1\nCarol\n1000\n24\n5\n\
2\nC1\nBob\n200\n300\n\
1\nS1\nAlice\n1000\n5\n\
6\n\
7\n\
8\n";
    let (out, registry) = run_session(script);

    let f1 = out.find("Account Number: F1").unwrap();
    let c1 = out.find("Account Number: C1").unwrap();
    let s1 = out.find("Account Number: S1").unwrap();
    assert!(f1 < c1 && c1 < s1);

    let fixed = out.find("Fixed Deposit Interest for 24 months: $100.00").unwrap();
    let none = out.find("No interest for checking accounts.").unwrap();
    let savings = out.find("Savings Account Interest: $50.00").unwrap();
    assert!(fixed < none && none < savings);

    assert_eq!(registry.len(), 3);
    assert_eq!(
        registry
            .by_kind(&AccountKind::Savings { interest_rate: 0.0 })
            .len(),
        1
    );
}

#[test]
fn test_duplicate_account_numbers_use_first_match() {
    let script = "\
1\nA1\nFirst\n100\n5\n\
1\nA1\nSecond\n100\n5\n\
4\nA1\n50\n\
6\n\
8\n";
    let (out, registry) = run_session(script);

    assert!(out.contains("Account Number: A1, Holder: First, Balance: $150.00"));
    assert!(out.contains("Account Number: A1, Holder: Second, Balance: $100.00"));

    let balances: Vec<f64> = registry.iter().map(|a| a.balance()).collect();
    assert_eq!(balances, vec![150.0, 100.0]);
}

#[test]
fn test_failed_operations_leave_state_unchanged() {
    let script = "\
3\nF1\nCarol\n300\n12\n4\n\
5\nF1\n300.01\n\
5\nMISSING\n10\n\
4\nMISSING\n10\n\
9\n\
8\n";
    let (out, registry) = run_session(script);

    assert!(out.contains("Insufficient funds!"));
    assert_eq!(out.matches("Account not found!").count(), 2);
    assert!(out.contains("Invalid choice! Please select 1-8."));

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.total_balance(), 300.0);
}

#[test]
fn test_summary_snapshot_after_session() {
    let script = "2\nC1\nBob\n200\n300\n5\nC1\n250\n8\n";
    let (_, registry) = run_session(script);

    let json = serde_json::to_value(registry.snapshot()).unwrap();
    assert_eq!(json["count"], 1);
    assert_eq!(json["total_balance"], -50.0);
    assert_eq!(json["accounts"][0]["kind"]["type"], "checking");
    assert_eq!(registry.overdrawn_accounts().len(), 1);
}
