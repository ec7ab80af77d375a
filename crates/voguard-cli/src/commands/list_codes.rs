//! List codes command implementation.

use voguard_core::DescriptorTable;
use voguard_rules::standard_checks;

/// Runs the list-codes command.
pub fn run() {
    let checks = standard_checks();

    println!("Diagnostic codes:\n");
    println!("{:<8} {:<32} Title", "Code", "Check");
    println!("{}", "-".repeat(90));

    for descriptor in DescriptorTable::standard().iter() {
        let check = checks
            .iter()
            .find(|c| c.kind() == descriptor.kind)
            .map_or("-", |c| c.name());
        println!("{:<8} {:<32} {}", descriptor.code, check, descriptor.title);
    }

    println!("\nEvery code is reported as an error and cannot be suppressed.");
    println!("\nUse --checks to run a subset, e.g.:");
    println!("  voguard check --checks no-nesting,known-conversions");
    println!("  voguard check --checks VG001,VG006");
}
