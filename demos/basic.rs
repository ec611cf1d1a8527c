//! Basic introduction to faultline.
//!
//! This example demonstrates the fundamental concepts:
//! 1. Logging with `log!()`, which names every argument
//! 2. Checking conditions with `check!()`
//! 3. Defusing a fault to handle it yourself
//! 4. Configuring the threshold from `FAULTLINE_LOG`

use faultline::{Fault, check, debug, log};

/// A failed check raises a fault. Dropping it reports the failure and
/// execution continues.
fn withdraw(balance: u64, amount: u64) -> u64 {
    if let Err(_fault) = check!(amount <= balance, "insufficient funds", balance, amount) {
        // Reported here when `_fault` goes out of scope:
        // recoverable exception: demos/basic.rs:14: failed: expected amount <= balance;
        //   insufficient funds; balance = 10; amount = 25
        return balance;
    }
    balance - amount
}

/// Faults can be defused: the caller takes the exception and nothing is
/// reported.
fn parse_port(text: &str) -> Result<u16, Fault> {
    let port: u16 = text.parse().unwrap_or(0);
    check!(port != 0, "invalid port", text)?;
    Ok(port)
}

fn main() {
    if let Err(error) = faultline::config::init_from_env() {
        eprintln!("ignoring FAULTLINE_LOG: {error}");
    }

    let user = "ada";
    let attempts = 3;
    log!(Warning, "login throttled", user, attempts);
    // warning: demos/basic.rs:38: login throttled; user = ada; attempts = 3

    // Only shown with FAULTLINE_LOG=debug.
    debug!("session state", user);

    println!("balance after withdrawal: {}", withdraw(10, 25));

    match parse_port("http") {
        Ok(port) => println!("port: {port}"),
        Err(fault) => {
            if let Ok(exception) = fault.into_exception() {
                println!("handled: {}", exception.description());
                // handled: expected port != 0; invalid port; text = http
            }
        }
    }
}
