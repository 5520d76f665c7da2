// ABOUTME: Model listing command for wprime-cli
// ABOUTME: Prints every supported W' model with its parameter requirements
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use wprime_balance::models::WPrimeModelType;

/// Print the supported models
pub fn list() {
    let default_model = WPrimeModelType::default();
    println!("\nSupported W' models:");
    println!("{}", "=".repeat(72));
    for model in WPrimeModelType::ALL {
        let mut parameters = vec!["CP", "W'"];
        if model.uses_tau() {
            parameters.push("tau");
        }
        if model.uses_k_in() {
            parameters.push("kIn");
        }
        let marker = if model == default_model {
            " (default)"
        } else {
            ""
        };
        println!(
            "  {:<20} {:<28} {}{marker}",
            model.name(),
            model.display_name(),
            parameters.join(", ")
        );
    }
    println!("{}", "=".repeat(72));
}
