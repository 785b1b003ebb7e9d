//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use coffeeshop_core::{Coffee, Purchase};

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a hint to stderr.
pub fn hint(msg: &str) {
    eprintln!("{}", msg.dimmed());
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print one catalogue line.
pub fn coffee(coffee: &Coffee) {
    let stock = if coffee.in_stock() {
        format!("{} in stock", coffee.stock).normal()
    } else {
        "sold out".red()
    };
    println!(
        "{:>4}  {:<24} {:>8}  {}",
        coffee.id,
        coffee.name.bold(),
        format!("${:.2}", coffee.price),
        stock
    );
    if !coffee.description.is_empty() {
        println!("      {}", coffee.description.dimmed());
    }
}

/// Print one purchase history line.
pub fn purchase(purchase: &Purchase) {
    let name = purchase
        .coffee_name
        .clone()
        .unwrap_or_else(|| format!("coffee #{}", purchase.coffee_id));
    println!(
        "{:>4}  {:<24} x{:<3} {:>8}  {}",
        purchase.id,
        name,
        purchase.quantity,
        format!("${:.2}", purchase.total_price),
        purchase.date().unwrap_or("").dimmed()
    );
}
