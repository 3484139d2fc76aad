//! Search command handler

use anyhow::{Context, Result, bail};
use colored::*;
use fitcheck_client::ShoppingProvider;
use fitcheck_core::domain::shopping::{ShoppingItem, menswear_query};

use crate::config::Config;

/// Search for shopping items and list them
pub async fn search(query: &str, num: usize, menswear: bool, config: &Config) -> Result<()> {
    let query = query.trim();
    if query.is_empty() {
        bail!("Search query cannot be empty");
    }
    if num == 0 {
        bail!("--num must be greater than 0");
    }

    let query = if menswear {
        menswear_query(query)
    } else {
        query.to_string()
    };
    let client = config.shopping_client()?;

    let items = client
        .search(&query, num)
        .await
        .context("Shopping search failed")?;

    if items.is_empty() {
        println!("{}", format!("No results for \"{}\".", query).yellow());
    } else {
        println!(
            "{}",
            format!("Found {} item(s) for \"{}\":", items.len(), query).bold()
        );
        println!();
        for item in &items {
            print_item(item);
        }
    }

    Ok(())
}

fn print_item(item: &ShoppingItem) {
    println!("  {} {}", "▸".cyan(), item.title.bold());
    println!("    {} from {}", item.price.green(), item.seller);
    println!("    {}", item.link.dimmed());
    println!();
}
