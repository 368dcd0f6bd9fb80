use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::config::Variant;
use crate::db::Database;
use crate::models::{parse_id, TransactionDraft, MAX_AMOUNT};
use crate::summary::{self, Totals};
use crate::ui::util::format_amount;

pub(crate) fn as_cli(args: &[String], db: &Database, variant: Variant) -> Result<()> {
    match args[1].as_str() {
        "add" => cli_add(&args[2..], db, variant),
        "update" => cli_update(&args[2..], db, variant),
        "delete" | "rm" => cli_delete(&args[2..], db),
        "list" | "ls" => cli_list(db),
        "summary" | "s" => cli_summary(db),
        "export" => cli_export(&args[2..], db),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("fintrack {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("fintrack - local income and expense tracker");
    println!();
    println!("Usage: fintrack [--db <path>] [--basic] [command]");
    println!();
    println!("Commands:");
    println!("  (none)                                    Launch interactive TUI");
    println!("  add <category> <amount> <date> [desc]     Record a transaction");
    println!("  update <id> <category> <amount> <date> [desc]");
    println!("                                            Overwrite a transaction");
    println!("  delete <id>                               Delete a transaction");
    println!("  list                                      List all transactions");
    println!("  summary                                   Totals by category");
    println!("  export [path]                             Export to CSV");
    println!("                                            (default: ~/fintrack-export.csv)");
    println!("  --help, -h                                Show this help");
    println!("  --version, -V                             Show version");
    println!();
    println!("Flags:");
    println!("  --db <path>                               Database file (default: data dir)");
    println!("  --basic                                   Hide description and chart");
    println!();
    println!("Amounts are signed: positive for income, negative for expenses.");
    println!("The largest accepted magnitude is {MAX_AMOUNT}.");
    println!("Dates use YYYY-MM-DD.");
}

/// Validate `<category> <amount> <date> [description...]`.
pub(crate) fn parse_draft(args: &[String], variant: Variant) -> Result<TransactionDraft> {
    if args.len() < 3 {
        anyhow::bail!("Expected <category> <amount> <date> [description]");
    }
    let description = (args.len() > 3).then(|| args[3..].join(" "));
    if description.is_some() && !variant.has_description() {
        anyhow::bail!("Descriptions are not available in the basic variant");
    }
    let draft = TransactionDraft::parse(&args[0], &args[1], &args[2], description.as_deref())?;
    Ok(draft)
}

fn cli_add(args: &[String], db: &Database, variant: Variant) -> Result<()> {
    let draft = parse_draft(args, variant)
        .context("Usage: fintrack add <category> <amount> <date> [description]")?;
    let txn = db.insert_transaction(&draft)?;
    tracing::info!(id = txn.id, "added transaction from CLI");
    println!("Added {txn}");
    Ok(())
}

fn cli_update(args: &[String], db: &Database, variant: Variant) -> Result<()> {
    let usage = "Usage: fintrack update <id> <category> <amount> <date> [description]";
    let raw_id = args.first().context(usage)?;
    let id = parse_id(raw_id)?;
    let draft = parse_draft(&args[1..], variant).context(usage)?;
    let txn = if variant.has_description() {
        db.update_transaction(id, &draft)?
    } else {
        db.update_transaction_keep_description(id, &draft)?
    };
    tracing::info!(id, "updated transaction from CLI");
    println!("Updated {txn}");
    Ok(())
}

fn cli_delete(args: &[String], db: &Database) -> Result<()> {
    let raw_id = args.first().context("Usage: fintrack delete <id>")?;
    let id = parse_id(raw_id)?;
    db.delete_transaction(id)?;
    tracing::info!(id, "deleted transaction from CLI");
    println!("Deleted transaction #{id}");
    Ok(())
}

fn cli_list(db: &Database) -> Result<()> {
    let txns = db.get_transactions()?;
    if txns.is_empty() {
        println!("No transactions");
        return Ok(());
    }
    for txn in &txns {
        println!("{txn}");
    }
    println!("{} transactions", db.get_transaction_count()?);
    Ok(())
}

fn cli_summary(db: &Database) -> Result<()> {
    let txns = db.get_transactions()?;
    let totals = Totals::from_transactions(&txns);
    let by_category = summary::totals_by_category(&txns);

    println!("fintrack - {} transactions", txns.len());
    println!("{}", "─".repeat(44));
    println!("  Income:     {:>16}", format_amount(totals.income));
    println!("  Expenses:   {:>16}", format_amount(totals.expenses));
    println!("  Net:        {:>16}", format_amount(totals.net()));

    if !by_category.is_empty() {
        println!();
        println!("By Category:");
        for cat in &by_category {
            println!(
                "  {:<24} {:>16}  ({} txns)",
                cat.category,
                format_amount(cat.total),
                cat.count
            );
        }
    }
    Ok(())
}

fn cli_export(args: &[String], db: &Database) -> Result<()> {
    let path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| PathBuf::from(crate::export::expand_home(a)))
        .unwrap_or_else(crate::export::default_export_path);

    let txns = db.get_transactions()?;
    let count = crate::export::export_to_path(&txns, &path)?;
    if count == 0 {
        println!("No transactions to export (wrote header to {})", path.display());
    } else {
        println!("Exported {count} transactions to {}", path.display());
    }
    Ok(())
}
