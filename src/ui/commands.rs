use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::LazyLock;

use super::app::App;
use crate::db::Database;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &Database),
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit", cmd_quit, r);
    register_command!("quit", "Quit", cmd_quit, r);
    register_command!("a", "Add a transaction from the form", cmd_add, r);
    register_command!("add", "Add a transaction from the form", cmd_add, r);
    register_command!("u", "Update the form's ID with the form fields", cmd_update, r);
    register_command!(
        "update",
        "Update the form's ID with the form fields",
        cmd_update,
        r
    );
    register_command!(
        "d",
        "Delete a transaction (e.g. :delete 12, default: form ID)",
        cmd_delete,
        r
    );
    register_command!(
        "delete",
        "Delete a transaction (e.g. :delete 12, default: form ID)",
        cmd_delete,
        r
    );
    register_command!(
        "load",
        "Load a transaction into the form (e.g. :load 12)",
        cmd_load,
        r
    );
    register_command!("clear", "Clear the form", cmd_clear, r);
    register_command!("chart", "Toggle the category chart", cmd_chart, r);
    register_command!("refresh", "Reload all transactions", cmd_refresh, r);
    register_command!(
        "export",
        "Export transactions to CSV (e.g. :export ~/finance.csv)",
        cmd_export,
        r
    );
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, db: &Database) {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, db);
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_error(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _db: &Database) {
    app.running = false;
}

fn cmd_add(_args: &str, app: &mut App, db: &Database) {
    app.add_transaction(db);
}

fn cmd_update(_args: &str, app: &mut App, db: &Database) {
    app.update_transaction(db);
}

fn cmd_delete(args: &str, app: &mut App, _db: &Database) {
    app.request_delete(args);
}

fn cmd_load(args: &str, app: &mut App, db: &Database) {
    if args.is_empty() {
        app.set_error("Usage: :load <id>");
        return;
    }
    app.load_transaction(db, args);
}

fn cmd_clear(_args: &str, app: &mut App, _db: &Database) {
    app.form.clear();
    app.set_status("Form cleared");
}

fn cmd_chart(_args: &str, app: &mut App, _db: &Database) {
    app.toggle_chart();
}

fn cmd_refresh(_args: &str, app: &mut App, db: &Database) {
    if app.reload(db) {
        app.set_status(format!("Loaded {} transactions", app.transactions.len()));
    }
}

fn cmd_export(args: &str, app: &mut App, db: &Database) {
    if !app.reload(db) {
        return;
    }
    let path = if args.is_empty() {
        crate::export::default_export_path()
    } else {
        PathBuf::from(crate::export::expand_home(args))
    };

    match crate::export::export_to_path(&app.transactions, &path) {
        Ok(0) => app.set_status("No transactions to export"),
        Ok(count) => app.set_status(format!(
            "Exported {count} transactions to {}",
            path.display()
        )),
        Err(e) => {
            tracing::warn!("export failed: {e:#}");
            app.set_error(format!("Export failed: {e:#}"));
        }
    }
}

fn cmd_help(_args: &str, app: &mut App, _db: &Database) {
    app.show_help = true;
}
