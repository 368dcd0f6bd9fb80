use chrono::Local;

use crate::config::Variant;
use crate::db::Database;
use crate::error::{Error, ValidationError};
use crate::models::{parse_id, Transaction, TransactionDraft};
use crate::summary::{self, CategoryTotal, Totals};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Field {
    Category,
    Amount,
    Date,
    Description,
    Id,
}

impl Field {
    /// Form fields shown for a variant, in tab order.
    pub(crate) fn all(variant: Variant) -> &'static [Field] {
        if variant.has_description() {
            &[
                Self::Category,
                Self::Amount,
                Self::Date,
                Self::Description,
                Self::Id,
            ]
        } else {
            &[Self::Category, Self::Amount, Self::Date, Self::Id]
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Category => "Category",
            Self::Amount => "Amount",
            Self::Date => "Date",
            Self::Description => "Description",
            Self::Id => "ID",
        }
    }

    pub(crate) fn placeholder(self) -> &'static str {
        match self {
            Self::Category => "e.g. Food",
            Self::Amount => "+income / -expense",
            Self::Date => "YYYY-MM-DD",
            Self::Description => "optional note",
            Self::Id => "target for update/delete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Editing,
    Command,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Editing => write!(f, "EDIT"),
            Self::Command => write!(f, "COMMAND"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingAction {
    DeleteTransaction { id: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatusKind {
    Info,
    Error,
}

/// Raw text typed into the entry form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Form {
    pub(crate) category: String,
    pub(crate) amount: String,
    pub(crate) date: String,
    pub(crate) description: String,
    pub(crate) id: String,
}

impl Form {
    pub(crate) fn value(&self, field: Field) -> &str {
        match field {
            Field::Category => &self.category,
            Field::Amount => &self.amount,
            Field::Date => &self.date,
            Field::Description => &self.description,
            Field::Id => &self.id,
        }
    }

    pub(crate) fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Category => &mut self.category,
            Field::Amount => &mut self.amount,
            Field::Date => &mut self.date,
            Field::Description => &mut self.description,
            Field::Id => &mut self.id,
        }
    }

    /// Fill every field from a stored transaction, including its ID.
    pub(crate) fn load(&mut self, txn: &Transaction) {
        self.category = txn.category.clone();
        self.amount = txn.amount.to_string();
        self.date = txn.date.clone();
        self.description = txn.description.clone().unwrap_or_default();
        self.id = txn.id.to_string();
    }

    /// Clear everything except the date.
    pub(crate) fn clear(&mut self) {
        let date = std::mem::take(&mut self.date);
        *self = Self {
            date,
            ..Self::default()
        };
    }

    pub(crate) fn draft(&self, variant: Variant) -> Result<TransactionDraft, ValidationError> {
        let description = variant
            .has_description()
            .then_some(self.description.as_str());
        TransactionDraft::parse(&self.category, &self.amount, &self.date, description)
    }

    pub(crate) fn target_id(&self) -> Result<i64, ValidationError> {
        parse_id(&self.id)
    }
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) variant: Variant,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) status_kind: StatusKind,
    pub(crate) show_help: bool,
    pub(crate) show_chart: bool,

    // Entry form
    pub(crate) form: Form,
    pub(crate) focus: Field,

    // Transactions
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) transaction_index: usize,
    pub(crate) transaction_scroll: usize,

    // Summary
    pub(crate) category_totals: Vec<CategoryTotal>,
    pub(crate) totals: Totals,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(variant: Variant) -> Self {
        let form = Form {
            date: Local::now().format("%Y-%m-%d").to_string(),
            ..Form::default()
        };

        Self {
            running: true,
            variant,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            status_kind: StatusKind::Info,
            show_help: false,
            show_chart: variant.has_chart(),

            form,
            focus: Field::Category,

            transactions: Vec::new(),
            transaction_index: 0,
            transaction_scroll: 0,

            category_totals: Vec::new(),
            totals: Totals::default(),

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    /// Re-read every transaction and recompute the summaries.
    pub(crate) fn refresh(&mut self, db: &Database) -> Result<(), Error> {
        self.transactions = db.get_transactions()?;
        self.category_totals = summary::totals_by_category(&self.transactions);
        self.totals = Totals::from_transactions(&self.transactions);
        if self.transaction_index >= self.transactions.len() {
            self.transaction_index = self.transactions.len().saturating_sub(1);
        }
        if self.transaction_scroll > self.transaction_index {
            self.transaction_scroll = self.transaction_index;
        }
        Ok(())
    }

    /// Refresh after an action, turning a failure into a status message.
    /// Returns whether the refresh succeeded.
    pub(crate) fn reload(&mut self, db: &Database) -> bool {
        match self.refresh(db) {
            Ok(()) => true,
            Err(e) => {
                self.report_error("refresh", &e);
                false
            }
        }
    }

    pub(crate) fn selected_transaction(&self) -> Option<&Transaction> {
        self.transactions.get(self.transaction_index)
    }

    // ── Actions ───────────────────────────────────────────────

    pub(crate) fn add_transaction(&mut self, db: &Database) {
        let outcome = self
            .form
            .draft(self.variant)
            .map_err(Error::from)
            .and_then(|draft| db.insert_transaction(&draft));

        match outcome {
            Ok(txn) => {
                tracing::info!(id = txn.id, "added transaction");
                self.form.clear();
                self.set_status(format!("Added transaction #{}", txn.id));
                self.reload(db);
                self.select_id(txn.id);
            }
            Err(e) => self.report_error("add", &e),
        }
    }

    pub(crate) fn update_transaction(&mut self, db: &Database) {
        let outcome = self
            .form
            .target_id()
            .and_then(|id| Ok((id, self.form.draft(self.variant)?)))
            .map_err(Error::from)
            .and_then(|(id, draft)| {
                if self.variant.has_description() {
                    db.update_transaction(id, &draft)
                } else {
                    db.update_transaction_keep_description(id, &draft)
                }
            });

        match outcome {
            Ok(txn) => {
                tracing::info!(id = txn.id, "updated transaction");
                self.set_status(format!("Updated transaction #{}", txn.id));
                self.reload(db);
                self.select_id(txn.id);
            }
            Err(e) => {
                self.report_error("update", &e);
                self.reload(db);
            }
        }
    }

    /// Ask for confirmation before deleting the transaction named by `raw_id`,
    /// or by the form's ID field when `raw_id` is empty.
    pub(crate) fn request_delete(&mut self, raw_id: &str) {
        let raw = if raw_id.trim().is_empty() {
            self.form.id.clone()
        } else {
            raw_id.to_string()
        };
        match parse_id(&raw) {
            Ok(id) => {
                let label = self
                    .transactions
                    .iter()
                    .find(|t| t.id == id)
                    .map(|t| format!("Delete '{t}'?"))
                    .unwrap_or_else(|| format!("Delete transaction #{id}?"));
                self.confirm_message = label;
                self.pending_action = Some(PendingAction::DeleteTransaction { id });
                self.input_mode = InputMode::Confirm;
            }
            Err(e) => self.report_error("delete", &e.into()),
        }
    }

    pub(crate) fn confirm_pending(&mut self, db: &Database) {
        self.input_mode = InputMode::Normal;
        self.confirm_message.clear();
        if let Some(PendingAction::DeleteTransaction { id }) = self.pending_action.take() {
            self.delete_transaction(db, id);
        }
    }

    pub(crate) fn cancel_pending(&mut self) {
        self.input_mode = InputMode::Normal;
        self.confirm_message.clear();
        self.pending_action = None;
        self.set_status("Cancelled");
    }

    fn delete_transaction(&mut self, db: &Database, id: i64) {
        match db.delete_transaction(id) {
            Ok(()) => {
                tracing::info!(id, "deleted transaction");
                if self.form.id.trim() == id.to_string() {
                    self.form.id.clear();
                }
                self.set_status(format!("Deleted transaction #{id}"));
            }
            Err(e) => self.report_error("delete", &e),
        }
        self.reload(db);
    }

    /// Copy a stored transaction into the form so it can be edited.
    pub(crate) fn load_transaction(&mut self, db: &Database, raw_id: &str) {
        let outcome = parse_id(raw_id)
            .map_err(Error::from)
            .and_then(|id| db.get_transaction(id)?.ok_or(Error::NotFound(id)));
        match outcome {
            Ok(txn) => {
                self.form.load(&txn);
                self.select_id(txn.id);
                self.set_status(format!("Loaded transaction #{}", txn.id));
            }
            Err(e) => self.report_error("load", &e),
        }
    }

    pub(crate) fn load_selected(&mut self) {
        if let Some(txn) = self.selected_transaction().cloned() {
            self.form.load(&txn);
            self.set_status(format!("Loaded transaction #{}", txn.id));
        }
    }

    pub(crate) fn toggle_chart(&mut self) {
        if self.variant.has_chart() {
            self.show_chart = !self.show_chart;
        } else {
            self.set_error("The chart is not available in the basic variant");
        }
    }

    // ── Form focus ────────────────────────────────────────────

    pub(crate) fn focus_next(&mut self) {
        let fields = Field::all(self.variant);
        let idx = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(idx + 1) % fields.len()];
    }

    pub(crate) fn focus_prev(&mut self) {
        let fields = Field::all(self.variant);
        let idx = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = if idx == 0 {
            fields[fields.len() - 1]
        } else {
            fields[idx - 1]
        };
    }

    fn select_id(&mut self, id: i64) {
        if let Some(pos) = self.transactions.iter().position(|t| t.id == id) {
            self.transaction_index = pos;
            if pos < self.transaction_scroll {
                self.transaction_scroll = pos;
            } else if pos >= self.transaction_scroll + self.visible_rows {
                self.transaction_scroll = pos + 1 - self.visible_rows.max(1);
            }
        }
    }

    // ── Status line ───────────────────────────────────────────

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
        self.status_kind = StatusKind::Info;
    }

    pub(crate) fn set_error(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
        self.status_kind = StatusKind::Error;
    }

    fn report_error(&mut self, action: &str, err: &Error) {
        match err {
            Error::Validation(e) => {
                tracing::debug!("{action} rejected: {e}");
                self.set_error(format!("Invalid input: {e}"));
            }
            Error::NotFound(id) => {
                tracing::warn!("{action}: transaction {id} not found");
                self.set_error(format!("Transaction #{id} does not exist"));
            }
            Error::Storage(e) => {
                tracing::warn!("{action} failed: {e}");
                self.set_error(format!("Could not {action}: {e}. Try again"));
            }
        }
    }
}
