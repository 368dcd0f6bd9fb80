mod transaction;

pub(crate) use transaction::{amount_in_range, parse_id, Transaction, TransactionDraft, MAX_AMOUNT};
