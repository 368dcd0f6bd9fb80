pub(crate) const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS transactions (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    category    TEXT NOT NULL,
    amount      TEXT NOT NULL,
    date        TEXT NOT NULL,
    description TEXT
);
"#;
