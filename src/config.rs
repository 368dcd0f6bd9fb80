use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const DB_FILE: &str = "fintrack.db";
const LOG_FILE: &str = "fintrack.log";

/// Which fields and views the app shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Variant {
    /// Category, amount, date and description, plus the category chart.
    Extended,
    /// Category, amount and date only. No chart.
    Basic,
}

impl Variant {
    pub(crate) fn has_description(self) -> bool {
        self == Self::Extended
    }

    pub(crate) fn has_chart(self) -> bool {
        self == Self::Extended
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub(crate) db_path: PathBuf,
    pub(crate) log_path: PathBuf,
    pub(crate) variant: Variant,
}

impl Config {
    /// Pull the global flags out of `args` and resolve paths.
    ///
    /// Returns the config and the remaining arguments (program name first),
    /// ready for command dispatch.
    pub(crate) fn from_args(args: &[String]) -> Result<(Self, Vec<String>)> {
        let (db_flag, variant, rest) = split_flags(args)?;
        let db_path = match db_flag {
            Some(path) => PathBuf::from(crate::export::expand_home(&path)),
            None => default_data_dir()?.join(DB_FILE),
        };
        Ok((Self::with_db_path(db_path, variant), rest))
    }

    pub(crate) fn with_db_path(db_path: PathBuf, variant: Variant) -> Self {
        let log_path = db_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."))
            .join(LOG_FILE);
        Self {
            db_path,
            log_path,
            variant,
        }
    }
}

type SplitArgs = (Option<String>, Variant, Vec<String>);

fn split_flags(args: &[String]) -> Result<SplitArgs> {
    let mut db_path = None;
    let mut variant = Variant::Extended;
    let mut rest = Vec::with_capacity(args.len());

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--db" => {
                let path = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--db requires a path"))?;
                db_path = Some(path.clone());
            }
            "--basic" => variant = Variant::Basic,
            _ => rest.push(arg.clone()),
        }
    }

    Ok((db_path, variant, rest))
}

fn default_data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "fintrack", "fintrack")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.to_path_buf())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_db_flag_and_log_path() {
        let (config, rest) =
            Config::from_args(&args(&["fintrack", "--db", "/tmp/f/my.db", "list"])).unwrap();
        assert_eq!(config.db_path, PathBuf::from("/tmp/f/my.db"));
        assert_eq!(config.log_path, PathBuf::from("/tmp/f/fintrack.log"));
        assert_eq!(config.variant, Variant::Extended);
        assert_eq!(rest, args(&["fintrack", "list"]));
    }

    #[test]
    fn test_basic_flag_anywhere() {
        let (config, rest) = Config::from_args(&args(&[
            "fintrack", "add", "Food", "--basic", "-5", "2024-01-01", "--db", "x.db",
        ]))
        .unwrap();
        assert_eq!(config.variant, Variant::Basic);
        assert_eq!(rest, args(&["fintrack", "add", "Food", "-5", "2024-01-01"]));
    }

    #[test]
    fn test_bare_file_name_logs_to_current_dir() {
        let config = Config::with_db_path(PathBuf::from("finance.db"), Variant::Extended);
        assert_eq!(config.log_path, PathBuf::from("./fintrack.log"));
    }

    #[test]
    fn test_db_flag_missing_value() {
        assert!(Config::from_args(&args(&["fintrack", "--db"])).is_err());
    }

    #[test]
    fn test_variant_features() {
        assert!(Variant::Extended.has_description());
        assert!(Variant::Extended.has_chart());
        assert!(!Variant::Basic.has_description());
        assert!(!Variant::Basic.has_chart());
    }
}
