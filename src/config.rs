use anyhow::{Context, Result};
use std::path::PathBuf;

const DB_ENV: &str = "BUDGETPLAN_DB";

/// Where the database and log file live.
#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub(crate) db_path: PathBuf,
    pub(crate) log_path: PathBuf,
}

impl Config {
    /// Resolve paths, consuming a global `--db <path>` flag from `args` if
    /// present. Precedence: flag, then `BUDGETPLAN_DB`, then the platform
    /// data directory.
    pub(crate) fn resolve(args: &mut Vec<String>) -> Result<Self> {
        let data_dir = data_dir()?;
        let db_path = match take_flag(args, "--db") {
            Some(path) => PathBuf::from(crate::run::shellexpand(&path)),
            None => match std::env::var(DB_ENV) {
                Ok(path) if !path.is_empty() => PathBuf::from(crate::run::shellexpand(&path)),
                _ => data_dir.join("budgetplan.db"),
            },
        };
        Ok(Self {
            db_path,
            log_path: data_dir.join("budgetplan.log"),
        })
    }
}

fn data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "budgetplan", "BudgetPlan")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.to_path_buf())
}

/// Remove `flag <value>` from `args` and return the value.
pub(crate) fn take_flag(args: &mut Vec<String>, flag: &str) -> Option<String> {
    let pos = args.iter().position(|a| a == flag)?;
    if pos + 1 >= args.len() {
        args.remove(pos);
        return None;
    }
    let value = args.remove(pos + 1);
    args.remove(pos);
    Some(value)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_take_flag_removes_pair() {
        let mut a = args(&["budgetplan", "--db", "/tmp/x.db", "months"]);
        assert_eq!(take_flag(&mut a, "--db").unwrap(), "/tmp/x.db");
        assert_eq!(a, args(&["budgetplan", "months"]));
    }

    #[test]
    fn test_take_flag_absent() {
        let mut a = args(&["budgetplan", "months"]);
        assert!(take_flag(&mut a, "--db").is_none());
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn test_take_flag_missing_value() {
        let mut a = args(&["budgetplan", "--db"]);
        assert!(take_flag(&mut a, "--db").is_none());
        assert_eq!(a, args(&["budgetplan"]));
    }
}
