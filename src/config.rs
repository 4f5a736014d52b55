use std::env;
use std::str::FromStr;

use crate::blockchain::DEFAULT_DIFFICULTY;
use crate::error::{LedgerError, Result};

/// How the chain is printed once mining is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(()),
        }
    }
}

/// Runtime settings for the demo binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub difficulty: u32,
    pub miner_threads: usize,
    pub output: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            difficulty: DEFAULT_DIFFICULTY,
            miner_threads: 1,
            output: OutputFormat::Text,
        }
    }
}

impl Config {
    /// Read `LEDGER_*` variables from the process environment (after `.env` is loaded).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            difficulty: parse_or(&lookup, "LEDGER_DIFFICULTY", defaults.difficulty)?,
            miner_threads: parse_or(&lookup, "LEDGER_MINER_THREADS", defaults.miner_threads)?,
            output: parse_or(&lookup, "LEDGER_OUTPUT", defaults.output)?,
        })
    }
}

fn parse_or<T, F>(lookup: &F, key: &'static str, default: T) -> Result<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| LedgerError::Config { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, OutputFormat};
    use crate::error::LedgerError;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.difficulty, 4);
        assert_eq!(cfg.miner_threads, 1);
        assert_eq!(cfg.output, OutputFormat::Text);
    }

    #[test]
    fn reads_all_keys() {
        let cfg = Config::from_lookup(lookup(&[
            ("LEDGER_DIFFICULTY", "2"),
            ("LEDGER_MINER_THREADS", " 8 "),
            ("LEDGER_OUTPUT", "JSON"),
        ]))
        .unwrap();
        assert_eq!(cfg.difficulty, 2);
        assert_eq!(cfg.miner_threads, 8);
        assert_eq!(cfg.output, OutputFormat::Json);
    }

    #[test]
    fn rejects_bad_values() {
        let err = Config::from_lookup(lookup(&[("LEDGER_DIFFICULTY", "-1")])).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Config { key: "LEDGER_DIFFICULTY", ref value } if value == "-1"
        ));

        let err = Config::from_lookup(lookup(&[("LEDGER_OUTPUT", "yaml")])).unwrap_err();
        assert!(matches!(err, LedgerError::Config { key: "LEDGER_OUTPUT", .. }));
    }
}
