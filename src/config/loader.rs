//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading statutory
//! rate tables from YAML files.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{RateTable, SchemeConfig, SchemeMetadata};

/// Loads and provides access to the statutory scheme configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory and
/// provides date-keyed access to the rate tables.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/kr2025/
/// ├── scheme.yaml          # Scheme metadata
/// └── rates/
///     ├── 2025-01-01.yaml  # Rates effective from this date
///     └── 2025-07-01.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/kr2025").unwrap();
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
/// let rates = loader.rates_for(date).unwrap();
/// println!("Pension rate: {}", rates.insurance.national_pension.employee_rate);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: SchemeConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/kr2025")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any required field is missing from the configuration
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let scheme_path = path.join("scheme.yaml");
        let metadata = Self::load_yaml::<SchemeMetadata>(&scheme_path)?;

        let rates_dir = path.join("rates");
        let rate_tables = Self::load_rate_tables(&rates_dir)?;

        Ok(Self {
            config: SchemeConfig::new(metadata, rate_tables),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all rate tables from the rates directory.
    fn load_rate_tables(rates_dir: &Path) -> EngineResult<Vec<RateTable>> {
        let rates_dir_str = rates_dir.display().to_string();

        if !rates_dir.exists() {
            return Err(EngineError::ConfigNotFound {
                path: rates_dir_str,
            });
        }

        let entries = fs::read_dir(rates_dir).map_err(|_| EngineError::ConfigNotFound {
            path: rates_dir_str.clone(),
        })?;

        let mut tables = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: rates_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let table = Self::load_yaml::<RateTable>(&path)?;
                tables.push(table);
            }
        }

        if tables.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rate files found)", rates_dir_str),
            });
        }

        Ok(tables)
    }

    /// Returns the underlying scheme configuration.
    pub fn config(&self) -> &SchemeConfig {
        &self.config
    }

    /// Returns the scheme metadata.
    pub fn scheme(&self) -> &SchemeMetadata {
        self.config.scheme()
    }

    /// Returns the rate table effective on the given date.
    ///
    /// The method finds the most recent rate table with an effective date on
    /// or before the given date.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::RatesNotFound`] when every table takes effect
    /// after `date`.
    pub fn rates_for(&self, date: NaiveDate) -> EngineResult<&RateTable> {
        self.config
            .rate_tables()
            .iter()
            .rev()
            .find(|table| table.effective_date <= date)
            .ok_or(EngineError::RatesNotFound { date })
    }

    /// Returns the most recent rate table.
    pub fn latest(&self) -> &RateTable {
        // SchemeConfig::new sorts the tables and load() rejects an empty set.
        self.config
            .rate_tables()
            .last()
            .expect("configuration always holds at least one rate table")
    }
}
