//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! settings and per-employee salary overrides from YAML files.

use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{EmployeeRate, PayrollSettings, RatesConfig, RawPayrollSettings};

/// Loads and provides access to payroll configuration.
///
/// # Directory Structure
///
/// ```text
/// config/plant/
/// ├── settings.yaml   # PayrollSettings (required)
/// └── rates.yaml      # Per-employee monthly salary overrides (optional)
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/plant")?;
/// let salary = loader.monthly_salary_for("emp_001");
/// println!("Monthly salary: {}", salary);
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    settings: PayrollSettings,
    rates: HashMap<String, Decimal>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `settings.yaml` is absent (`MissingSettings`)
    /// - a file contains invalid YAML or misses a field (`ConfigParseError`)
    /// - the weekly-off day is not a weekday name (`InvalidCalendarInput`)
    /// - a salary is negative (`NegativeInputRejected`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings_path = path.join("settings.yaml");
        if !settings_path.exists() {
            return Err(EngineError::MissingSettings {
                source_path: settings_path.display().to_string(),
            });
        }
        let raw = Self::load_yaml::<RawPayrollSettings>(&settings_path)?;
        let settings = PayrollSettings::try_from(raw)?;

        let rates_path = path.join("rates.yaml");
        let rates = if rates_path.exists() {
            Self::load_yaml::<RatesConfig>(&rates_path)?.rates
        } else {
            Vec::new()
        };

        Self::from_parts(settings, rates)
    }

    /// Builds a loader from settings and rates held in memory.
    pub fn from_parts(settings: PayrollSettings, rates: Vec<EmployeeRate>) -> EngineResult<Self> {
        let mut by_employee = HashMap::with_capacity(rates.len());
        for rate in rates {
            EngineError::reject_negative("monthly_salary", rate.monthly_salary)?;
            by_employee.insert(rate.employee_id, rate.monthly_salary);
        }
        Ok(Self {
            settings,
            rates: by_employee,
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

    /// Returns the payroll settings.
    pub fn settings(&self) -> &PayrollSettings {
        &self.settings
    }

    /// Returns the salary override for an employee, if one exists.
    pub fn employee_rate(&self, employee_id: &str) -> Option<Decimal> {
        self.rates.get(employee_id).copied()
    }

    /// Returns every configured override.
    pub fn employee_rates(&self) -> impl Iterator<Item = EmployeeRate> + '_ {
        self.rates.iter().map(|(employee_id, monthly_salary)| EmployeeRate {
            employee_id: employee_id.clone(),
            monthly_salary: *monthly_salary,
        })
    }

    /// Returns the override for an employee, or the default monthly salary.
    pub fn monthly_salary_for(&self, employee_id: &str) -> Decimal {
        self.employee_rate(employee_id)
            .unwrap_or(self.settings.default_monthly_salary)
    }
}
