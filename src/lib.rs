//! Payroll engine for monthly salaried staff.
//!
//! This crate turns an employee's attendance for a month into a salary slip:
//! it counts present days, pays the weekly off days when attendance reaches the
//! configured threshold, prorates the monthly salary, and recovers outstanding
//! salary advances oldest-first out of the gross.
//!
//! The calculation itself is pure ([`calculation::calculate_payroll`]);
//! [`service::PayrollService`] reads its inputs from a [`store::PayrollStore`]
//! and commits the slip together with the advance ledger update.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod service;
pub mod store;
