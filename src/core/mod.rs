//! Core library components.
//!
//! This module contains the reusable engine: the authorize file format,
//! credential issuance, and the record store that ties them together.

pub mod config;
pub mod constants;
pub mod credentials;
pub mod domain;
pub mod format;
pub mod mask;
pub mod store;
pub mod validation;
