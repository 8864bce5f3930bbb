//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the RPC URL and contract address actually parse
//! - Validate value ranges (timeouts > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: PortalConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::str::FromStr;

use alloy::primitives::Address;

use crate::config::schema::PortalConfig;

/// A single semantic violation found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field (e.g. "chain.rpc_url").
    pub field: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn err(field: &str, message: impl Into<String>) -> ValidationError {
    ValidationError {
        field: field.to_string(),
        message: message.into(),
    }
}

/// Validate a configuration, collecting every violation.
pub fn validate_config(config: &PortalConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = config.chain.rpc_url.parse::<url::Url>() {
        errors.push(err("chain.rpc_url", format!("not a valid URL: {}", e)));
    }

    if config.chain.rpc_timeout_secs == 0 {
        errors.push(err("chain.rpc_timeout_secs", "must be greater than zero"));
    }
    if config.chain.receipt_poll_ms == 0 {
        errors.push(err("chain.receipt_poll_ms", "must be greater than zero"));
    }
    if config.chain.receipt_timeout_secs == 0 {
        errors.push(err("chain.receipt_timeout_secs", "must be greater than zero"));
    }
    if config.http.request_timeout_secs == 0 {
        errors.push(err("http.request_timeout_secs", "must be greater than zero"));
    }

    // An empty contract address is allowed at load time so the portal can
    // start against defaults; a non-empty one must parse.
    if !config.contract.address.is_empty() {
        if let Err(e) = Address::from_str(&config.contract.address) {
            errors.push(err("contract.address", format!("not a valid address: {}", e)));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
