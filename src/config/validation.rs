//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check provider options are selectable and reachable by name
//! - Validate value ranges and address formats
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use alloy::primitives::Address;
use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::connector::INJECTED_PROVIDER;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut names = HashSet::new();

    for (i, option) in config.wallet.providers.iter().enumerate() {
        let field = |name: &str| format!("wallet.providers[{i}].{name}");

        if option.name.trim().is_empty() {
            errors.push(ValidationError::new(field("name"), "must not be empty"));
        } else if option.name == INJECTED_PROVIDER && !config.wallet.disable_injected_provider {
            errors.push(ValidationError::new(
                field("name"),
                "'injected' is reserved while the injected provider is enabled",
            ));
        } else if !names.insert(option.name.as_str()) {
            errors.push(ValidationError::new(
                field("name"),
                format!("duplicate provider name '{}'", option.name),
            ));
        }

        if let Err(e) = option.rpc_url.parse::<url::Url>() {
            errors.push(ValidationError::new(
                field("rpc_url"),
                format!("invalid URL '{}': {}", option.rpc_url, e),
            ));
        }

        if option.private_key_env.trim().is_empty() {
            errors.push(ValidationError::new(field("private_key_env"), "must not be empty"));
        }

        if option.poll_interval_ms == 0 {
            errors.push(ValidationError::new(field("poll_interval_ms"), "must be greater than 0"));
        }
    }

    if config.blockchain.rpc_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "blockchain.rpc_timeout_secs",
            "must be greater than 0",
        ));
    }

    if let Err(e) = config.blockchain.contract_address.parse::<Address>() {
        errors.push(ValidationError::new(
            "blockchain.contract_address",
            format!("invalid address '{}': {}", config.blockchain.contract_address, e),
        ));
    }

    if config.ui.test_network.trim().is_empty() {
        errors.push(ValidationError::new("ui.test_network", "must not be empty"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
