//! Marketplace domain types.
//!
//! All durable state lives in the contract; these are the read-only shapes
//! it returns, plus the error kinds the HTTP layer maps to responses.

use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chain::types::ChainError;

/// Kind of property, stored on-chain as a `u8` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstateKind {
    House,
    Apartment,
    Attic,
}

impl EstateKind {
    /// The code the contract stores.
    pub fn code(self) -> u8 {
        match self {
            EstateKind::House => 0,
            EstateKind::Apartment => 1,
            EstateKind::Attic => 2,
        }
    }

    /// Decode a stored code; unknown codes fall back to `House`.
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => EstateKind::Apartment,
            2 => EstateKind::Attic,
            _ => EstateKind::House,
        }
    }

    /// Parse the label submitted by the estate form. Unknown labels fall
    /// back to `House`, matching the original application.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Квартира" => EstateKind::Apartment,
            "Мансарда" => EstateKind::Attic,
            _ => EstateKind::House,
        }
    }

    /// Label shown in views.
    pub fn label(self) -> &'static str {
        match self {
            EstateKind::House => "Дом",
            EstateKind::Apartment => "Квартира",
            EstateKind::Attic => "Мансарда",
        }
    }
}

/// Lifecycle of a sale ad, stored on-chain as a `u8` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdStatus {
    Opened,
    Closed,
}

impl AdStatus {
    pub fn code(self) -> u8 {
        match self {
            AdStatus::Opened => 0,
            AdStatus::Closed => 1,
        }
    }

    pub fn from_code(code: u8) -> Self {
        match code {
            1 => AdStatus::Closed,
            _ => AdStatus::Opened,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AdStatus::Opened => "Открыто",
            AdStatus::Closed => "Закрыто",
        }
    }
}

/// A property as the contract reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Estate {
    pub size: U256,
    pub photo: String,
    pub rooms: U256,
    pub kind: EstateKind,
    pub active: bool,
    pub owner: Address,
}

/// A sale ad as the contract reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ad {
    pub estate_id: U256,
    pub price: U256,
    pub status: AdStatus,
    pub owner: Address,
}

/// Failure kinds of a portal action.
///
/// The HTTP layer chooses the response per kind: validation and chain
/// failures become a notice plus the usual redirect, conversion faults get a
/// 400 of their own.
#[derive(Debug, Error)]
pub enum ActionError {
    /// Input rejected by a local policy (e.g. weak password).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A form field or URL parameter could not be converted.
    #[error("invalid input: {0}")]
    Conversion(String),

    /// The node or the contract rejected the operation.
    #[error(transparent)]
    Chain(#[from] ChainError),
}

/// Result type for portal actions.
pub type ActionResult<T> = Result<T, ActionError>;
