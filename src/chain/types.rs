//! Chain-specific error definitions.

use thiserror::Error;

/// Errors that can occur during chain operations.
#[derive(Debug, Error)]
pub enum ChainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Transaction receipt did not appear within the configured window.
    #[error("no receipt after {0} seconds")]
    ReceiptTimeout(u64),

    /// Transaction was mined but its receipt reports failure.
    #[error("transaction reverted: {0}")]
    Reverted(String),

    /// Account creation or unlock failed on the node.
    #[error("account error: {0}")]
    Account(String),

    /// Contract return data could not be decoded.
    #[error("ABI decode error: {0}")]
    Abi(String),

    /// Chain configuration mismatch.
    #[error("chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },
}

/// Result type for chain operations.
pub type ChainResult<T> = Result<T, ChainError>;
