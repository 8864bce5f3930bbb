//! Chain integration subsystem.
//!
//! # Data Flow
//! ```text
//! PortalConfig (RPC URL, contract address)
//!     → client.rs (RPC connection with timeouts, personal_* namespace)
//!     → contract.rs (encode, submit, poll receipt, decode)
//!     → accounts.rs (managed-account trait over the client)
//! ```
//!
//! # Security Constraints
//! - Passwords pass through to the node and are never logged or stored
//! - All RPC calls have configurable timeouts
//! - Graceful degradation when the node is unreachable

pub mod accounts;
pub mod client;
pub mod contract;
pub mod types;

pub use accounts::NodeAccounts;
pub use client::ChainClient;
pub use contract::{AgencyContract, MarketContract};
pub use types::{ChainError, ChainResult};
