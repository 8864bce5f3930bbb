//! Marketplace domain: account lifecycle and contract actions.
//!
//! # Data Flow
//! ```text
//! Route handler (typed form values)
//!     → accounts.rs (register / authorize via the node)
//!     → actions.rs (the nine contract operations)
//!     → chain::contract (encode, submit, await receipt)
//!     → structured ActionResult back to the handler
//! ```

pub mod accounts;
pub mod actions;
pub mod types;

pub use accounts::AccountService;
pub use actions::MarketService;
pub use types::{ActionError, ActionResult, Ad, AdStatus, Estate, EstateKind};
