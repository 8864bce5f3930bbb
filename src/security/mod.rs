//! Local security policies.
//!
//! The portal holds no keys and issues no sessions; the only policy enforced
//! here is password strength for new node-managed accounts.

pub mod password;

pub use password::is_strong_password;
