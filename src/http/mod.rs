//! HTTP layer.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, state)
//!     → handlers.rs (coerce inputs, invoke services, map results)
//!     → flash.rs (session-scoped transient notices)
//!     → pages.rs (minimal HTML shells)
//!     → Send to client
//! ```

pub mod flash;
pub mod handlers;
pub mod pages;
pub mod server;

pub use flash::{FlashStore, Notice, Session, Severity};
pub use server::{build_router, AppState, HttpServer};
