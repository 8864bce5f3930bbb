//! Estate Portal Library
//!
//! A web front-end for a real-estate marketplace smart contract, built with
//! Tokio and Axum. All business logic (escrow, ownership transfer, balance
//! accounting) lives in the contract; this crate is the glue between HTML
//! forms and the node's JSON-RPC endpoint.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌────────────────────────────────────────────────┐
//!                    │                 ESTATE PORTAL                   │
//!                    │                                                 │
//!   Browser request  │  ┌────────┐   ┌──────────┐   ┌──────────────┐  │
//!   ─────────────────┼─▶│  http  │──▶│  market  │──▶│    chain     │──┼──▶ Node RPC
//!                    │  │ routes │   │ actions  │   │ client +     │  │    (contract)
//!                    │  └────────┘   └──────────┘   │ contract     │  │
//!   Rendered page    │  ┌────────┐                  └──────────────┘  │
//!   ◀────────────────┼──│ flash  │                                    │
//!                    │  │ +pages │   ┌──────────┐   ┌──────────────┐  │
//!                    │  └────────┘   │ security │   │    config    │  │
//!                    │               │ password │   │  TOML + CLI  │  │
//!                    │               └──────────┘   └──────────────┘  │
//!                    └────────────────────────────────────────────────┘
//! ```

pub mod chain;
pub mod config;
pub mod http;
pub mod market;
pub mod security;

pub use config::PortalConfig;
pub use http::{AppState, HttpServer};
