//! Node-managed account operations behind a mockable trait.

use alloy::primitives::Address;
use async_trait::async_trait;

use crate::chain::client::ChainClient;
use crate::chain::types::ChainResult;

/// The node's managed-account capabilities used by the portal.
///
/// Implemented by `ChainClient` over the geth `personal` namespace; tests
/// substitute a mock to observe (or forbid) node calls.
#[async_trait]
pub trait NodeAccounts: Send + Sync {
    /// Generate a new managed keypair protected by `password`.
    async fn create_account(&self, password: &str) -> ChainResult<Address>;

    /// Temporarily authorize signing with the keypair behind `address`.
    async fn unlock(&self, address: Address, password: &str) -> ChainResult<bool>;
}

#[async_trait]
impl NodeAccounts for ChainClient {
    async fn create_account(&self, password: &str) -> ChainResult<Address> {
        self.new_account(password).await
    }

    async fn unlock(&self, address: Address, password: &str) -> ChainResult<bool> {
        self.unlock_account(address, password).await
    }
}
