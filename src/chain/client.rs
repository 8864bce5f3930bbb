//! Node RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to the node's JSON-RPC endpoint
//! - Query chain state (chain id, block number)
//! - Drive the node's managed-account namespace (create, unlock)
//! - Handle timeouts and network errors gracefully
//! - Provide health check for node connectivity

use alloy::primitives::Address;
use alloy::providers::{Provider, ProviderBuilder};
use alloy::transports::TransportResult;
use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::chain::types::{ChainError, ChainResult};
use crate::config::schema::ChainConfig;

/// Node RPC client wrapper.
///
/// One instance is constructed at startup and shared by every handler;
/// cloning is cheap (the provider lives behind an `Arc`).
#[derive(Clone)]
pub struct ChainClient {
    /// The underlying HTTP provider.
    provider: Arc<dyn Provider + Send + Sync>,
    /// Configuration.
    config: ChainConfig,
    /// Request timeout duration.
    timeout_duration: Duration,
}

impl ChainClient {
    /// Create a new chain client.
    ///
    /// Verifies the node's chain ID against configuration, but a failed
    /// verification only logs a warning; the node may come up later.
    pub async fn new(config: ChainConfig) -> ChainResult<Self> {
        let timeout_duration = Duration::from_secs(config.rpc_timeout_secs);

        let rpc_url: url::Url = config
            .rpc_url
            .parse()
            .map_err(|e| ChainError::Rpc(format!("Invalid RPC URL '{}': {}", config.rpc_url, e)))?;
        let provider = Arc::new(ProviderBuilder::new().connect_http(rpc_url))
            as Arc<dyn Provider + Send + Sync>;

        let client = Self {
            provider,
            config: config.clone(),
            timeout_duration,
        };

        match client.verify_chain_id().await {
            Ok(()) => {
                tracing::info!(
                    rpc_url = %config.rpc_url,
                    chain_id = config.chain_id,
                    "Chain client initialized"
                );
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Chain client initialized but chain verification failed"
                );
            }
        }

        Ok(client)
    }

    /// Await an RPC future under the configured timeout.
    pub(crate) async fn with_timeout<T, F>(&self, fut: F) -> ChainResult<T>
    where
        F: IntoFuture<Output = TransportResult<T>>,
    {
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(ChainError::Rpc(e.to_string())),
            Err(_) => Err(ChainError::Timeout(self.config.rpc_timeout_secs)),
        }
    }

    /// Verify the connected chain ID matches configuration.
    pub async fn verify_chain_id(&self) -> ChainResult<()> {
        let chain_id = self.get_chain_id().await?;
        if chain_id != self.config.chain_id {
            return Err(ChainError::ChainMismatch {
                expected: self.config.chain_id,
                actual: chain_id,
            });
        }
        Ok(())
    }

    /// Get the chain ID from the RPC.
    pub async fn get_chain_id(&self) -> ChainResult<u64> {
        self.with_timeout(self.provider.get_chain_id()).await
    }

    /// Get the latest block number.
    pub async fn get_block_number(&self) -> ChainResult<u64> {
        self.with_timeout(self.provider.get_block_number()).await
    }

    /// Ask the node to generate a new managed keypair protected by `password`.
    ///
    /// Uses the geth `personal` namespace; the key never leaves the node.
    pub async fn new_account(&self, password: &str) -> ChainResult<Address> {
        let client = self.provider.client();
        let fut = client.request("personal_newAccount", (password.to_string(),));
        self.with_timeout(fut)
            .await
            .map_err(|e| ChainError::Account(e.to_string()))
    }

    /// Ask the node to unlock a managed account for the configured duration.
    ///
    /// Wrong password, unknown address and transport failure all surface as
    /// the same `ChainError::Account`; the node does not distinguish them
    /// usefully either.
    pub async fn unlock_account(&self, address: Address, password: &str) -> ChainResult<bool> {
        let client = self.provider.client();
        let fut = client.request(
            "personal_unlockAccount",
            (address, password.to_string(), self.config.unlock_duration_secs),
        );
        self.with_timeout(fut)
            .await
            .map_err(|e| ChainError::Account(e.to_string()))
    }

    /// Check if the node is reachable and healthy.
    ///
    /// Returns true if we can query the block number.
    pub async fn is_healthy(&self) -> bool {
        self.get_block_number().await.is_ok()
    }

    /// Get the underlying provider.
    pub fn provider(&self) -> &(dyn Provider + Send + Sync) {
        self.provider.as_ref()
    }

    /// Get the configuration.
    pub fn config(&self) -> &ChainConfig {
        &self.config
    }
}

impl std::fmt::Debug for ChainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainClient")
            .field("rpc_url", &self.config.rpc_url)
            .field("chain_id", &self.config.chain_id)
            .field("timeout_secs", &self.config.rpc_timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> ChainConfig {
        ChainConfig {
            rpc_url: "http://localhost:8545".to_string(),
            chain_id: 1337,
            rpc_timeout_secs: 5,
            receipt_poll_ms: 100,
            receipt_timeout_secs: 5,
            unlock_duration_secs: 60,
        }
    }

    #[tokio::test]
    async fn client_creation_without_node() {
        // Creation must succeed even if no node is listening.
        let result = ChainClient::new(test_config()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn invalid_rpc_url_rejected() {
        let mut config = test_config();
        config.rpc_url = "not a url".to_string();
        let result = ChainClient::new(config).await;
        assert!(matches!(result, Err(ChainError::Rpc(_))));
    }
}
