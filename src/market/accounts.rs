//! Account registration and authorization over node-managed keypairs.

use alloy::primitives::Address;
use std::sync::Arc;

use crate::chain::accounts::NodeAccounts;
use crate::chain::types::ChainError;
use crate::market::types::{ActionError, ActionResult};
use crate::security::is_strong_password;

/// Creates and unlocks node-managed accounts.
///
/// The portal never stores credentials: the address returned by `register`
/// is only surfaced to the user once, and `authorize` proves nothing beyond
/// the node unlocking the key at that moment.
#[derive(Clone)]
pub struct AccountService {
    node: Arc<dyn NodeAccounts>,
}

impl AccountService {
    pub fn new(node: Arc<dyn NodeAccounts>) -> Self {
        Self { node }
    }

    /// Create a new managed keypair protected by `password`.
    ///
    /// A weak password is rejected before any node call is made.
    pub async fn register(&self, password: &str) -> ActionResult<Address> {
        if !is_strong_password(password) {
            return Err(ActionError::Validation(
                "password does not meet the strength policy".to_string(),
            ));
        }

        let address = self.node.create_account(password).await?;
        tracing::info!(address = %address, "Account created");
        Ok(address)
    }

    /// Unlock the managed keypair behind `address` with `password`.
    ///
    /// Wrong password, unknown address and RPC failure all collapse into the
    /// same error; callers cannot and should not distinguish them.
    pub async fn authorize(&self, address: Address, password: &str) -> ActionResult<()> {
        let unlocked = self.node.unlock(address, password).await?;
        if !unlocked {
            return Err(ActionError::Chain(ChainError::Account(
                "node refused to unlock the account".to_string(),
            )));
        }
        tracing::debug!(address = %address, "Account unlocked");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::types::ChainResult;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Mock node that counts calls and can be told to fail.
    struct MockNode {
        create_calls: AtomicU32,
        unlock_calls: AtomicU32,
        fail: bool,
    }

    impl MockNode {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                create_calls: AtomicU32::new(0),
                unlock_calls: AtomicU32::new(0),
                fail,
            })
        }
    }

    #[async_trait]
    impl NodeAccounts for MockNode {
        async fn create_account(&self, _password: &str) -> ChainResult<Address> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(ChainError::Rpc("node unreachable".to_string()))
            } else {
                Ok(Address::ZERO)
            }
        }

        async fn unlock(&self, _address: Address, password: &str) -> ChainResult<bool> {
            self.unlock_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(ChainError::Account("could not decrypt key".to_string()))
            } else {
                Ok(password == "correct")
            }
        }
    }

    #[tokio::test]
    async fn weak_password_never_reaches_the_node() {
        let node = MockNode::new(false);
        let service = AccountService::new(node.clone());

        let result = service.register("weak").await;
        assert!(matches!(result, Err(ActionError::Validation(_))));
        assert_eq!(node.create_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn strong_password_creates_account() {
        let node = MockNode::new(false);
        let service = AccountService::new(node.clone());

        let address = service.register("Abcdef1!2345").await.unwrap();
        assert_eq!(address, Address::ZERO);
        assert_eq!(node.create_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn node_failure_surfaces_as_chain_error() {
        let node = MockNode::new(true);
        let service = AccountService::new(node);

        let result = service.register("Abcdef1!2345").await;
        assert!(matches!(result, Err(ActionError::Chain(_))));
    }

    #[tokio::test]
    async fn authorize_maps_unlock_outcome() {
        let node = MockNode::new(false);
        let service = AccountService::new(node.clone());

        assert!(service.authorize(Address::ZERO, "correct").await.is_ok());
        assert!(service.authorize(Address::ZERO, "wrong").await.is_err());
        assert_eq!(node.unlock_calls.load(Ordering::SeqCst), 2);
    }
}
