//! Shared utilities for router-level integration tests.
//!
//! The live contract gateway and node are replaced by recording mocks so
//! tests can assert exactly which chain operations a request triggered.

use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;
use axum::Router;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use estate_portal::chain::accounts::NodeAccounts;
use estate_portal::chain::contract::MarketContract;
use estate_portal::chain::types::{ChainError, ChainResult};
use estate_portal::chain::ChainClient;
use estate_portal::config::PortalConfig;
use estate_portal::http::{build_router, AppState};
use estate_portal::market::types::{Ad, AdStatus, Estate, EstateKind};

/// One state-changing gateway call, as the mock observed it.
#[derive(Debug, Clone, PartialEq)]
#[allow(dead_code)]
pub enum RecordedCall {
    CreateEstate {
        actor: Address,
        size: U256,
        rooms: U256,
        kind: EstateKind,
    },
    CreateAd {
        actor: Address,
        estate_id: U256,
        price: U256,
    },
    BuyEstate {
        actor: Address,
        ad_id: U256,
        price: U256,
    },
    Withdraw {
        actor: Address,
        amount: U256,
    },
    UpdateEstate {
        actor: Address,
        estate_id: U256,
        active: bool,
    },
    UpdateAd {
        actor: Address,
        ad_id: U256,
        status: AdStatus,
    },
}

/// Contract gateway mock: records writes, serves canned reads, and can be
/// told to fail every operation.
pub struct MockAgency {
    calls: Mutex<Vec<RecordedCall>>,
    fail: bool,
}

impl MockAgency {
    pub fn new(fail: bool) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            fail,
        })
    }

    pub fn recorded(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: RecordedCall) -> ChainResult<TxHash> {
        self.calls.lock().unwrap().push(call);
        if self.fail {
            Err(ChainError::Rpc("node unreachable".to_string()))
        } else {
            Ok(TxHash::ZERO)
        }
    }
}

#[async_trait]
impl MarketContract for MockAgency {
    async fn create_estate(
        &self,
        actor: Address,
        size: U256,
        _photo: String,
        rooms: U256,
        kind: EstateKind,
    ) -> ChainResult<TxHash> {
        self.record(RecordedCall::CreateEstate {
            actor,
            size,
            rooms,
            kind,
        })
    }

    async fn create_ad(
        &self,
        actor: Address,
        estate_id: U256,
        price: U256,
    ) -> ChainResult<TxHash> {
        self.record(RecordedCall::CreateAd {
            actor,
            estate_id,
            price,
        })
    }

    async fn buy_estate(&self, actor: Address, ad_id: U256, price: U256) -> ChainResult<TxHash> {
        self.record(RecordedCall::BuyEstate { actor, ad_id, price })
    }

    async fn withdraw(&self, actor: Address, amount: U256) -> ChainResult<TxHash> {
        self.record(RecordedCall::Withdraw { actor, amount })
    }

    async fn update_estate(
        &self,
        actor: Address,
        estate_id: U256,
        active: bool,
    ) -> ChainResult<TxHash> {
        self.record(RecordedCall::UpdateEstate {
            actor,
            estate_id,
            active,
        })
    }

    async fn update_ad(
        &self,
        actor: Address,
        ad_id: U256,
        status: AdStatus,
    ) -> ChainResult<TxHash> {
        self.record(RecordedCall::UpdateAd { actor, ad_id, status })
    }

    async fn get_estates(&self) -> ChainResult<Vec<Estate>> {
        if self.fail {
            return Err(ChainError::Rpc("node unreachable".to_string()));
        }
        Ok(vec![Estate {
            size: U256::from(120),
            photo: "ipfs://dom.png".to_string(),
            rooms: U256::from(4),
            kind: EstateKind::House,
            active: true,
            owner: Address::ZERO,
        }])
    }

    async fn get_ads(&self) -> ChainResult<Vec<Ad>> {
        if self.fail {
            return Err(ChainError::Rpc("node unreachable".to_string()));
        }
        Ok(vec![Ad {
            estate_id: U256::from(1),
            price: U256::from(1_000),
            status: AdStatus::Opened,
            owner: Address::ZERO,
        }])
    }

    async fn get_balance(&self, _actor: Address) -> ChainResult<U256> {
        if self.fail {
            return Err(ChainError::Rpc("node unreachable".to_string()));
        }
        Ok(U256::from(5_000))
    }
}

/// Node account mock: counts calls, accepts one known password.
pub struct MockNode {
    pub create_calls: AtomicU32,
    pub unlock_calls: AtomicU32,
}

impl MockNode {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            create_calls: AtomicU32::new(0),
            unlock_calls: AtomicU32::new(0),
        })
    }
}

#[async_trait]
impl NodeAccounts for MockNode {
    async fn create_account(&self, _password: &str) -> ChainResult<Address> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Address::ZERO)
    }

    async fn unlock(&self, _address: Address, password: &str) -> ChainResult<bool> {
        self.unlock_calls.fetch_add(1, Ordering::SeqCst);
        Ok(password == "correct")
    }
}

/// Build a router over the mocks.
pub async fn build_app(agency: Arc<MockAgency>, node: Arc<MockNode>) -> Router {
    let mut config = PortalConfig::default();
    // Keep the offline chain-id probe quick.
    config.chain.rpc_timeout_secs = 1;

    let chain = ChainClient::new(config.chain.clone()).await.unwrap();
    let state = AppState::new(chain, agency, node);
    build_router(&config, state)
}
