//! Typed gateway to the deployed marketplace contract.
//!
//! # Responsibilities
//! - Encode calls against the contract ABI
//! - Submit state-changing transactions signed by the node (`eth_sendTransaction`)
//! - Poll for the transaction receipt and reject reverted transactions
//! - Decode read-only query results into domain types

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, TxHash, U256};
use alloy::rpc::types::TransactionRequest;
use alloy::sol;
use alloy::sol_types::SolCall;
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::{interval, timeout};

use crate::chain::client::ChainClient;
use crate::chain::types::{ChainError, ChainResult};
use crate::market::types::{Ad, AdStatus, Estate, EstateKind};

sol! {
    /// On-chain interface of the marketplace contract. The contract owns all
    /// durable state (estates, ads, balances); this service only calls it.
    interface EstateAgency {
        struct Estate {
            uint256 size;
            string photo;
            uint256 rooms;
            uint8 esType;
            bool isActive;
            address owner;
        }

        struct Ad {
            uint256 estateId;
            uint256 price;
            uint8 adStatus;
            address owner;
        }

        function createEstate(uint256 size, string memory photo, uint256 rooms, uint8 esType) external;
        function createAd(uint256 estateId, uint256 price) external;
        function buyEstate(uint256 adId) external payable;
        function withdraw(uint256 amount) external;
        function updateEstate(uint256 estateId, bool isActive) external;
        function updateAd(uint256 adId, uint8 adStatus) external;
        function getEstates() external view returns (Estate[] memory);
        function getAds() external view returns (Ad[] memory);
        function getBalance() external view returns (uint256);
    }
}

impl From<EstateAgency::Estate> for Estate {
    fn from(e: EstateAgency::Estate) -> Self {
        Self {
            size: e.size,
            photo: e.photo,
            rooms: e.rooms,
            kind: EstateKind::from_code(e.esType),
            active: e.isActive,
            owner: e.owner,
        }
    }
}

impl From<EstateAgency::Ad> for Ad {
    fn from(a: EstateAgency::Ad) -> Self {
        Self {
            estate_id: a.estateId,
            price: a.price,
            status: AdStatus::from_code(a.adStatus),
            owner: a.owner,
        }
    }
}

/// The nine operations the portal performs against the contract.
///
/// Handlers depend on `Arc<dyn MarketContract>` so tests can substitute a
/// recording mock for the live gateway.
#[async_trait]
pub trait MarketContract: Send + Sync {
    async fn create_estate(
        &self,
        actor: Address,
        size: U256,
        photo: String,
        rooms: U256,
        kind: EstateKind,
    ) -> ChainResult<TxHash>;

    async fn create_ad(&self, actor: Address, estate_id: U256, price: U256)
        -> ChainResult<TxHash>;

    /// `price` is attached as the transaction value; the contract escrows it.
    async fn buy_estate(&self, actor: Address, ad_id: U256, price: U256) -> ChainResult<TxHash>;

    async fn withdraw(&self, actor: Address, amount: U256) -> ChainResult<TxHash>;

    async fn update_estate(&self, actor: Address, estate_id: U256, active: bool)
        -> ChainResult<TxHash>;

    async fn update_ad(&self, actor: Address, ad_id: U256, status: AdStatus)
        -> ChainResult<TxHash>;

    async fn get_estates(&self) -> ChainResult<Vec<Estate>>;

    async fn get_ads(&self) -> ChainResult<Vec<Ad>>;

    /// Balance lookups are scoped to the calling address.
    async fn get_balance(&self, actor: Address) -> ChainResult<U256>;
}

/// Live contract gateway: one `ChainClient` bound to one contract address.
#[derive(Debug, Clone)]
pub struct AgencyContract {
    client: ChainClient,
    address: Address,
}

impl AgencyContract {
    /// Bind a client to the deployed contract.
    pub fn new(client: ChainClient, address: Address) -> Self {
        Self { client, address }
    }

    /// Contract address this gateway is bound to.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Execute a non-mutating query and decode its return value.
    ///
    /// `from` scopes the call to an acting address (used for balance lookups,
    /// where the contract inspects `msg.sender`).
    async fn call<C: SolCall>(&self, call: C, from: Option<Address>) -> ChainResult<C::Return> {
        let mut tx = TransactionRequest::default()
            .with_to(self.address)
            .with_input(call.abi_encode());
        if let Some(from) = from {
            tx = tx.with_from(from);
        }

        let raw = self
            .client
            .with_timeout(self.client.provider().call(tx))
            .await?;

        C::abi_decode_returns(&raw).map_err(|e| ChainError::Abi(e.to_string()))
    }

    /// Submit a state-changing transaction on behalf of `from` and block
    /// until its receipt is observed.
    ///
    /// The node signs with its managed key, so `from` must have been unlocked
    /// beforehand. A mined-but-reverted transaction is an error.
    async fn transact(&self, input: Vec<u8>, from: Address, value: U256) -> ChainResult<TxHash> {
        let mut tx = TransactionRequest::default()
            .with_from(from)
            .with_to(self.address)
            .with_input(input);
        if !value.is_zero() {
            tx = tx.with_value(value);
        }

        let pending = self
            .client
            .with_timeout(self.client.provider().send_transaction(tx))
            .await?;
        let tx_hash = *pending.tx_hash();

        self.wait_for_receipt(tx_hash).await?;
        Ok(tx_hash)
    }

    /// Poll for the receipt of a submitted transaction.
    async fn wait_for_receipt(&self, tx_hash: TxHash) -> ChainResult<()> {
        let config = self.client.config();
        let timeout_duration = Duration::from_secs(config.receipt_timeout_secs);
        let poll_interval = Duration::from_millis(config.receipt_poll_ms);

        let result = timeout(timeout_duration, async {
            let mut ticker = interval(poll_interval);

            loop {
                ticker.tick().await;

                let receipt = match self
                    .client
                    .with_timeout(self.client.provider().get_transaction_receipt(tx_hash))
                    .await?
                {
                    Some(r) => r,
                    None => {
                        tracing::debug!(tx_hash = %tx_hash, "Transaction pending");
                        continue;
                    }
                };

                if !receipt.status() {
                    return Err(ChainError::Reverted(tx_hash.to_string()));
                }

                return Ok(());
            }
        })
        .await;

        match result {
            Ok(outcome) => outcome,
            Err(_) => Err(ChainError::ReceiptTimeout(config.receipt_timeout_secs)),
        }
    }
}

#[async_trait]
impl MarketContract for AgencyContract {
    async fn create_estate(
        &self,
        actor: Address,
        size: U256,
        photo: String,
        rooms: U256,
        kind: EstateKind,
    ) -> ChainResult<TxHash> {
        let call = EstateAgency::createEstateCall {
            size,
            photo,
            rooms,
            esType: kind.code(),
        };
        self.transact(call.abi_encode(), actor, U256::ZERO).await
    }

    async fn create_ad(
        &self,
        actor: Address,
        estate_id: U256,
        price: U256,
    ) -> ChainResult<TxHash> {
        let call = EstateAgency::createAdCall {
            estateId: estate_id,
            price,
        };
        self.transact(call.abi_encode(), actor, U256::ZERO).await
    }

    async fn buy_estate(&self, actor: Address, ad_id: U256, price: U256) -> ChainResult<TxHash> {
        let call = EstateAgency::buyEstateCall { adId: ad_id };
        self.transact(call.abi_encode(), actor, price).await
    }

    async fn withdraw(&self, actor: Address, amount: U256) -> ChainResult<TxHash> {
        let call = EstateAgency::withdrawCall { amount };
        self.transact(call.abi_encode(), actor, U256::ZERO).await
    }

    async fn update_estate(
        &self,
        actor: Address,
        estate_id: U256,
        active: bool,
    ) -> ChainResult<TxHash> {
        let call = EstateAgency::updateEstateCall {
            estateId: estate_id,
            isActive: active,
        };
        self.transact(call.abi_encode(), actor, U256::ZERO).await
    }

    async fn update_ad(
        &self,
        actor: Address,
        ad_id: U256,
        status: AdStatus,
    ) -> ChainResult<TxHash> {
        let call = EstateAgency::updateAdCall {
            adId: ad_id,
            adStatus: status.code(),
        };
        self.transact(call.abi_encode(), actor, U256::ZERO).await
    }

    async fn get_estates(&self) -> ChainResult<Vec<Estate>> {
        let estates = self.call(EstateAgency::getEstatesCall {}, None).await?;
        Ok(estates.into_iter().map(Estate::from).collect())
    }

    async fn get_ads(&self) -> ChainResult<Vec<Ad>> {
        let ads = self.call(EstateAgency::getAdsCall {}, None).await?;
        Ok(ads.into_iter().map(Ad::from).collect())
    }

    async fn get_balance(&self, actor: Address) -> ChainResult<U256> {
        self.call(EstateAgency::getBalanceCall {}, Some(actor)).await
    }
}
