//! The portal's contract actions.
//!
//! Six state-changing operations and three reads, each a thin wrapper over
//! the contract gateway: pass typed inputs through, log the outcome, return
//! a structured result. Rendering outcomes is the HTTP layer's concern.

use alloy::primitives::{Address, TxHash, U256};
use std::sync::Arc;

use crate::chain::contract::MarketContract;
use crate::market::types::{ActionResult, Ad, AdStatus, Estate, EstateKind};

/// Facade over the marketplace contract used by every route handler.
#[derive(Clone)]
pub struct MarketService {
    contract: Arc<dyn MarketContract>,
}

impl MarketService {
    pub fn new(contract: Arc<dyn MarketContract>) -> Self {
        Self { contract }
    }

    /// List a property on the marketplace.
    pub async fn create_estate(
        &self,
        actor: Address,
        size: U256,
        photo: String,
        rooms: U256,
        kind: EstateKind,
    ) -> ActionResult<TxHash> {
        let tx_hash = self
            .contract
            .create_estate(actor, size, photo, rooms, kind)
            .await?;
        tracing::info!(actor = %actor, tx_hash = %tx_hash, "Estate created");
        Ok(tx_hash)
    }

    /// Publish a sale ad for an owned estate.
    pub async fn create_ad(
        &self,
        actor: Address,
        estate_id: U256,
        price: U256,
    ) -> ActionResult<TxHash> {
        let tx_hash = self.contract.create_ad(actor, estate_id, price).await?;
        tracing::info!(actor = %actor, estate_id = %estate_id, tx_hash = %tx_hash, "Ad created");
        Ok(tx_hash)
    }

    /// Buy the estate behind an ad, attaching `price` as payment.
    pub async fn buy_estate(
        &self,
        actor: Address,
        ad_id: U256,
        price: U256,
    ) -> ActionResult<TxHash> {
        let tx_hash = self.contract.buy_estate(actor, ad_id, price).await?;
        tracing::info!(actor = %actor, ad_id = %ad_id, tx_hash = %tx_hash, "Estate bought");
        Ok(tx_hash)
    }

    /// Withdraw accumulated funds from the contract.
    pub async fn withdraw(&self, actor: Address, amount: U256) -> ActionResult<TxHash> {
        let tx_hash = self.contract.withdraw(actor, amount).await?;
        tracing::info!(actor = %actor, tx_hash = %tx_hash, "Funds withdrawn");
        Ok(tx_hash)
    }

    /// Re-activate an estate listing.
    ///
    /// The form only carries the estate id; the submitted status is fixed,
    /// as in the original application.
    pub async fn change_estate_status(
        &self,
        actor: Address,
        estate_id: U256,
    ) -> ActionResult<TxHash> {
        let tx_hash = self.contract.update_estate(actor, estate_id, true).await?;
        tracing::info!(actor = %actor, estate_id = %estate_id, tx_hash = %tx_hash, "Estate status changed");
        Ok(tx_hash)
    }

    /// Close a sale ad.
    pub async fn change_ad_status(&self, actor: Address, ad_id: U256) -> ActionResult<TxHash> {
        let tx_hash = self
            .contract
            .update_ad(actor, ad_id, AdStatus::Closed)
            .await?;
        tracing::info!(actor = %actor, ad_id = %ad_id, tx_hash = %tx_hash, "Ad status changed");
        Ok(tx_hash)
    }

    /// All estates known to the contract.
    pub async fn get_estates(&self) -> ActionResult<Vec<Estate>> {
        Ok(self.contract.get_estates().await?)
    }

    /// All sale ads known to the contract.
    pub async fn get_ads(&self) -> ActionResult<Vec<Ad>> {
        Ok(self.contract.get_ads().await?)
    }

    /// Contract balance of the acting address.
    pub async fn get_balance(&self, actor: Address) -> ActionResult<U256> {
        Ok(self.contract.get_balance(actor).await?)
    }
}
