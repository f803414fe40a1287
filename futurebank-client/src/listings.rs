//! Offer and want endpoints

use futurebank_core::domain::listing::{Offer, Want};
use futurebank_core::dto::listing::{CreateOffer, CreateWant};
use reqwest::Method;

use crate::FutureBankClient;
use crate::error::Result;

impl FutureBankClient {
    // =============================================================================
    // Offers
    // =============================================================================

    pub async fn create_offer(&self, req: &CreateOffer) -> Result<Offer> {
        let response = self
            .authed(Method::POST, "/api/offers")?
            .json(req)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// The caller's offers
    pub async fn list_offers(&self) -> Result<Vec<Offer>> {
        let response = self.authed(Method::GET, "/api/offers")?.send().await?;

        self.handle_response(response).await
    }

    // =============================================================================
    // Wants
    // =============================================================================

    pub async fn create_want(&self, req: &CreateWant) -> Result<Want> {
        let response = self
            .authed(Method::POST, "/api/wants")?
            .json(req)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// The caller's wants
    pub async fn list_wants(&self) -> Result<Vec<Want>> {
        let response = self.authed(Method::GET, "/api/wants")?.send().await?;

        self.handle_response(response).await
    }
}
