//! Dashboard and kudos endpoints

use futurebank_core::dashboard::DashboardView;
use futurebank_core::dto::kudos::{KudosReceipt, KudosRequest};
use reqwest::Method;

use crate::FutureBankClient;
use crate::error::Result;

impl FutureBankClient {
    /// The dashboard; personal sections are included when a token is set
    pub async fn dashboard(&self) -> Result<DashboardView> {
        let response = self.request(Method::GET, "/api/dashboard").send().await?;

        self.handle_response(response).await
    }

    pub async fn give_kudos(&self, req: &KudosRequest) -> Result<KudosReceipt> {
        let response = self
            .authed(Method::POST, "/api/kudos")?
            .json(req)
            .send()
            .await?;

        self.handle_response(response).await
    }
}
