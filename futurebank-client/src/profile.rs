//! Profile endpoints

use futurebank_core::domain::profile::Profile;
use futurebank_core::dto::profile::UpdateProfile;
use reqwest::Method;

use crate::FutureBankClient;
use crate::error::Result;

impl FutureBankClient {
    pub async fn get_profile(&self) -> Result<Profile> {
        let response = self.authed(Method::GET, "/api/profile")?.send().await?;

        self.handle_response(response).await
    }

    pub async fn update_profile(&self, req: &UpdateProfile) -> Result<Profile> {
        let response = self
            .authed(Method::PUT, "/api/profile")?
            .json(req)
            .send()
            .await?;

        self.handle_response(response).await
    }
}
