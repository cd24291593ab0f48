//! Startup use case: profile, settings, data export and account deletion.

use crate::client::executor::ApiClient;
use strata_domain::{
    AccountDeletion, ApiError, CreateStartupInput, DataExport, StartupProfile,
    UpdateSettingsInput, UpdateStartupInput, UserSettings,
};
use tracing::{debug, info};

#[derive(Clone)]
pub struct StartupUseCase {
    client: ApiClient,
}

impl StartupUseCase {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// The startup profile, or `None` before onboarding created one.
    pub async fn profile(&self) -> Result<Option<StartupProfile>, ApiError> {
        match self.client.get("/startup/profile").await {
            Ok(profile) => Ok(Some(profile)),
            Err(e) if e.status() == Some(404) => {
                debug!("No startup profile yet");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub async fn create_profile(
        &self,
        input: &CreateStartupInput,
    ) -> Result<StartupProfile, ApiError> {
        let profile: StartupProfile = self.client.post("/startup/profile", input).await?;
        info!("Startup profile created: {}", profile.name);
        Ok(profile)
    }

    pub async fn update_profile(
        &self,
        input: &UpdateStartupInput,
    ) -> Result<StartupProfile, ApiError> {
        let profile: StartupProfile = self.client.put("/startup/profile", input).await?;
        info!("Startup profile updated: {}", profile.name);
        Ok(profile)
    }

    pub async fn settings(&self) -> Result<UserSettings, ApiError> {
        self.client.get("/startup/settings").await
    }

    pub async fn update_settings(
        &self,
        input: &UpdateSettingsInput,
    ) -> Result<UserSettings, ApiError> {
        let settings = self.client.put("/startup/settings", input).await?;
        info!("Settings updated");
        Ok(settings)
    }

    pub async fn export(&self) -> Result<DataExport, ApiError> {
        let export: DataExport = self.client.get("/startup/export").await?;
        debug!("Exported {} records", export.record_count);
        Ok(export)
    }

    /// Permanently delete the account on the server.
    pub async fn delete_account(&self) -> Result<AccountDeletion, ApiError> {
        let deletion: AccountDeletion = self.client.delete("/startup/account").await?;
        info!("Account deleted at {}", deletion.deleted_at);
        Ok(deletion)
    }
}
