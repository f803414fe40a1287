//! Shared application state handed to every handler

use std::sync::Arc;

use futurebank_core::domain::community::CommunityBoard;
use futurebank_core::features::FeatureFlags;

use crate::backend::{AuthProvider, DataStore, MemoryBackend, SupabaseClient};
use crate::config::{BackendKind, Config};

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<dyn AuthProvider>,
    pub store: Arc<dyn DataStore>,
    pub features: FeatureFlags,
    pub community: Arc<CommunityBoard>,
}

impl AppState {
    /// Build the state described by `config`, connecting the chosen backend
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let community = config.load_community_board()?;

        let state = match config.backend {
            BackendKind::Supabase => {
                let Some(url) = config.supabase_url.as_deref() else {
                    anyhow::bail!("SUPABASE_URL environment variable not set");
                };
                let Some(key) = config.supabase_anon_key.as_deref() else {
                    anyhow::bail!("SUPABASE_ANON_KEY environment variable not set");
                };

                tracing::info!("Using Supabase backend at {}", url);
                let backend = Arc::new(SupabaseClient::new(url, key));
                Self::with_backend(backend, config.features, community)
            }
            BackendKind::Memory => {
                tracing::warn!("Using in-memory backend, data is lost on restart");
                Self::with_backend(
                    Arc::new(MemoryBackend::with_auto_confirm(config.memory_auto_confirm)),
                    config.features,
                    community,
                )
            }
        };

        Ok(state)
    }

    /// State over one backend serving both auth and data
    pub fn with_backend<B>(
        backend: Arc<B>,
        features: FeatureFlags,
        community: CommunityBoard,
    ) -> Self
    where
        B: AuthProvider + DataStore + 'static,
    {
        Self {
            auth: backend.clone(),
            store: backend,
            features,
            community: Arc::new(community),
        }
    }
}
