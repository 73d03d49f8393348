//! Capabilities backed by third-party services.
//!
//! Token acquisition and the provider HTTP calls live outside this system;
//! the rest of the code talks to them only through these traits.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    models::meeting::{ConferencingPlatform, MeetingLink, MeetingLinkRequest},
    sync::{ProviderEvent, ProviderKind},
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The user has not authorized this provider.
    #[error("provider not connected")]
    NotConnected,

    #[error("provider request failed: {0}")]
    Upstream(String),
}

/// Reads a user's calendar entries from one provider.
#[automock]
#[async_trait]
pub trait ProviderClient: Send + Sync {
    async fn fetch_events(&self, user_id: Uuid) -> Result<Vec<ProviderEvent>, ProviderError>;
}

/// Creates meeting links on a conferencing platform.
#[automock]
#[async_trait]
pub trait ConferencingClient: Send + Sync {
    async fn create_meeting(
        &self,
        user_id: Uuid,
        platform: ConferencingPlatform,
        request: MeetingLinkRequest,
    ) -> Result<MeetingLink, ProviderError>;
}

/// Client for deployments where no user has authorized the service. Every
/// call reports [`ProviderError::NotConnected`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Disconnected;

#[async_trait]
impl ProviderClient for Disconnected {
    async fn fetch_events(&self, _user_id: Uuid) -> Result<Vec<ProviderEvent>, ProviderError> {
        Err(ProviderError::NotConnected)
    }
}

#[async_trait]
impl ConferencingClient for Disconnected {
    async fn create_meeting(
        &self,
        _user_id: Uuid,
        _platform: ConferencingPlatform,
        _request: MeetingLinkRequest,
    ) -> Result<MeetingLink, ProviderError> {
        Err(ProviderError::NotConnected)
    }
}

/// One client per supported calendar provider.
#[derive(Clone)]
pub struct ProviderClients {
    pub outlook: Arc<dyn ProviderClient>,
    pub gmail: Arc<dyn ProviderClient>,
}

impl ProviderClients {
    pub fn disconnected() -> Self {
        Self {
            outlook: Arc::new(Disconnected),
            gmail: Arc::new(Disconnected),
        }
    }

    pub fn get(&self, kind: ProviderKind) -> &dyn ProviderClient {
        match kind {
            ProviderKind::Outlook => self.outlook.as_ref(),
            ProviderKind::Gmail => self.gmail.as_ref(),
        }
    }
}
