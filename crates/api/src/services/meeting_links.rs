use std::sync::Arc;

use calhub_core::{
    models::meeting::{ConferencingPlatform, MeetingLink, MeetingLinkRequest},
    providers::{ConferencingClient, ProviderError},
};
use uuid::Uuid;

/// Link stored for meetings on platforms that cannot issue one.
pub const NO_LINK: &str = "#";

const PLACEHOLDER_ID_MODULUS: u128 = 1_000_000_000;

/// Obtains meeting links from the conferencing platforms.
#[derive(Clone)]
pub struct MeetingLinkService {
    client: Arc<dyn ConferencingClient>,
}

impl MeetingLinkService {
    pub fn new(client: Arc<dyn ConferencingClient>) -> Self {
        Self { client }
    }

    /// Asks the platform for a real meeting. Errors are returned as-is.
    pub async fn generate(
        &self,
        user_id: Uuid,
        platform: ConferencingPlatform,
        request: MeetingLinkRequest,
    ) -> Result<MeetingLink, ProviderError> {
        self.client.create_meeting(user_id, platform, request).await
    }

    /// Link to store on a meeting. Never fails: a platform the user has not
    /// connected yields a placeholder link, anything else yields [`NO_LINK`].
    pub async fn link_for(
        &self,
        user_id: Uuid,
        platform: &str,
        request: MeetingLinkRequest,
    ) -> String {
        let Some(platform) = ConferencingPlatform::from_name(platform) else {
            return NO_LINK.to_string();
        };

        let placeholder = placeholder_link(platform, &request);
        match self.generate(user_id, platform, request).await {
            Ok(link) => link.meeting_link,
            Err(ProviderError::NotConnected) => {
                tracing::info!(
                    "{} not connected for user {}, using placeholder link",
                    platform.display_name(),
                    user_id
                );
                placeholder
            }
            Err(ProviderError::Upstream(reason)) => {
                tracing::warn!(
                    "{} meeting creation failed for user {}: {}",
                    platform.display_name(),
                    user_id,
                    reason
                );
                NO_LINK.to_string()
            }
        }
    }
}

/// Stable per-meeting link derived from the title and start time. The id is
/// a name-based (v5) UUID, so it is the same across builds and releases.
pub fn placeholder_link(platform: ConferencingPlatform, request: &MeetingLinkRequest) -> String {
    let name = format!("{}|{}", request.title, request.start.to_rfc3339());
    let id = Uuid::new_v5(&Uuid::NAMESPACE_URL, name.as_bytes()).as_u128();
    let id = id % PLACEHOLDER_ID_MODULUS;

    match platform {
        ConferencingPlatform::Zoom => format!("https://zoom.us/j/{}", id),
        ConferencingPlatform::Teams => {
            format!("https://teams.microsoft.com/l/meetup-join/{}", id)
        }
    }
}
