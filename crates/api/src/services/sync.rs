//! Pulls a user's provider calendar into the local store.

use calhub_core::{
    errors::CalError,
    providers::ProviderClient,
    sync::{ProviderKind, SyncRecord, SyncResponse, map_provider_event},
};
use calhub_db::stores::SyncStore;
use uuid::Uuid;

use crate::middleware::error_handling::{AppError, provider_error};

/// Upserts every payload a provider returns, as a meeting or an event. A
/// failed write leaves the store as it was before the sync.
pub struct SyncOrchestrator<'a> {
    pub store: &'a dyn SyncStore,
}

impl SyncOrchestrator<'_> {
    pub async fn sync(
        &self,
        user_id: Uuid,
        kind: ProviderKind,
        client: &dyn ProviderClient,
    ) -> Result<SyncResponse, AppError> {
        let payloads = client
            .fetch_events(user_id)
            .await
            .map_err(|err| provider_error(err, kind.display_name()))?;

        tracing::info!(
            "Syncing {} {} entries for user {}",
            payloads.len(),
            kind,
            user_id
        );

        let records: Vec<SyncRecord> = payloads
            .iter()
            .filter(|payload| {
                let keyed = !payload.id.trim().is_empty();
                if !keyed {
                    tracing::warn!("Skipping {} entry without an id", kind);
                }
                keyed
            })
            .map(|payload| map_provider_event(kind, payload))
            .collect();

        let synced = self.store.save_synced(user_id, records).await?;

        Ok(SyncResponse {
            message: format!("{} calendar synced successfully", kind.display_name()),
            events_synced: synced,
        })
    }
}

/// Resolves the `:provider` path segment.
pub fn provider_from_path(name: &str) -> Result<ProviderKind, AppError> {
    ProviderKind::from_name(name)
        .ok_or_else(|| AppError(CalError::NotFound(format!("Unknown provider '{}'", name))))
}
