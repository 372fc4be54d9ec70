//! # Catalog View
//!
//! One generic list screen per record kind. The view owns a [`FilterManager`] task for its
//! list and exposes the admin-gated editor, save and delete operations. Every successful
//! mutation triggers an immediate refresh of the list.

use crate::filter::{FilterHandle, FilterManager, FilterSet, FilterSnapshot};
use crate::form::RecordForm;
use crate::framework::{PhotoUpload, Record, ResourceClient, SaveOutcome, SaveTarget};
use crate::views::{AdminMode, ViewError};
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{info, instrument, warn};
use url::Url;

/// Asks the user to confirm an irreversible operation.
#[async_trait]
pub trait Confirm: Send + Sync {
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Resolves a photo path returned by the collaborator against the asset base address.
///
/// Paths are server-relative (`/uploads/...`) and are appended to the base as-is, so a base
/// with a path prefix keeps it. Absolute URLs pass through.
pub fn asset_url(base: &Url, path: &str) -> Option<Url> {
    if let Ok(url) = Url::parse(path) {
        return Some(url);
    }
    let path = path.trim();
    if path.is_empty() {
        return None;
    }
    let separator = if path.starts_with('/') { "" } else { "/" };
    Url::parse(&format!(
        "{}{}{}",
        base.as_str().trim_end_matches('/'),
        separator,
        path
    ))
    .ok()
}

pub struct CatalogView<T: Record> {
    client: ResourceClient<T>,
    filters: FilterHandle<T>,
    admin: AdminMode,
    asset_base: Url,
}

impl<T: Record> CatalogView<T> {
    /// Creates the view and starts its filter manager, which fetches the unfiltered list at
    /// once. Must be called inside a Tokio runtime.
    pub fn new(
        client: ResourceClient<T>,
        admin: AdminMode,
        asset_base: Url,
        debounce: Duration,
    ) -> Self {
        let (manager, filters) =
            FilterManager::new(client.clone(), FilterSet::for_kind::<T>(), debounce);
        tokio::spawn(manager.run());
        Self {
            client,
            filters,
            admin,
            asset_base,
        }
    }

    pub fn filter_fields(&self) -> &'static [&'static str] {
        T::FILTER_FIELDS
    }

    pub async fn set_filter(&self, field: &str, value: impl Into<String>) -> Result<(), ViewError> {
        Ok(self.filters.set(field, value).await?)
    }

    pub async fn refresh(&self) -> Result<(), ViewError> {
        Ok(self.filters.refresh().await?)
    }

    pub fn snapshot(&self) -> FilterSnapshot<T> {
        self.filters.snapshot()
    }

    pub fn records(&self) -> Vec<T> {
        self.filters.snapshot().records
    }

    pub fn subscribe(&self) -> watch::Receiver<FilterSnapshot<T>> {
        self.filters.subscribe()
    }

    /// Waits for pending edits and the latest fetch to land.
    pub async fn settled(&self) -> Result<FilterSnapshot<T>, ViewError> {
        Ok(self.filters.settled().await?)
    }

    pub fn photo_url(&self, record: &T) -> Option<Url> {
        record
            .photo_path()
            .and_then(|path| asset_url(&self.asset_base, path))
    }

    /// Whether the add entry point and the edit/delete controls are shown.
    pub fn can_edit(&self) -> bool {
        self.admin.is_enabled()
    }

    /// An editor for a new record, or prefilled from `existing`.
    pub fn editor(&self, existing: Option<&T>) -> Result<RecordForm<T>, ViewError> {
        self.admin.require()?;
        Ok(match existing {
            Some(record) => RecordForm::edit(record),
            None => RecordForm::new(),
        })
    }

    /// Validates the form, saves the record, uploads the photo if given, then refreshes.
    #[instrument(skip(self, form, photo), fields(kind = %T::KIND))]
    pub async fn save(
        &self,
        form: &RecordForm<T>,
        photo: Option<PhotoUpload>,
    ) -> Result<SaveOutcome, ViewError> {
        self.admin.require()?;
        let draft = form.build()?;
        let target: SaveTarget = form.target().clone();
        let outcome = self.client.save(target, draft, photo).await?;
        self.refresh_after_mutation().await;
        Ok(outcome)
    }

    /// Deletes `record` once the user confirms. A declined prompt sends nothing.
    #[instrument(skip(self, record, confirm), fields(kind = %T::KIND, id = %record.id()))]
    pub async fn delete(&self, record: &T, confirm: &dyn Confirm) -> Result<(), ViewError> {
        self.admin.require()?;
        let prompt = format!("Supprimer « {} » ?", record.name());
        if !confirm.confirm(&prompt).await {
            info!("Delete declined");
            return Err(ViewError::Declined);
        }
        self.client.delete(record.id().clone()).await?;
        info!("Deleted");
        self.refresh_after_mutation().await;
        Ok(())
    }

    async fn refresh_after_mutation(&self) {
        if let Err(e) = self.filters.refresh().await {
            warn!(error = %e, "Refresh after mutation failed");
        }
    }
}
