//! The engine facade and user record lifecycle

use crate::error::{Error, Result};
use chrono::Utc;
use laurel_core::{Catalog, UserId};
use laurel_store::{DocumentStore, UserRecord};
use std::sync::Arc;
use tracing::info;

/// The engagement engine
///
/// One instance serves all users: the catalog bundle is immutable and
/// shared, every mutation is a single atomic transaction against the
/// store, and no state lives on the engine itself. Clones share the
/// catalog and the store handle, so handlers can keep one per task.
#[derive(Clone)]
pub struct EngagementEngine<S> {
    pub(crate) catalog: Arc<Catalog>,
    pub(crate) store: S,
}

impl<S: DocumentStore> EngagementEngine<S> {
    /// Create an engine over a catalog bundle and a store
    pub fn new(catalog: Catalog, store: S) -> Self {
        Self {
            catalog: Arc::new(catalog),
            store,
        }
    }

    /// Create an engine sharing an already-constructed catalog
    pub fn with_shared_catalog(catalog: Arc<Catalog>, store: S) -> Self {
        Self { catalog, store }
    }

    /// The catalog bundle this engine was constructed with
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Create the engagement record for a user's first event
    ///
    /// Fails with [`Error::UserAlreadyExists`] if the user already has a
    /// record. Awarding the welcome badge stays with the caller, so
    /// onboarding flows decide which badge (if any) greets the user.
    pub async fn create_user(&self, user_id: &UserId) -> Result<UserRecord> {
        let record = UserRecord::new(user_id.clone(), Utc::now());
        match self.store.create(&record).await {
            Ok(()) => {
                info!(user = %user_id, "engagement record created");
                Ok(record)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Fetch a user's engagement record
    pub async fn get_user(&self, user_id: &UserId) -> Result<UserRecord> {
        Ok(self.store.get(user_id.as_str()).await?)
    }
}
