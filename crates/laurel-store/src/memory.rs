//! In-memory reference store
//!
//! Backs tests and demos. Documents are held as encoded bytes per
//! collection, so everything round-trips serde exactly as it would
//! against a real document database, and the write lock spans each
//! mutation, giving the transactional guarantees of the contract.

use crate::document::Document;
use crate::error::{Error, Result};
use crate::store::DocumentStore;
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Process-local [`DocumentStore`] over tokio `RwLock` maps
///
/// Cloning is cheap and shares the underlying state.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

#[derive(Default)]
struct MemoryState {
    /// Collection name -> key -> encoded document
    ///
    /// BTreeMap keeps keys sorted, which fixes the tie order of queries.
    collections: HashMap<&'static str, BTreeMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held in a collection
    pub async fn count(&self, collection: &'static str) -> usize {
        let state = self.state.read().await;
        state.collections.get(collection).map_or(0, |c| c.len())
    }
}

fn encode<D: Document>(doc: &D) -> Result<Vec<u8>> {
    bincode::serialize(doc)
        .map_err(|e| Error::Unavailable(format!("encode {}: {}", D::COLLECTION, e)))
}

fn decode<D: Document>(key: &str, bytes: &[u8]) -> Result<D> {
    bincode::deserialize(bytes).map_err(|e| Error::Corrupt {
        collection: D::COLLECTION,
        key: key.to_string(),
        detail: e.to_string(),
    })
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get<D: Document>(&self, key: &str) -> Result<D> {
        let state = self.state.read().await;
        let bytes = state
            .collections
            .get(D::COLLECTION)
            .and_then(|coll| coll.get(key))
            .ok_or_else(|| Error::not_found(D::COLLECTION, key))?;
        decode(key, bytes)
    }

    async fn create<D: Document>(&self, doc: &D) -> Result<()> {
        let key = doc.key();
        let encoded = encode(doc)?;
        let mut state = self.state.write().await;
        let coll = state.collections.entry(D::COLLECTION).or_default();
        if coll.contains_key(&key) {
            return Err(Error::already_exists(D::COLLECTION, key));
        }
        coll.insert(key, encoded);
        Ok(())
    }

    async fn transactional_update<D, T, E, F>(
        &self,
        key: &str,
        mut mutator: F,
    ) -> std::result::Result<T, E>
    where
        D: Document,
        T: Send,
        E: From<Error> + Send,
        F: FnMut(&mut D) -> std::result::Result<T, E> + Send,
    {
        // The write lock is the transaction: held from load to commit.
        let mut state = self.state.write().await;
        let coll = state.collections.entry(D::COLLECTION).or_default();
        let bytes = coll
            .get(key)
            .ok_or_else(|| E::from(Error::not_found(D::COLLECTION, key)))?;
        let mut doc: D = decode(key, bytes).map_err(E::from)?;
        let value = mutator(&mut doc)?;
        let encoded = encode(&doc).map_err(E::from)?;
        coll.insert(key.to_string(), encoded);
        Ok(value)
    }

    async fn query<D: Document>(&self, order_by: &str, limit: usize) -> Result<Vec<D>> {
        let state = self.state.read().await;
        let Some(coll) = state.collections.get(D::COLLECTION) else {
            return Ok(Vec::new());
        };
        let mut ranked = Vec::new();
        for (key, bytes) in coll.iter() {
            let doc: D = decode(key, bytes)?;
            if let Some(score) = doc.ranking_key(order_by) {
                ranked.push((score, doc));
            }
        }
        // Stable sort: equal scores keep their ascending-key order
        ranked.sort_by(|a, b| b.0.cmp(&a.0));
        ranked.truncate(limit);
        Ok(ranked.into_iter().map(|(_, doc)| doc).collect())
    }
}

// ============================================================================
// Tests
// ============================================================================
