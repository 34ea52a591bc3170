//! The document store contract
//!
//! Every engine operation runs against this interface. The store owns
//! atomicity: a `transactional_update` either fully applies or leaves the
//! document untouched, and concurrent updates to the same key never lose
//! writes. Adapters for hosted document databases implement this trait;
//! [`crate::MemoryStore`] is the in-process reference implementation.

use crate::document::Document;
use crate::error::{Error, Result};
use async_trait::async_trait;

/// Abstract per-document storage with atomic single-document updates
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a document by key
    ///
    /// Fails with [`Error::NotFound`] if no document exists under the key.
    async fn get<D: Document>(&self, key: &str) -> Result<D>;

    /// Insert a new document under its own key
    ///
    /// Fails with [`Error::AlreadyExists`] if the key is taken; used for
    /// first-writer-wins materialization.
    async fn create<D: Document>(&self, doc: &D) -> Result<()>;

    /// Atomically mutate the document under a key
    ///
    /// Loads the current state, applies `mutator`, and commits the result
    /// as one atomic step: no concurrent caller's write is lost, and a
    /// mutator error aborts the update without writing. The store may run
    /// `mutator` more than once when it retries optimistically, so the
    /// closure must not touch anything beyond the document it is handed.
    ///
    /// The mutator's error type only needs a conversion from [`Error`] so
    /// callers can abort with their own domain errors.
    async fn transactional_update<D, T, E, F>(
        &self,
        key: &str,
        mutator: F,
    ) -> std::result::Result<T, E>
    where
        D: Document,
        T: Send,
        E: From<Error> + Send,
        F: FnMut(&mut D) -> std::result::Result<T, E> + Send;

    /// Fetch up to `limit` documents ordered by a ranking field, descending
    ///
    /// Documents without the field are omitted. Ties order by ascending
    /// document key so repeated queries return identical results.
    async fn query<D: Document>(&self, order_by: &str, limit: usize) -> Result<Vec<D>>;
}
