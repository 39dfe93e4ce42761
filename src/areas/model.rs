use crate::areas::database::Objects;
use crate::areas::locator::RepositoryLocator;
use crate::areas::repository::Repository;
use crate::artifacts::objects::object::DecodedObject;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{StoreError, StoreResult};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::info;

/// The currently opened repository
///
/// Holds at most one handle. `open` swaps it wholesale; anyone who already
/// fetched the previous handle keeps a working reference to it until dropped.
#[derive(Debug, Default)]
pub struct RepositoryModel {
    current: RwLock<Option<Arc<Repository>>>,
    generation: AtomicU64,
}

impl RepositoryModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `path` and make it the current repository
    ///
    /// On failure the previously opened repository (if any) stays current and
    /// no generation is used up.
    pub fn open(&self, path: impl AsRef<Path>) -> StoreResult<Arc<Repository>> {
        let located = RepositoryLocator::locate(path)?;

        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let repository = Arc::new(located.with_generation(generation));
        *current = Some(repository.clone());
        drop(current);

        info!(
            git_dir = %repository.path().display(),
            generation,
            "opened repository"
        );

        Ok(repository)
    }

    pub fn close(&self) {
        self.current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    pub fn current_handle(&self) -> StoreResult<Arc<Repository>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(StoreError::NoRepositoryOpen)
    }

    /// Every loose object address of the current repository, lazily
    pub fn enumerate_objects(&self) -> StoreResult<Objects> {
        Ok(self.current_handle()?.objects())
    }

    /// Like [`Self::enumerate_objects`], collected and sorted by address
    pub fn enumerate_objects_sorted(&self) -> StoreResult<Vec<ObjectId>> {
        let mut objects = self.enumerate_objects()?.collect::<StoreResult<Vec<_>>>()?;
        objects.sort();

        Ok(objects)
    }

    pub fn load(&self, object_id: &ObjectId) -> StoreResult<DecodedObject> {
        self.current_handle()?.load(object_id)
    }

    pub fn resolve(&self, text: &str) -> StoreResult<ObjectId> {
        self.current_handle()?.resolve(text)
    }

    /// Decode on tokio's blocking pool
    ///
    /// The handle is captured when this is called, not when the future is
    /// first polled, so an `open` that happens while the load is in flight
    /// does not change what it reads.
    pub fn load_async(
        &self,
        object_id: ObjectId,
    ) -> impl Future<Output = StoreResult<DecodedObject>> + Send + use<> {
        let repository = self.current_handle();

        async move {
            let repository = repository?;
            tokio::task::spawn_blocking(move || repository.load(&object_id))
                .await
                .map_err(|e| StoreError::Io(std::io::Error::other(e)))?
        }
    }
}
