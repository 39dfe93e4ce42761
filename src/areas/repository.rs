use crate::areas::database::{Database, Objects};
use crate::artifacts::graph::ancestry::{Ancestry, TraversalMode};
use crate::artifacts::graph::tree_walk::TreeWalk;
use crate::artifacts::objects::object::DecodedObject;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::StoreResult;
use std::path::Path;

/// Handle on one opened repository
///
/// Immutable once created: opening another repository produces a new handle
/// instead of mutating this one, so work started against it keeps seeing the
/// same object database.
#[derive(Debug, Clone)]
pub struct Repository {
    path: Box<Path>,
    database: Database,
    generation: u64,
}

impl Repository {
    pub(crate) fn new(git_dir: Box<Path>) -> Self {
        let database = Database::new(git_dir.join("objects").into_boxed_path());

        Repository {
            path: git_dir,
            database,
            generation: 0,
        }
    }

    pub(crate) fn with_generation(self, generation: u64) -> Self {
        Repository { generation, ..self }
    }

    /// The git directory (`<root>/.git`, or the root itself when bare)
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Which `open` produced this handle; later opens get larger numbers
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn objects(&self) -> Objects {
        self.database.objects()
    }

    pub fn load(&self, object_id: &ObjectId) -> StoreResult<DecodedObject> {
        self.database.parse_object(object_id)
    }

    pub fn resolve(&self, text: &str) -> StoreResult<ObjectId> {
        self.database.resolve(text)
    }

    /// Lazily walk commit history starting at (and including) `start`.
    pub fn ancestry(&self, start: &ObjectId, mode: TraversalMode) -> Ancestry<'_> {
        Ancestry::new(&self.database, start.clone(), mode)
    }

    /// Lazily walk the entries of a tree, descending into sub-trees if `recursive`.
    pub fn walk_tree(&self, tree: &ObjectId, recursive: bool) -> TreeWalk<'_> {
        TreeWalk::new(&self.database, tree.clone(), recursive)
    }
}
