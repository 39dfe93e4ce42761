use crate::areas::database::Database;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::TreeEntry;
use crate::errors::{StoreError, StoreResult};
use std::path::PathBuf;

struct Level {
    oid: ObjectId,
    prefix: PathBuf,
    entries: std::vec::IntoIter<TreeEntry>,
}

/// Depth-first walk over a tree's entries
///
/// A sub-tree is decoded only when the walk reaches it, right after its own
/// entry is yielded. Submodule entries point into another repository and are
/// never followed.
pub struct TreeWalk<'r> {
    database: &'r Database,
    recursive: bool,
    root: Option<ObjectId>,
    stack: Vec<Level>,
    pending: Option<(ObjectId, PathBuf)>,
    finished: bool,
}

impl<'r> TreeWalk<'r> {
    pub fn new(database: &'r Database, root: ObjectId, recursive: bool) -> Self {
        TreeWalk {
            database,
            recursive,
            root: Some(root),
            stack: Vec::new(),
            pending: None,
            finished: false,
        }
    }

    fn descend(&mut self, oid: ObjectId, prefix: PathBuf) -> StoreResult<()> {
        // content addressing rules this out unless the store was tampered with
        if self.stack.iter().any(|level| level.oid == oid) {
            return Err(StoreError::CorruptObject {
                address: Some(oid),
                reason: "tree contains itself".to_string(),
            });
        }

        let object = self.database.parse_object(&oid)?;
        let tree = object.as_tree().cloned().ok_or_else(|| StoreError::CorruptObject {
            address: Some(oid.clone()),
            reason: format!("expected a tree, found a {}", object.object_type()),
        })?;

        self.stack.push(Level {
            oid,
            prefix,
            entries: tree.into_entries().collect::<Vec<_>>().into_iter(),
        });

        Ok(())
    }

    fn step(&mut self) -> Option<StoreResult<(PathBuf, TreeEntry)>> {
        if let Some(root) = self.root.take()
            && let Err(e) = self.descend(root, PathBuf::new())
        {
            return Some(Err(e));
        }

        if let Some((oid, prefix)) = self.pending.take()
            && let Err(e) = self.descend(oid, prefix)
        {
            return Some(Err(e));
        }

        loop {
            let level = self.stack.last_mut()?;

            match level.entries.next() {
                Some(entry) => {
                    let path = level.prefix.join(entry.file_name());
                    if self.recursive && entry.is_tree() {
                        self.pending = Some((entry.oid.clone(), path.clone()));
                    }
                    return Some(Ok((path, entry)));
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

impl Iterator for TreeWalk<'_> {
    type Item = StoreResult<(PathBuf, TreeEntry)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let item = self.step();
        if !matches!(item, Some(Ok(_))) {
            self.finished = true;
        }

        item
    }
}
