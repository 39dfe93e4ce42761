use crate::areas::database::Database;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{StoreError, StoreResult};
use std::collections::HashMap;
use tracing::trace;

/// Which parents an ancestry walk follows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TraversalMode {
    /// Only the first parent of every commit: the mainline
    #[default]
    FirstParent,
    /// Every parent, so merged-in history is visited too
    AllParents,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    /// Still has parents left to explore (on the current path)
    InProgress,
    Done,
}

#[derive(Debug)]
struct Frame {
    oid: ObjectId,
    parents: std::vec::IntoIter<ObjectId>,
}

/// Lazy walk over a commit's history, one decode per yielded commit
///
/// Commits come out in depth-first pre-order starting with the start commit.
/// A commit already visited through another path (a merge base) is skipped;
/// reaching a commit that is its own ancestor yields
/// [`StoreError::CorruptHistory`] and ends the walk.
pub struct Ancestry<'r> {
    database: &'r Database,
    mode: TraversalMode,
    start: Option<ObjectId>,
    stack: Vec<Frame>,
    visits: HashMap<ObjectId, Visit>,
    finished: bool,
}

impl<'r> Ancestry<'r> {
    pub fn new(database: &'r Database, start: ObjectId, mode: TraversalMode) -> Self {
        Ancestry {
            database,
            mode,
            start: Some(start),
            stack: Vec::new(),
            visits: HashMap::new(),
            finished: false,
        }
    }

    fn visit(&mut self, oid: ObjectId) -> StoreResult<(ObjectId, Commit)> {
        let object = self.database.parse_object(&oid)?;
        let commit = object.as_commit().cloned().ok_or_else(|| StoreError::CorruptObject {
            address: Some(oid.clone()),
            reason: format!("expected a commit in history, found a {}", object.object_type()),
        })?;

        let parents = match self.mode {
            TraversalMode::FirstParent => commit.parent().into_iter().cloned().collect(),
            TraversalMode::AllParents => commit.parents().to_vec(),
        };
        trace!(oid = %oid, parents = parents.len(), "ancestry step");

        self.visits.insert(oid.clone(), Visit::InProgress);
        self.stack.push(Frame {
            oid: oid.clone(),
            parents: parents.into_iter(),
        });

        Ok((oid, commit))
    }

    fn next_unvisited(&mut self) -> Option<StoreResult<ObjectId>> {
        loop {
            let frame = self.stack.last_mut()?;

            match frame.parents.next() {
                Some(parent) => match self.visits.get(&parent) {
                    None => return Some(Ok(parent)),
                    Some(Visit::Done) => continue,
                    Some(Visit::InProgress) => {
                        return Some(Err(StoreError::CorruptHistory(parent)));
                    }
                },
                None => {
                    let oid = frame.oid.clone();
                    self.stack.pop();
                    self.visits.insert(oid, Visit::Done);
                }
            }
        }
    }
}

impl Iterator for Ancestry<'_> {
    type Item = StoreResult<(ObjectId, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let next = match self.start.take() {
            Some(start) => Ok(start),
            None => match self.next_unvisited() {
                Some(next) => next,
                None => {
                    self.finished = true;
                    return None;
                }
            },
        };

        let result = next.and_then(|oid| self.visit(oid));
        if result.is_err() {
            self.finished = true;
        }

        Some(result)
    }
}
