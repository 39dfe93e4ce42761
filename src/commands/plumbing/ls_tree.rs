use crate::areas::repository::Repository;
use crate::areas::session::Session;
use crate::artifacts::objects::object::DecodedObject;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::HashSet;
use std::io::Write;

impl Session {
    pub fn ls_tree(&self, address: &str, recursive: bool) -> anyhow::Result<()> {
        let repository = self.model().current_handle()?;
        let oid = repository.resolve(address)?;
        let tree_oid = Self::peel_to_tree(&repository, oid)?;

        for entry in repository.walk_tree(&tree_oid, recursive) {
            let (path, entry) = entry?;

            // with -r only the leaves are listed, like git
            if recursive && entry.is_tree() {
                continue;
            }

            writeln!(
                self.writer(),
                "{} {} {}\t{}",
                entry.mode,
                entry.object_type(),
                entry.oid,
                path.display()
            )?;
        }

        Ok(())
    }

    /// Follow tags and commits down to the tree they describe.
    fn peel_to_tree(repository: &Repository, mut oid: ObjectId) -> anyhow::Result<ObjectId> {
        let mut seen = HashSet::new();

        loop {
            if !seen.insert(oid.clone()) {
                anyhow::bail!("{oid} refers back to itself");
            }
            oid = match repository.load(&oid)? {
                DecodedObject::Tree(_) => return Ok(oid),
                DecodedObject::Commit(commit) => commit.tree_oid().clone(),
                DecodedObject::Tag(tag) => tag.target().clone(),
                DecodedObject::Blob(_) => anyhow::bail!("{oid} is a blob, not a tree object"),
            };
        }
    }
}
