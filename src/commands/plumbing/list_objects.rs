use crate::areas::session::Session;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::StoreResult;
use std::io::Write;

#[derive(Debug, Clone, Copy, Default)]
pub struct ListObjectsOptions {
    /// Sort by address instead of directory order
    pub sorted: bool,
    /// Decode each object's header and print its type next to the address
    pub with_type: bool,
}

impl Session {
    pub fn list_objects(&self, opts: ListObjectsOptions) -> anyhow::Result<()> {
        let repository = self.model().current_handle()?;

        let objects: Box<dyn Iterator<Item = anyhow::Result<ObjectId>>> = if opts.sorted {
            let mut all = repository.objects().collect::<StoreResult<Vec<_>>>()?;
            all.sort();
            Box::new(all.into_iter().map(Ok))
        } else {
            Box::new(repository.objects().map(|oid| oid.map_err(Into::into)))
        };

        for oid in objects {
            let oid = oid?;

            if opts.with_type {
                let object_type = repository.database().get_object_type(&oid)?;
                writeln!(self.writer(), "{oid} {object_type}")?;
            } else {
                writeln!(self.writer(), "{oid}")?;
            }
        }

        Ok(())
    }
}
