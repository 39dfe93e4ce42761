use crate::areas::session::Session;
use crate::artifacts::objects::object::{DecodedObject, Object};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatFileMode {
    /// Pretty-print the content according to its type
    Pretty,
    /// Print the type tag only
    Type,
    /// Print the payload size only
    Size,
}

impl Session {
    pub fn cat_file(&self, address: &str, mode: CatFileMode) -> anyhow::Result<()> {
        let repository = self.model().current_handle()?;
        let oid = repository.resolve(address)?;

        match mode {
            CatFileMode::Type => {
                let object_type = repository.database().get_object_type(&oid)?;
                writeln!(self.writer(), "{object_type}")?;
            }
            CatFileMode::Size => {
                let raw = repository.database().load(&oid)?;
                writeln!(self.writer(), "{}", raw.declared_length())?;
            }
            CatFileMode::Pretty => match repository.load(&oid)? {
                // binary-safe: payloads go out byte for byte
                DecodedObject::Blob(blob) => self.writer().write_all(blob.content())?,
                DecodedObject::Tree(tree) if tree.is_empty() => {}
                DecodedObject::Tree(tree) => writeln!(self.writer(), "{}", tree.display())?,
                DecodedObject::Commit(commit) => self.writer().write_all(commit.as_bytes())?,
                DecodedObject::Tag(tag) => self.writer().write_all(tag.as_bytes())?,
            },
        }

        Ok(())
    }
}
