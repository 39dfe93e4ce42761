use crate::artifacts::objects::object::{DecodedObject, Object};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::raw_object::RawObject;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::errors::{StoreError, StoreResult};
use bytes::Bytes;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Shortest prefix accepted when resolving abbreviated addresses
pub const MIN_PREFIX_LENGTH: usize = 4;

/// Read-only view of a loose object database (`.git/objects`)
///
/// Every method reads from disk on demand; nothing is cached, so decodes are
/// independent of each other and safe to run from several threads at once.
#[derive(Debug, Clone)]
pub struct Database {
    path: Box<Path>,
}

// TODO: read packfiles so objects that `git gc` moved out of the loose store stay visible
impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn object_path(&self, object_id: &ObjectId) -> PathBuf {
        object_id.to_path_in(&self.path)
    }

    /// Read, inflate and split the object stored under `object_id`.
    pub fn load(&self, object_id: &ObjectId) -> StoreResult<RawObject> {
        let object_content = self.read_object(object_id)?;

        RawObject::parse(object_content).map_err(|e| e.at(object_id))
    }

    pub fn parse_object(&self, object_id: &ObjectId) -> StoreResult<DecodedObject> {
        let raw = self.load(object_id)?;
        debug!(oid = %object_id, object_type = %raw.object_type(), size = raw.declared_length(), "decoded object");

        DecodedObject::parse(raw).map_err(|e| e.at(object_id))
    }

    pub fn get_object_type(&self, object_id: &ObjectId) -> StoreResult<ObjectType> {
        Ok(self.load(object_id)?.object_type())
    }

    /// Check that the object's content hashes to the address it is stored under
    ///
    /// The regular decode path does not do this, so a store with mismatching
    /// hashes stays browsable.
    pub fn verify(&self, object_id: &ObjectId) -> StoreResult<bool> {
        let raw = self.load(object_id)?;

        Ok(raw.hash_hex() == object_id.as_ref())
    }

    /// Decode, parse and hash-check one object, reporting the first problem.
    pub fn check(&self, object_id: &ObjectId) -> StoreResult<ObjectType> {
        let raw = self.load(object_id)?;
        if raw.hash_hex() != object_id.as_ref() {
            return Err(StoreError::CorruptObject {
                address: Some(object_id.clone()),
                reason: format!("content hashes to {}", raw.hash_hex()),
            });
        }

        let object = DecodedObject::parse(raw).map_err(|e| e.at(object_id))?;
        Ok(object.object_type())
    }

    /// Lazy walk over every loose object address
    ///
    /// Each call starts a fresh directory walk. Order is whatever the
    /// filesystem returns; sort explicitly if you need determinism.
    pub fn objects(&self) -> Objects {
        let walker = self.path.is_dir().then(|| {
            WalkDir::new(&self.path)
                .min_depth(2)
                .max_depth(2)
                .into_iter()
        });

        Objects { walker }
    }

    /// Find all objects whose OID starts with the given prefix.
    ///
    /// For prefixes of 2+ characters only the matching shard directory is read.
    pub fn find_objects_by_prefix(&self, prefix: &str) -> StoreResult<Vec<ObjectId>> {
        if prefix.len() > OBJECT_ID_LENGTH || !prefix.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(StoreError::InvalidAddress(prefix.to_string()));
        }
        let prefix = prefix.to_ascii_lowercase();

        let mut matches = Vec::new();

        if prefix.len() >= 2 {
            let (dir_name, file_prefix) = prefix.split_at(2);
            let dir_path = self.path.join(dir_name);

            if dir_path.is_dir() {
                for entry in std::fs::read_dir(&dir_path)? {
                    let file_name = entry?.file_name();
                    let file_name = file_name.to_string_lossy();

                    if file_name.starts_with(file_prefix)
                        && let Some(oid) = ObjectId::from_shard(dir_name, &file_name)
                    {
                        matches.push(oid);
                    }
                }
            }
        } else {
            for oid in self.objects() {
                let oid = oid?;
                if oid.as_ref().starts_with(&prefix) {
                    matches.push(oid);
                }
            }
        }

        matches.sort();
        trace!(%prefix, matches = matches.len(), "prefix lookup");
        Ok(matches)
    }

    /// Resolve a full address or an unambiguous abbreviation of one.
    pub fn resolve(&self, text: &str) -> StoreResult<ObjectId> {
        if text.len() == OBJECT_ID_LENGTH {
            return ObjectId::try_parse(text);
        }
        if text.len() < MIN_PREFIX_LENGTH {
            return Err(StoreError::InvalidAddress(text.to_string()));
        }

        let mut candidates = self.find_objects_by_prefix(text)?;
        match candidates.len() {
            0 => Err(StoreError::ObjectNotFound(text.to_string())),
            1 => Ok(candidates.remove(0)),
            _ => Err(StoreError::AmbiguousAddress {
                prefix: text.to_string(),
                candidates,
            }),
        }
    }

    fn read_object(&self, object_id: &ObjectId) -> StoreResult<Bytes> {
        let object_path = self.object_path(object_id);

        let object_content = std::fs::read(&object_path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => StoreError::ObjectNotFound(object_id.to_string()),
            _ => StoreError::Io(e),
        })?;

        Self::decompress(&object_content).map_err(|e| e.at(object_id))
    }

    fn decompress(data: &[u8]) -> StoreResult<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .map_err(|e| StoreError::corrupt(format!("unable to decompress: {e}")))?;

        Ok(decompressed_content.into())
    }
}

/// Restartable by calling [`Database::objects`] again
pub struct Objects {
    walker: Option<walkdir::IntoIter>,
}

impl Iterator for Objects {
    type Item = StoreResult<ObjectId>;

    fn next(&mut self) -> Option<Self::Item> {
        let walker = self.walker.as_mut()?;

        loop {
            let entry = match walker.next()? {
                Ok(entry) => entry,
                Err(e) => return Some(Err(StoreError::Io(e.into()))),
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let dir_name = entry
                .path()
                .parent()
                .and_then(Path::file_name)
                .and_then(|name| name.to_str());
            let file_name = entry.file_name().to_str();

            if let (Some(dir_name), Some(file_name)) = (dir_name, file_name)
                && let Some(oid) = ObjectId::from_shard(dir_name, file_name)
            {
                return Some(Ok(oid));
            }
        }
    }
}
