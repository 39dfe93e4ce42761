use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::raw_object::RawObject;
use crate::artifacts::objects::tag::Tag;
use crate::artifacts::objects::tree::Tree;
use crate::errors::StoreResult;
use bytes::Bytes;

pub trait Unpackable {
    /// Parse a payload whose header has already been split off.
    fn deserialize(payload: Bytes) -> StoreResult<Self>
    where
        Self: Sized;
}

pub trait Object {
    fn object_type(&self) -> ObjectType;

    /// Rendering in the shape of `git cat-file -p`.
    fn display(&self) -> String;
}

/// A parsed object of any of the four kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedObject {
    Blob(Box<Blob>),
    Tree(Box<Tree>),
    Commit(Box<Commit>),
    Tag(Box<Tag>),
}

impl DecodedObject {
    /// Dispatch on the type tag; an object is never reinterpreted as another kind.
    pub fn parse(raw: RawObject) -> StoreResult<Self> {
        let object_type = raw.object_type();
        let payload = raw.into_payload();

        Ok(match object_type {
            ObjectType::Blob => DecodedObject::Blob(Box::new(Blob::deserialize(payload)?)),
            ObjectType::Tree => DecodedObject::Tree(Box::new(Tree::deserialize(payload)?)),
            ObjectType::Commit => {
                DecodedObject::Commit(Box::new(Commit::deserialize(payload)?))
            }
            ObjectType::Tag => DecodedObject::Tag(Box::new(Tag::deserialize(payload)?)),
        })
    }

    pub fn as_blob(&self) -> Option<&Blob> {
        match self {
            DecodedObject::Blob(blob) => Some(blob),
            _ => None,
        }
    }

    pub fn as_tree(&self) -> Option<&Tree> {
        match self {
            DecodedObject::Tree(tree) => Some(tree),
            _ => None,
        }
    }

    pub fn as_commit(&self) -> Option<&Commit> {
        match self {
            DecodedObject::Commit(commit) => Some(commit),
            _ => None,
        }
    }
}

impl Object for DecodedObject {
    fn object_type(&self) -> ObjectType {
        match self {
            DecodedObject::Blob(blob) => blob.object_type(),
            DecodedObject::Tree(tree) => tree.object_type(),
            DecodedObject::Commit(commit) => commit.object_type(),
            DecodedObject::Tag(tag) => tag.object_type(),
        }
    }

    fn display(&self) -> String {
        match self {
            DecodedObject::Blob(blob) => blob.display(),
            DecodedObject::Tree(tree) => tree.display(),
            DecodedObject::Commit(commit) => commit.display(),
            DecodedObject::Tag(tag) => tag.display(),
        }
    }
}
