use assert_fs::TempDir;
use bitview::ObjectId;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use sha1::{Digest, Sha1};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const AUTHOR: &str = "A U Thor <author@example.com>";

/// A throwaway repository whose loose objects are written by hand
pub struct TestRepository {
    dir: TempDir,
}

impl TestRepository {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        std::fs::create_dir_all(dir.path().join(".git").join("objects"))
            .expect("Failed to create objects dir");
        std::fs::write(dir.path().join(".git").join("HEAD"), "ref: refs/heads/master\n")
            .expect("Failed to write HEAD");

        TestRepository { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn objects_path(&self) -> PathBuf {
        self.dir.path().join(".git").join("objects")
    }

    /// Compress `content` verbatim and store it under `oid`, valid or not.
    pub fn write_raw(&self, oid: &str, content: &[u8]) {
        let path = self.objects_path().join(&oid[..2]).join(&oid[2..]);
        std::fs::create_dir_all(path.parent().expect("object path has a parent"))
            .expect("Failed to create shard dir");

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(content).expect("Failed to compress");
        std::fs::write(path, encoder.finish().expect("Failed to compress"))
            .expect("Failed to write object");
    }

    /// Store a well-formed object under its real hash.
    pub fn store(&self, object_type: &str, payload: &[u8]) -> ObjectId {
        let content = encode(object_type, payload);
        let oid = format!("{:x}", Sha1::digest(&content));
        self.write_raw(&oid, &content);

        ObjectId::try_parse(oid).expect("sha1 is a valid object id")
    }

    /// Store a well-formed object under an address of our choosing.
    pub fn store_at(&self, oid: &ObjectId, object_type: &str, payload: &[u8]) {
        self.write_raw(oid.as_ref(), &encode(object_type, payload));
    }

    pub fn blob(&self, content: &str) -> ObjectId {
        self.store("blob", content.as_bytes())
    }

    pub fn tree(&self, entries: &[(&str, &str, &ObjectId)]) -> ObjectId {
        self.store("tree", &tree_payload(entries))
    }

    pub fn commit(&self, tree: &ObjectId, parents: &[&ObjectId], message: &str) -> ObjectId {
        self.store("commit", commit_payload(tree, parents, message).as_bytes())
    }

    pub fn commit_at(&self, oid: &ObjectId, tree: &ObjectId, parents: &[&ObjectId], message: &str) {
        self.store_at(oid, "commit", commit_payload(tree, parents, message).as_bytes());
    }
}

pub fn encode(object_type: &str, payload: &[u8]) -> Vec<u8> {
    let mut content = format!("{object_type} {}\0", payload.len()).into_bytes();
    content.extend_from_slice(payload);
    content
}

pub fn tree_payload(entries: &[(&str, &str, &ObjectId)]) -> Vec<u8> {
    let mut payload = Vec::new();
    for (mode, name, oid) in entries {
        payload.extend_from_slice(format!("{mode} {name}\0").as_bytes());
        payload.extend_from_slice(&oid.to_raw());
    }
    payload
}

pub fn commit_payload(tree: &ObjectId, parents: &[&ObjectId], message: &str) -> String {
    let mut lines = vec![format!("tree {tree}")];
    for parent in parents {
        lines.push(format!("parent {parent}"));
    }
    lines.push(format!("author {AUTHOR} 1700000000 +0000"));
    lines.push(format!("committer {AUTHOR} 1700000000 +0000"));
    lines.push(String::new());
    lines.push(format!("{message}\n"));

    lines.join("\n")
}

/// An address that nothing hashes to in practice
pub fn fake_oid(fill: char) -> ObjectId {
    ObjectId::try_parse(fill.to_string().repeat(40)).expect("hex fill char")
}
