use crate::common::store::TestRepository;
use assert_cmd::Command;
use bitview::ObjectId;
use rstest::fixture;
use std::path::Path;

/// Three commits over a small nested tree
///
/// ```text
/// c1: 1.txt
/// c2: 1.txt a/2.txt
/// c3: 1.txt a/2.txt a/b/3.txt
/// ```
pub struct History {
    pub repository: TestRepository,
    pub one: ObjectId,
    pub two: ObjectId,
    pub three: ObjectId,
    pub root: ObjectId,
    pub c1: ObjectId,
    pub c2: ObjectId,
    pub c3: ObjectId,
}

#[fixture]
pub fn repository() -> TestRepository {
    TestRepository::new()
}

#[fixture]
pub fn history(repository: TestRepository) -> History {
    let one = repository.blob("one\n");
    let two = repository.blob("two\n");
    let three = repository.blob("three\n");

    let first_root = repository.tree(&[("100644", "1.txt", &one)]);
    let c1 = repository.commit(&first_root, &[], "First commit");

    let a = repository.tree(&[("100644", "2.txt", &two)]);
    let second_root = repository.tree(&[("100644", "1.txt", &one), ("40000", "a", &a)]);
    let c2 = repository.commit(&second_root, &[&c1], "Second commit");

    let b = repository.tree(&[("100644", "3.txt", &three)]);
    let a = repository.tree(&[("100644", "2.txt", &two), ("40000", "b", &b)]);
    let root = repository.tree(&[("100644", "1.txt", &one), ("40000", "a", &a)]);
    let c3 = repository.commit(&root, &[&c2], "Third commit\n\nWith a body.");

    History {
        repository,
        one,
        two,
        three,
        root,
        c1,
        c2,
        c3,
    }
}

pub fn run_bitview_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("bitview").expect("Failed to find bitview binary");
    cmd.current_dir(dir)
        .env_remove("BITVIEW_REPO")
        .env("NO_COLOR", "1")
        .args(args);
    cmd
}
