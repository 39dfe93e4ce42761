use common::command::{History, history, repository, run_bitview_command};
use common::store::{AUTHOR, TestRepository, fake_oid};
use fake::Fake;
use fake::faker::lorem::en::Words;
use predicates::prelude::predicate;
use rstest::rstest;

mod common;

fn stdout_of(assert: assert_cmd::assert::Assert) -> Result<String, Box<dyn std::error::Error>> {
    Ok(String::from_utf8(assert.get_output().stdout.clone())?)
}

#[rstest]
fn list_objects_sorted(history: History) -> Result<(), Box<dyn std::error::Error>> {
    let mut expected = [
        &history.one,
        &history.two,
        &history.three,
        &history.c1,
        &history.c2,
        &history.c3,
    ]
    .iter()
    .map(|oid| oid.to_string())
    .collect::<Vec<_>>();
    expected.sort();

    let output = stdout_of(
        run_bitview_command(history.repository.path(), &["objects", "--sorted"])
            .assert()
            .success(),
    )?;
    let lines = output.lines().collect::<Vec<_>>();

    assert_eq!(lines.len(), 12);
    assert!(lines.is_sorted());
    for oid in &expected {
        assert!(lines.contains(&oid.as_str()));
    }

    Ok(())
}

#[rstest]
fn list_objects_with_type(history: History) -> Result<(), Box<dyn std::error::Error>> {
    run_bitview_command(history.repository.path(), &["objects", "--with-type"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("{} commit", history.c1)))
        .stdout(predicate::str::contains(format!("{} tree", history.root)))
        .stdout(predicate::str::contains(format!("{} blob", history.three)));

    Ok(())
}

#[rstest]
fn cat_file_prints_blob_content(repository: TestRepository) -> Result<(), Box<dyn std::error::Error>> {
    let content = Words(5..10).fake::<Vec<String>>().join(" ");
    let oid = repository.blob(&content);

    run_bitview_command(repository.path(), &["cat-file", "-p", oid.as_ref()])
        .assert()
        .success()
        .stdout(predicate::eq(content));

    Ok(())
}

#[rstest]
fn cat_file_prints_tree_entries(history: History) -> Result<(), Box<dyn std::error::Error>> {
    let located = bitview::RepositoryLocator::locate(history.repository.path())?;
    let object = located.load(&history.root)?;
    let a = &object.as_tree().ok_or("not a tree")?.entries()[1].oid;
    let expected = format!(
        "100644 blob {}\t1.txt\n040000 tree {a}\ta\n",
        history.one
    );

    let output = stdout_of(
        run_bitview_command(history.repository.path(), &["cat-file", "-p", history.root.as_ref()])
            .assert()
            .success(),
    )?;

    pretty_assertions::assert_eq!(output, expected);

    Ok(())
}

#[rstest]
fn cat_file_prints_type(history: History) -> Result<(), Box<dyn std::error::Error>> {
    run_bitview_command(history.repository.path(), &["cat-file", "-t", history.c3.as_ref()])
        .assert()
        .success()
        .stdout(predicate::eq("commit\n"));

    Ok(())
}

#[rstest]
fn cat_file_prints_payload_size(history: History) -> Result<(), Box<dyn std::error::Error>> {
    let payload = common::store::commit_payload(
        &history.root,
        &[&history.c2],
        "Third commit\n\nWith a body.",
    );

    run_bitview_command(history.repository.path(), &["cat-file", "-s", history.c3.as_ref()])
        .assert()
        .success()
        .stdout(predicate::eq(format!("{}\n", payload.len())));

    Ok(())
}

#[rstest]
fn cat_file_accepts_short_address(history: History) -> Result<(), Box<dyn std::error::Error>> {
    run_bitview_command(
        history.repository.path(),
        &["cat-file", "-p", &history.two.as_ref()[..8]],
    )
    .assert()
    .success()
    .stdout(predicate::eq("two\n"));

    Ok(())
}

#[rstest]
fn cat_file_reproduces_non_utf8_commit_bytes(
    repository: TestRepository,
) -> Result<(), Box<dyn std::error::Error>> {
    let tree = repository.tree(&[]);
    let mut payload = format!(
        "tree {tree}\nauthor {AUTHOR} 1700000000 +0000\nencoding ISO-8859-1\n\n"
    )
    .into_bytes();
    payload.extend_from_slice(b"R\xe9sum\xe9 na\xefve\n");
    let oid = repository.store("commit", &payload);

    let assert = run_bitview_command(repository.path(), &["cat-file", "-p", oid.as_ref()])
        .assert()
        .success();

    pretty_assertions::assert_eq!(assert.get_output().stdout, payload);

    Ok(())
}

#[rstest]
fn log_skips_author_lines_of_anonymous_commit(
    repository: TestRepository,
) -> Result<(), Box<dyn std::error::Error>> {
    let tree = repository.tree(&[]);
    let oid = repository.store("commit", format!("tree {tree}\n\nImported\n").as_bytes());

    run_bitview_command(repository.path(), &["log", oid.as_ref()])
        .assert()
        .success()
        .stdout(predicate::eq(format!("commit {oid}\n\n    Imported\n")));

    Ok(())
}

#[rstest]
fn ls_tree_recursive_lists_leaves_of_commit(history: History) -> Result<(), Box<dyn std::error::Error>> {
    let expected = format!(
        "100644 blob {}\t1.txt\n100644 blob {}\ta/2.txt\n100644 blob {}\ta/b/3.txt\n",
        history.one, history.two, history.three
    );

    let output = stdout_of(
        run_bitview_command(history.repository.path(), &["ls-tree", "-r", history.c3.as_ref()])
            .assert()
            .success(),
    )?;

    pretty_assertions::assert_eq!(output, expected);

    Ok(())
}

#[rstest]
fn log_oneline_walks_first_parents(history: History) -> Result<(), Box<dyn std::error::Error>> {
    let expected = format!(
        "{} Third commit\n{} Second commit\n{} First commit\n",
        history.c3.to_short_oid(),
        history.c2.to_short_oid(),
        history.c1.to_short_oid()
    );

    let output = stdout_of(
        run_bitview_command(history.repository.path(), &["log", "--oneline", history.c3.as_ref()])
            .assert()
            .success(),
    )?;

    pretty_assertions::assert_eq!(output, expected);

    Ok(())
}

#[rstest]
fn log_medium_format(history: History) -> Result<(), Box<dyn std::error::Error>> {
    let expected = format!(
        "commit {}\n\
         Author: A U Thor <author@example.com>\n\
         Date:   Tue Nov 14 22:13:20 2023 +0000\n\
         \n    Third commit\n    \n    With a body.\n\
         \n\
         commit {}\n\
         Author: A U Thor <author@example.com>\n\
         Date:   Tue Nov 14 22:13:20 2023 +0000\n\
         \n    Second commit\n",
        history.c3, history.c2
    );

    let output = stdout_of(
        run_bitview_command(history.repository.path(), &["log", history.c2.as_ref()])
            .assert()
            .success(),
    )?;
    let from_head = stdout_of(
        run_bitview_command(history.repository.path(), &["log", history.c3.as_ref()])
            .assert()
            .success(),
    )?;

    assert!(from_head.starts_with(&expected));
    assert!(!output.contains(history.c3.as_ref()));

    Ok(())
}

#[rstest]
fn log_reports_corrupt_history(history: History) -> Result<(), Box<dyn std::error::Error>> {
    let empty = history.repository.tree(&[]);
    history
        .repository
        .commit_at(&history.c1, &empty, &[&history.c3], "First commit");

    run_bitview_command(history.repository.path(), &["log", "--oneline", history.c3.as_ref()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("corrupt history"));

    Ok(())
}

#[rstest]
fn fsck_passes_on_clean_store(history: History) -> Result<(), Box<dyn std::error::Error>> {
    run_bitview_command(history.repository.path(), &["fsck"])
        .assert()
        .success()
        .stdout(predicate::str::contains("checked 12 objects, 0 corrupt"));

    Ok(())
}

#[rstest]
fn fsck_flags_misplaced_and_truncated_objects(
    history: History,
) -> Result<(), Box<dyn std::error::Error>> {
    history
        .repository
        .store_at(&fake_oid('0'), "blob", b"not my hash");
    history
        .repository
        .write_raw(fake_oid('1').as_ref(), b"blob 99\0short");

    run_bitview_command(history.repository.path(), &["fsck"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("checked 14 objects, 2 corrupt"))
        .stdout(predicate::str::contains(fake_oid('0').as_ref()))
        .stdout(predicate::str::contains(fake_oid('1').as_ref()));

    Ok(())
}

#[rstest]
fn repository_option_and_environment_pick_the_store(
    history: History,
) -> Result<(), Box<dyn std::error::Error>> {
    let elsewhere = assert_fs::TempDir::new()?;
    let repo = history.repository.path().display().to_string();

    run_bitview_command(elsewhere.path(), &["-C", &repo, "cat-file", "-t", history.c1.as_ref()])
        .assert()
        .success()
        .stdout(predicate::eq("commit\n"));

    run_bitview_command(elsewhere.path(), &["cat-file", "-t", history.root.as_ref()])
        .env("BITVIEW_REPO", &repo)
        .assert()
        .success()
        .stdout(predicate::eq("tree\n"));

    Ok(())
}

#[test]
fn outside_a_repository_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;

    run_bitview_command(dir.path(), &["objects"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a git repository"));

    Ok(())
}

#[rstest]
#[case("cafe")]
#[case("0123456789012345678901234567890123456789")]
fn unknown_address_fails(
    repository: TestRepository,
    #[case] address: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    run_bitview_command(repository.path(), &["cat-file", "-p", address])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));

    Ok(())
}

#[rstest]
fn cat_file_requires_a_mode(history: History) -> Result<(), Box<dyn std::error::Error>> {
    run_bitview_command(history.repository.path(), &["cat-file", history.c1.as_ref()])
        .assert()
        .failure();

    Ok(())
}
