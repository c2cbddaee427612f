use std::path::Path;

use chrono::{DateTime, Utc};
use filetime::{set_file_mtime, FileTime};
use qsync_core::{
    entry::{local_path, read_entry},
    EntryError, EntryId,
};
use rstest::rstest;
use tempfile::TempDir;

#[test]
fn read_entry_reports_mtime_with_nanoseconds() {
    let tmp = TempDir::new().expect("tmp");
    let path = tmp.path().join("42.md");
    std::fs::write(
        &path,
        "---\nTitle: A\nTags: []\nDate: 2023-01-01T00:00:00+00:00\nURL: ''\nID: '42'\nPrivate: false\n---\n\nbody\n",
    )
    .expect("write");

    let stamp: DateTime<Utc> = "2023-01-02T03:04:05.123456789Z".parse().unwrap();
    set_file_mtime(&path, FileTime::from_system_time(stamp.into())).expect("set mtime");

    let entry = read_entry(&path).expect("read");
    assert_eq!(entry.id(), &EntryId::from("42"));
    assert_eq!(entry.content, "body\n");
    assert_eq!(entry.last_modified, Some(stamp.into()));
}

#[test]
fn read_entry_on_missing_file_is_io_error_with_path() {
    let tmp = TempDir::new().expect("tmp");
    let err = read_entry(&tmp.path().join("missing.md")).unwrap_err();
    assert!(matches!(err, EntryError::Io { .. }), "got: {err}");
    assert!(err.to_string().contains("missing.md"));
}

#[rstest]
#[case("2023-01-01T00:00:00Z", "2023/01/01/42.md")]
#[case("2023-12-31T23:59:59Z", "2023/12/31/42.md")]
#[case("2024-02-29T12:00:00+09:00", "2024/02/29/42.md")]
fn local_path_is_deterministic(#[case] date: &str, #[case] expected: &str) {
    let mut entry = qsync_core::Entry::default();
    entry.header.id = EntryId::from("42");
    entry.header.date = Some(DateTime::parse_from_rfc3339(date).unwrap());

    let root = Path::new("/root-dir");
    let first = local_path(root, &entry).expect("path");
    let second = local_path(root, &entry.clone()).expect("path");
    assert_eq!(first, second);
    assert_eq!(first, root.join(expected));
}
