use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::thread;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

/// Nothing listens on the discard port in CI, so requests fail fast.
const UNREACHABLE: &str = "http://127.0.0.1:9/api/v2";

fn qsync_cmd(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("qsync"));
    cmd.env("HOME", home)
        .env("USERPROFILE", home)
        .env("RUST_LOG", "info")
        .env("NO_COLOR", "1");
    cmd
}

/// Write `~/.config/qsync/config.yaml` under `home` and return the local root.
fn write_config(home: &Path, api_base: &str) -> PathBuf {
    let root = home.join("qiita");
    let dir = home.join(".config").join("qsync");
    fs::create_dir_all(&dir).expect("config dir");
    fs::write(
        dir.join("config.yaml"),
        format!(
            "default:\n  access_token: test-token\n  local_root: \"{}\"\n  api_base: \"{api_base}\"\n  timeout_secs: 5\n",
            root.display()
        ),
    )
    .expect("write config");
    root
}

/// Serve exactly one HTTP response on a local port; returns the api base.
fn serve_once(body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let base = format!("http://{}/api/v2", listener.local_addr().expect("addr"));
    thread::spawn(move || {
        let Ok((stream, _)) = listener.accept() else { return };
        let mut reader = BufReader::new(stream.try_clone().expect("clone"));
        loop {
            let mut line = String::new();
            if reader.read_line(&mut line).unwrap_or(0) == 0 || line == "\r\n" {
                break;
            }
        }
        let mut stream = stream;
        let reply = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let _ = stream.write_all(reply.as_bytes());
    });
    base
}

#[test]
fn missing_config_fails_with_its_path() {
    let home = TempDir::new().expect("home");

    qsync_cmd(home.path())
        .arg("pull")
        .assert()
        .failure()
        .stderr(contains("no config file found").and(contains("config.yaml")));
}

#[test]
fn explicit_config_flag_overrides_home() {
    let home = TempDir::new().expect("home");
    let elsewhere = TempDir::new().expect("elsewhere");
    write_config(elsewhere.path(), UNREACHABLE);

    qsync_cmd(home.path())
        .args(["post", "--title", "", "--tag", "rust", "--config"])
        .arg(elsewhere.path().join(".config/qsync/config.yaml"))
        .assert()
        .failure()
        .stderr(contains("title must not be empty"));
}

#[test]
fn unknown_blog_is_rejected() {
    let home = TempDir::new().expect("home");
    write_config(home.path(), UNREACHABLE);

    qsync_cmd(home.path())
        .args(["--blog", "team", "pull"])
        .assert()
        .failure()
        .stderr(contains("unknown blog 'team'"));
}

#[test]
fn post_with_empty_title_fails_before_any_request() {
    let home = TempDir::new().expect("home");
    let root = write_config(home.path(), UNREACHABLE);

    qsync_cmd(home.path())
        .args(["post", "--title", "   ", "--tag", "rust"])
        .assert()
        .failure()
        .stderr(contains("title must not be empty"))
        .stderr(contains("127.0.0.1:9").not());
    assert!(!root.exists(), "nothing may be written locally");
}

#[test]
fn post_prompts_for_title_on_stdin() {
    let home = TempDir::new().expect("home");
    write_config(home.path(), UNREACHABLE);

    qsync_cmd(home.path())
        .args(["post", "--tag", "rust"])
        .write_stdin("\n")
        .assert()
        .failure()
        .stderr(contains("Title:"))
        .stderr(contains("title must not be empty"));
}

#[test]
fn post_rejects_malformed_tag_flag() {
    let home = TempDir::new().expect("home");
    write_config(home.path(), UNREACHABLE);

    qsync_cmd(home.path())
        .args(["post", "--title", "Hello", "--tag", "rust:"])
        .assert()
        .failure()
        .stderr(contains("empty version"));
}

#[test]
fn push_of_unposted_draft_fails() {
    let home = TempDir::new().expect("home");
    write_config(home.path(), UNREACHABLE);
    let draft = home.path().join("draft.md");
    fs::write(&draft, "# not posted yet\n").expect("write draft");

    qsync_cmd(home.path())
        .arg("push")
        .arg(&draft)
        .assert()
        .failure()
        .stderr(contains("has not been posted yet"));
}

#[test]
fn pull_against_unreachable_service_fails() {
    let home = TempDir::new().expect("home");
    write_config(home.path(), UNREACHABLE);

    qsync_cmd(home.path())
        .arg("pull")
        .assert()
        .failure()
        .stderr(contains("pull failed"));
}

#[test]
fn pull_writes_articles_from_the_service() {
    let home = TempDir::new().expect("home");
    let base = serve_once(
        r#"[{"id":"42","title":"A","body":"hello\n","private":false,"tags":[{"name":"rust","versions":[]}],"created_at":"2023-01-01T00:00:00Z","updated_at":"2023-01-02T00:00:00Z","url":"https://qiita.com/alice/items/42"}]"#,
    );
    let root = write_config(home.path(), &base);

    qsync_cmd(home.path())
        .arg("pull")
        .assert()
        .success()
        .stdout(contains("1 written, 0 unchanged, 0 failed"))
        .stdout(contains("42.md"));

    let article = fs::read_to_string(root.join("2023/01/01/42.md")).expect("article");
    assert!(article.starts_with("---\nTitle: A\n"), "got:\n{article}");
    assert!(article.ends_with("hello\n"), "got:\n{article}");
}

#[test]
fn pull_exits_non_zero_when_an_article_fails() {
    let home = TempDir::new().expect("home");
    let base = serve_once(
        r#"[{"id":"ok","title":"A","body":"a","tags":[],"created_at":"2023-01-01T00:00:00Z","updated_at":"2023-01-02T00:00:00Z"},{"id":"bad","title":"B","body":"b","tags":[],"created_at":"yesterday","updated_at":"2023-01-02T00:00:00Z"}]"#,
    );
    let root = write_config(home.path(), &base);

    qsync_cmd(home.path())
        .arg("pull")
        .assert()
        .failure()
        .stdout(contains("1 written, 0 unchanged, 1 failed"))
        .stderr(contains("1 of 2 articles failed to pull"));

    assert!(root.join("2023/01/01/ok.md").is_file());
}

#[test]
fn pull_dry_run_writes_nothing() {
    let home = TempDir::new().expect("home");
    let base = serve_once(
        r#"[{"id":"42","title":"A","body":"a","tags":[],"created_at":"2023-01-01T00:00:00Z","updated_at":"2023-01-02T00:00:00Z"}]"#,
    );
    let root = write_config(home.path(), &base);

    qsync_cmd(home.path())
        .args(["pull", "--dry-run"])
        .assert()
        .success()
        .stdout(contains("[dry-run]"));

    assert!(!root.exists());
}
