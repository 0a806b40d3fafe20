use axum::http::StatusCode;
use ncsync::{path::RelativePath, RemoteEntry, UploadEntry};
use ncsynctl::storage::{AccountInfo, Delete, List, Upload};

use crate::{dataset::SCENARIO_A, harness::Harness, init_log, stubs::server::Server};

// "user:secret"
const AUTHORIZATION: &str = "Basic dXNlcjpzZWNyZXQ=";

const LIST_REPLY: &str = r#"{
    "result": "success",
    "files": [
        {"path": "a.txt", "is_directory": false, "size": 1, "sha1_hash": "86f7e437faa5a7fce15d1ddcb9eaeaea377667b8"},
        {"path": "old.txt", "is_directory": false, "size": 3, "updated_at": "Sat, 13 Feb 2016 03:04:00 -0000"},
        {"path": "sub", "is_directory": true},
        {"path": "gone", "is_directory": true}
    ]
}"#;

#[tokio::test]
async fn list_sends_authenticated_get() -> anyhow::Result<()> {
    init_log();
    let server = Server::start()
        .await
        .reply("list", StatusCode::OK, LIST_REPLY);
    let harness = Harness::neocities(&[], &server).await;

    let entries = harness.remote.list().await?;

    assert_eq!(
        entries,
        [
            RemoteEntry::file("a.txt"),
            RemoteEntry::file("old.txt"),
            RemoteEntry::directory("sub"),
            RemoteEntry::directory("gone"),
        ]
    );
    let req = server.request("list");
    assert_eq!(req.method, "GET");
    assert_eq!(req.header("Authorization"), Some(AUTHORIZATION));
    assert_eq!(req.header("User-Agent"), Some(ncsync::user_agent().as_str()));
    Ok(())
}

#[tokio::test]
async fn info_returns_fields_in_order() -> anyhow::Result<()> {
    init_log();
    let reply = r#"{
        "result": "success",
        "info": {"sitename": "youpi", "hits": 5072, "created_at": "Sat, 29 Jun 2013 10:11:38 +0000", "domain": null}
    }"#;
    let server = Server::start().await.reply("info", StatusCode::OK, reply);
    let harness = Harness::neocities(&[], &server).await;

    let info = harness.remote.info().await?;

    let keys: Vec<&str> = info.keys().map(String::as_str).collect();
    assert_eq!(keys, ["sitename", "hits", "created_at", "domain"]);
    assert_eq!(info["sitename"], "youpi");
    assert_eq!(server.request("info").method, "GET");
    Ok(())
}

#[tokio::test]
async fn upload_sends_one_multipart_request() -> anyhow::Result<()> {
    init_log();
    let server = Server::start().await;
    let harness = Harness::neocities(SCENARIO_A, &server).await;
    let site = harness.site();
    let entries = [
        UploadEntry {
            name: RelativePath::new("a.txt", false),
            source: site.join("a.txt"),
        },
        UploadEntry {
            name: RelativePath::new("sub/b.txt", false),
            source: site.join("sub").join("b.txt"),
        },
    ];

    harness.remote.upload(&entries).await?;

    assert_eq!(server.requests().len(), 1);
    let req = server.request("upload");
    assert_eq!(req.method, "POST");
    assert_eq!(req.header("Authorization"), Some(AUTHORIZATION));
    let content_type = req.header("Content-Type").unwrap_or_default();
    assert!(content_type.starts_with("multipart/form-data"), "{content_type}");
    // the field name is the remote path, separators included
    assert!(req.body.contains(r#"name="a.txt""#), "{}", req.body);
    assert!(req.body.contains(r#"name="sub/b.txt""#), "{}", req.body);
    assert!(req.body.contains(r#"filename="b.txt""#), "{}", req.body);
    Ok(())
}

#[tokio::test]
async fn empty_upload_sends_nothing() -> anyhow::Result<()> {
    init_log();
    let server = Server::start().await;
    let harness = Harness::neocities(&[], &server).await;

    harness.remote.upload(&[]).await?;

    assert!(server.requests().is_empty());
    Ok(())
}

#[tokio::test]
async fn delete_sends_paths_without_marker() -> anyhow::Result<()> {
    init_log();
    let server = Server::start().await;
    let harness = Harness::neocities(&[], &server).await;
    let paths = [
        RelativePath::new("img", true),
        RelativePath::new("old.html", false),
    ];

    harness.remote.delete(&paths).await?;

    let req = server.request("delete");
    assert_eq!(req.method, "POST");
    assert_eq!(req.header("Authorization"), Some(AUTHORIZATION));
    assert_eq!(
        req.header("Content-Type"),
        Some("application/x-www-form-urlencoded")
    );
    assert_eq!(req.body, "filenames%5B%5D=img&filenames%5B%5D=old.html");
    Ok(())
}

#[tokio::test]
async fn error_reply_is_api_error() {
    init_log();
    let reply = r#"{
        "result": "error",
        "error_type": "invalid_auth",
        "message": "invalid credentials - please check your username and password"
    }"#;
    let server = Server::start()
        .await
        .reply("list", StatusCode::FORBIDDEN, reply);
    let harness = Harness::neocities(&[], &server).await;

    let err = harness.remote.list().await.unwrap_err();

    assert!(err.is_api(), "{err}");
    assert!(err.to_string().contains("invalid_auth"), "{err}");
}

#[tokio::test]
async fn push_over_http() -> anyhow::Result<()> {
    init_log();
    let server = Server::start()
        .await
        .reply("list", StatusCode::OK, LIST_REPLY);
    let harness = Harness::neocities(SCENARIO_A, &server).await;

    let report = harness.push().await?;

    assert_eq!(report.deleted, [RelativePath::new("old.txt", false), RelativePath::new("gone", true)]);
    assert_eq!(server.requests().len(), 3);
    let upload = server.request("upload");
    assert!(upload.body.contains(r#"name="sub/b.txt""#), "{}", upload.body);
    let delete = server.request("delete");
    assert_eq!(delete.body, "filenames%5B%5D=old.txt&filenames%5B%5D=gone");
    Ok(())
}
