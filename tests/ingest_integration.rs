//! Ingestion routines against mock GitHub, Medium and web page servers.

#![allow(clippy::unwrap_used)]

mod support;

use std::fs;
use std::path::Path;

use addproject_core::{
    ConfigStore, HttpMetadataSource, Ingestor, JsonObject, MetadataEndpoints, SourceKind,
};
use serde_json::{Value, json};
use support::socket_guard::start_mock_server_or_skip;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const UNREACHABLE: &str = "http://127.0.0.1:9";

fn write_templates(root: &Path) {
    fs::write(
        root.join("template-repo.json"),
        r#"{"source": "", "link": "", "title": "", "content": "", "authorIds": [], "tags": []}"#,
    )
    .unwrap();
    fs::write(
        root.join("template-blog.json"),
        r#"{"source": "", "link": "", "title": "Untitled", "authorIds": [], "tags": []}"#,
    )
    .unwrap();
}

fn ingestor(dir: &TempDir, endpoints: &MetadataEndpoints) -> Ingestor {
    write_templates(dir.path());
    let source = HttpMetadataSource::new(endpoints).unwrap();
    Ingestor::new(ConfigStore::new(dir.path()), Box::new(source))
}

fn endpoints_for(server: &MockServer) -> MetadataEndpoints {
    MetadataEndpoints {
        github_api_url: server.uri(),
        medium_url: server.uri(),
        ..MetadataEndpoints::default()
    }
}

fn unreachable_endpoints() -> MetadataEndpoints {
    MetadataEndpoints {
        github_api_url: UNREACHABLE.to_string(),
        medium_url: UNREACHABLE.to_string(),
        ..MetadataEndpoints::default()
    }
}

fn read(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[tokio::test]
async fn test_repo_ingestion_with_token_creates_author_and_content() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/users/acme"))
        .and(header("authorization", "token ghp_test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "login": "acme",
            "name": "Acme Dev",
            "bio": "Builds widgets",
            "avatar_url": "https://avatars.example/acme.png",
            "html_url": "https://github.com/acme",
            "type": "User"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/readme"))
        .and(header("authorization", "token ghp_test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"path": "README.md"})))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let endpoints = MetadataEndpoints {
        github_token: Some("ghp_test".to_string()),
        ..endpoints_for(&server)
    };
    let outcome = ingestor(&dir, &endpoints)
        .ingest("kotlin", "https://github.com/acme/widgets", None, &JsonObject::new())
        .await
        .unwrap();

    assert_eq!(outcome.kind, SourceKind::Github);
    let record = read(&dir.path().join("kotlin/repos/acme-widgets.json"));
    assert_eq!(record["content"], "README.md");
    assert_eq!(record["authorIds"], json!(["acme"]));
    assert_eq!(record["owner"], "acme");

    let author = read(&dir.path().join("authors/acme.json"));
    assert_eq!(author["name"], "Acme Dev");
    assert_eq!(author["photoURL"], "https://avatars.example/acme.png");
    assert_eq!(author["githubURL"], "https://github.com/acme");
}

#[tokio::test]
async fn test_repo_ingestion_readme_error_keeps_template_content() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/users/acme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "login": "acme",
            "type": "Organization"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/readme"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let outcome = ingestor(&dir, &endpoints_for(&server))
        .add_repo("kotlin", "https://github.com/acme/widgets", None, &JsonObject::new())
        .await
        .unwrap();

    assert_eq!(outcome.record["content"], "");
    assert_eq!(outcome.record["authorIds"], json!([]));
    assert!(!dir.path().join("authors").exists());
}

#[tokio::test]
async fn test_medium_ingestion_resolves_author_from_post_page() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/p/intro-to-widgets"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><head>
<link rel="author" href="https://medium.com/@JaneDoe">
<meta property="og:title" content="Intro to widgets">
</head></html>"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/@JaneDoe"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><head>
<meta property="og:title" content="Jane Doe – Medium">
<meta property="og:description" content="Writes about widgets &amp; gadgets">
<meta property="og:image" content="https://miro.example/jane.png">
</head></html>"#,
        ))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let post_url = format!("{}/p/intro-to-widgets", server.uri());
    let outcome = ingestor(&dir, &endpoints_for(&server))
        .add_medium_blog("kotlin", &post_url, Some("intro-to-widgets"), &JsonObject::new())
        .await
        .unwrap();

    let record = read(&dir.path().join("kotlin/blogs/intro-to-widgets.json"));
    assert_eq!(record["source"], "medium");
    assert_eq!(record["link"], post_url.as_str());
    assert_eq!(record["authorIds"], json!(["janedoe"]));
    assert_eq!(outcome.id, "intro-to-widgets");

    let author = read(&dir.path().join("authors/janedoe.json"));
    assert_eq!(author["name"], "Jane Doe");
    assert_eq!(author["bio"], "Writes about widgets & gadgets");
    assert_eq!(author["photoURL"], "https://miro.example/jane.png");
}

#[tokio::test]
async fn test_other_blog_ingestion_uses_open_graph_title() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/2021/my-post.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><head><meta property="og:title" content="My Post"><title>ignored</title></head></html>"#,
        ))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let url = format!("{}/2021/my-post.html", server.uri());
    let outcome = ingestor(&dir, &unreachable_endpoints())
        .ingest("kotlin", &url, None, &JsonObject::new())
        .await
        .unwrap();

    assert_eq!(outcome.kind, SourceKind::Other);
    assert_eq!(outcome.id, "2021-my-post");
    assert_eq!(read(&outcome.path)["title"], "My Post");
}

#[tokio::test]
async fn test_repeated_ingestion_with_unreachable_network_is_stable() {
    let dir = TempDir::new().unwrap();
    let ingestor = ingestor(&dir, &unreachable_endpoints());
    let overrides: JsonObject = [("tags".to_string(), json!(["kotlin"]))].into_iter().collect();

    // The Medium post is served from the unreachable host so its page fetch fails too.
    let medium_post = format!("{UNREACHABLE}/medium.com/@jdoe/my-post-abc123");
    for (url, expected_id) in [
        ("https://github.com/acme/widgets", "acme-widgets"),
        (medium_post.as_str(), "my-post-abc123"),
        ("http://127.0.0.1:9/2021/my-post.html", "2021-my-post"),
    ] {
        let first = ingestor.ingest("kotlin", url, None, &overrides).await.unwrap();
        let first_bytes = fs::read(&first.path).unwrap();
        let second = ingestor.ingest("kotlin", url, None, &overrides).await.unwrap();
        assert_eq!(fs::read(&second.path).unwrap(), first_bytes, "{url}");
        assert_eq!(first.id, expected_id);
        assert_eq!(second.id, first.id);
        assert_eq!(second.path, first.path);
        assert_eq!(second.record["tags"], json!(["kotlin"]));
        assert_eq!(second.record["authorIds"], json!([]), "{url}");
    }

    let medium = read(&dir.path().join("kotlin/blogs/my-post-abc123.json"));
    assert_eq!(medium["source"], "medium");
    assert_eq!(medium["link"], medium_post.as_str());
    assert!(!dir.path().join("authors").exists());
}
