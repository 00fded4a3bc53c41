//! Open Graph scraping for arbitrary web pages.

use reqwest::Client;
use tracing::debug;

use super::MetadataError;
use super::html::{document_title, fetch_html, meta_content};

/// Open Graph fields read from a page head.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenGraph {
    /// `og:title`, or the document `<title>` when the page has none.
    pub title: Option<String>,
}

impl OpenGraph {
    /// Returns true when no field was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
    }
}

/// Reads Open Graph fields from an HTML document.
#[must_use]
pub fn parse_open_graph(html: &str) -> OpenGraph {
    OpenGraph {
        title: meta_content(html, "og:title").or_else(|| document_title(html)),
    }
}

/// Fetches `url` and scrapes its Open Graph fields.
///
/// # Errors
///
/// Returns [`MetadataError`] when the page cannot be fetched or carries no
/// usable metadata at all.
#[tracing::instrument(skip(client), fields(url = %url))]
pub async fn fetch_open_graph(client: &Client, url: &str) -> Result<OpenGraph, MetadataError> {
    let html = fetch_html(client, url).await?;
    let graph = parse_open_graph(&html);
    if graph.is_empty() {
        return Err(MetadataError::unexpected(url, "page has no Open Graph metadata"));
    }
    debug!(title = ?graph.title, "Scraped Open Graph metadata");
    Ok(graph)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::metadata::http_client::{HttpTimeouts, build_http_client};
    use crate::test_support::socket_guard::start_mock_server_or_skip;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, ResponseTemplate};

    const ARTICLE_HTML: &str = r#"<!doctype html>
<html><head>
  <title>Fallback Title | Example Blog</title>
  <meta property="og:title" content="Building a CLI in Rust">
  <meta property="og:description" content="A walkthrough.">
  <meta property="og:image" content="https://example.com/cover.png">
  <meta property="og:site_name" content="Example Blog">
</head><body></body></html>"#;

    #[test]
    fn test_parse_open_graph_full() {
        let graph = parse_open_graph(ARTICLE_HTML);
        assert_eq!(graph.title.as_deref(), Some("Building a CLI in Rust"));
    }

    #[test]
    fn test_parse_open_graph_title_falls_back_to_document_title() {
        let graph = parse_open_graph(
            r#"<title>Plain Page</title><meta name="description" content="desc">"#,
        );
        assert_eq!(graph.title.as_deref(), Some("Plain Page"));
    }

    #[test]
    fn test_parse_open_graph_empty_document() {
        assert!(parse_open_graph("<html><body>hi</body></html>").is_empty());
    }

    #[test]
    fn test_parse_open_graph_without_title_is_empty() {
        let graph = parse_open_graph(
            r#"<meta property="og:description" content="d"><meta property="og:image" content="i.png">"#,
        );
        assert!(graph.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_open_graph_success() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };
        Mock::given(method("GET"))
            .and(path("/2021/post.html"))
            .respond_with(ResponseTemplate::new(200).set_body_string(ARTICLE_HTML))
            .mount(&mock_server)
            .await;

        let client = build_http_client(HttpTimeouts::default()).unwrap();
        let url = format!("{}/2021/post.html", mock_server.uri());
        let graph = fetch_open_graph(&client, &url).await.unwrap();
        assert_eq!(graph.title.as_deref(), Some("Building a CLI in Rust"));
    }

    #[tokio::test]
    async fn test_fetch_open_graph_404_fails() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = build_http_client(HttpTimeouts::default()).unwrap();
        let err = fetch_open_graph(&client, &mock_server.uri()).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn test_fetch_open_graph_page_without_metadata_fails() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<p>no head</p>"))
            .mount(&mock_server)
            .await;

        let client = build_http_client(HttpTimeouts::default()).unwrap();
        let err = fetch_open_graph(&client, &mock_server.uri()).await.unwrap_err();
        assert!(matches!(err, MetadataError::UnexpectedResponse { .. }));
    }
}
