//! Tests for the Discogs client against a mock server.
//!
//! No test here talks to the real Discogs API.

use spindle_catalog::{CatalogError, ClientConfig, DiscogsClient, SearchType};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

fn token_client(server: &MockServer) -> DiscogsClient {
    DiscogsClient::new(
        ClientConfig::default()
            .with_base_url(server.uri())
            .with_token("test-token"),
    )
    .unwrap()
}

fn consumer_client(server: &MockServer) -> DiscogsClient {
    DiscogsClient::new(
        ClientConfig::default()
            .with_base_url(server.uri())
            .with_consumer_credentials("ck", "cs"),
    )
    .unwrap()
}

fn search_body(page: u32) -> serde_json::Value {
    serde_json::json!({
        "pagination": {
            "page": page,
            "pages": 3,
            "per_page": 20,
            "items": 45,
            "urls": {}
        },
        "results": [
            {
                "id": 1873013,
                "type": "release",
                "title": "Pink Floyd - Animals",
                "thumb": "",
                "cover_image": "",
                "year": "1977",
                "catno": "SHVL 815",
                "resource_url": "https://api.discogs.com/releases/1873013"
            }
        ]
    })
}

/// Matches requests that carry no `Authorization` header.
struct NoAuthorization;

impl Match for NoAuthorization {
    fn matches(&self, request: &Request) -> bool {
        !request
            .headers
            .keys()
            .any(|k| k.as_str().eq_ignore_ascii_case("authorization"))
    }
}

/// Matches requests without consumer credentials in the query string.
struct NoConsumerParams;

impl Match for NoConsumerParams {
    fn matches(&self, request: &Request) -> bool {
        request
            .url
            .query_pairs()
            .all(|(k, _)| k != "key" && k != "secret")
    }
}

// =============================================================================
// Configuration
// =============================================================================

mod configuration {
    use super::*;

    #[tokio::test]
    async fn test_search_unconfigured_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client =
            DiscogsClient::new(ClientConfig::default().with_base_url(server.uri())).unwrap();
        assert!(!client.is_configured());

        let err = client
            .search("animals", None, 1, 20)
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotConfigured));

        let err = client.get_release(1).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotConfigured));

        assert!(server.received_requests().await.unwrap().is_empty());
    }
}

// =============================================================================
// Authentication
// =============================================================================

mod authentication {
    use super::*;

    #[tokio::test]
    async fn test_token_sent_as_header_only() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/database/search"))
            .and(header("Authorization", "Discogs token=test-token"))
            .and(header("Content-Type", "application/json"))
            .and(NoConsumerParams)
            .respond_with(ResponseTemplate::new(200).set_body_json(search_body(1)))
            .expect(1)
            .mount(&server)
            .await;

        let response = token_client(&server)
            .search("animals", None, 1, 20)
            .await
            .unwrap();
        assert_eq!(response.results.len(), 1);
    }

    #[tokio::test]
    async fn test_consumer_pair_sent_as_query_only() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/database/search"))
            .and(query_param("key", "ck"))
            .and(query_param("secret", "cs"))
            .and(NoAuthorization)
            .respond_with(ResponseTemplate::new(200).set_body_json(search_body(1)))
            .expect(1)
            .mount(&server)
            .await;

        let response = consumer_client(&server)
            .search("animals", None, 1, 20)
            .await
            .unwrap();
        assert_eq!(response.results[0].id, 1_873_013);
    }

    #[tokio::test]
    async fn test_user_agent_attached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/releases/1"))
            .and(header("User-Agent", "spindle-test/1.0"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"id": 1, "title": "Test"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let mut config = ClientConfig::default()
            .with_base_url(server.uri())
            .with_token("t");
        config.user_agent = "spindle-test/1.0".to_string();
        let release = DiscogsClient::new(config)
            .unwrap()
            .get_release(1)
            .await
            .unwrap();
        assert_eq!(release.title, "Test");
    }
}

// =============================================================================
// Search
// =============================================================================

mod search {
    use super::*;

    #[tokio::test]
    async fn test_search_parameters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/database/search"))
            .and(query_param("q", "pink floyd animals"))
            .and(query_param("type", "release"))
            .and(query_param("page", "2"))
            .and(query_param("per_page", "50"))
            .respond_with(ResponseTemplate::new(200).set_body_json(search_body(2)))
            .expect(1)
            .mount(&server)
            .await;

        let response = token_client(&server)
            .search("pink floyd animals", Some(SearchType::Release), 2, 50)
            .await
            .unwrap();
        assert_eq!(response.pagination.page, 2);
        assert_eq!(response.pagination.pages, 3);
        assert_eq!(response.pagination.items, 45);
    }

    #[tokio::test]
    async fn test_search_without_type_omits_parameter() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/database/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(search_body(1)))
            .mount(&server)
            .await;

        token_client(&server)
            .search("animals", None, 1, 20)
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].url.query_pairs().all(|(k, _)| k != "type"));
    }

    #[tokio::test]
    async fn test_pages_differ_only_in_page_parameter() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/database/search"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(search_body(1)))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/database/search"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(search_body(2)))
            .mount(&server)
            .await;

        let client = token_client(&server);
        let first = client.search("animals", None, 1, 20).await.unwrap();
        let second = client.search("animals", None, 2, 20).await.unwrap();
        assert_eq!(first.pagination.page, 1);
        assert_eq!(second.pagination.page, 2);

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 2);
        let without_page = |r: &Request| {
            r.url
                .query_pairs()
                .filter(|(k, _)| k != "page")
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect::<Vec<_>>()
        };
        assert_eq!(requests[0].url.path(), requests[1].url.path());
        assert_eq!(without_page(&requests[0]), without_page(&requests[1]));
        assert_ne!(requests[0].url.query(), requests[1].url.query());
    }

    #[tokio::test]
    async fn test_search_release_combines_artist_and_album() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/database/search"))
            .and(query_param("q", "Pink Floyd Animals"))
            .and(query_param("type", "release"))
            .and(query_param("page", "1"))
            .and(query_param("per_page", "20"))
            .respond_with(ResponseTemplate::new(200).set_body_json(search_body(1)))
            .expect(1)
            .mount(&server)
            .await;

        token_client(&server)
            .search_release("Pink Floyd", "Animals", 1)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_search_by_barcode() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/database/search"))
            .and(query_param("barcode", "5099902987613"))
            .and(query_param("type", "release"))
            .respond_with(ResponseTemplate::new(200).set_body_json(search_body(1)))
            .expect(1)
            .mount(&server)
            .await;

        let response = token_client(&server)
            .search_by_barcode("5099902987613")
            .await
            .unwrap();
        assert_eq!(response.results[0].catno.as_deref(), Some("SHVL 815"));
    }

    #[tokio::test]
    async fn test_search_by_catalog_number() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/database/search"))
            .and(query_param("catno", "SHVL 815"))
            .and(query_param("type", "release"))
            .and(query_param("page", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(search_body(3)))
            .expect(1)
            .mount(&server)
            .await;

        let response = consumer_client(&server)
            .search_by_catalog_number("SHVL 815", 3)
            .await
            .unwrap();
        assert_eq!(response.pagination.page, 3);
    }
}

// =============================================================================
// Release details
// =============================================================================

mod release {
    use super::*;

    #[tokio::test]
    async fn test_get_release() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/releases/1873013"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 1873013,
                "title": "Animals",
                "artists": [{"name": "Pink Floyd", "id": 45467}],
                "year": 1977,
                "labels": [{"name": "Harvest", "catno": "SHVL 815", "id": 2345}],
                "formats": [{"name": "Vinyl", "qty": "1", "descriptions": ["LP"]}],
                "identifiers": [{"type": "Matrix / Runout", "value": "A-2U"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let release = token_client(&server).get_release(1_873_013).await.unwrap();
        assert_eq!(release.title, "Animals");
        assert_eq!(release.year, Some(1977));
        assert_eq!(release.labels[0].catno, "SHVL 815");
    }

    #[tokio::test]
    async fn test_get_master_release_raw() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/masters/10362"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 10362,
                "title": "Animals",
                "main_release": 1873013
            })))
            .expect(1)
            .mount(&server)
            .await;

        let master = token_client(&server).get_master_release(10362).await.unwrap();
        assert_eq!(master["main_release"], 1_873_013);
    }
}

// =============================================================================
// Errors
// =============================================================================

mod errors {
    use super::*;

    #[tokio::test]
    async fn test_404_carries_upstream_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/releases/999"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(serde_json::json!({"message": "not found"})),
            )
            .mount(&server)
            .await;

        let err = token_client(&server).get_release(999).await.unwrap_err();
        match &err {
            CatalogError::Upstream { status, message } => {
                assert_eq!(*status, 404);
                assert!(message.contains("not found"));
            }
            other => panic!("Expected Upstream error, got {other:?}"),
        }
        assert!(err.is_not_found());
        assert!(err.to_string().contains("not found"));
    }

    #[tokio::test]
    async fn test_non_json_error_body_gets_generic_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
            .mount(&server)
            .await;

        let err = token_client(&server)
            .search("animals", None, 1, 20)
            .await
            .unwrap_err();
        match &err {
            CatalogError::Upstream { status, message } => {
                assert_eq!(*status, 502);
                assert_eq!(message, "request failed");
            }
            other => panic!("Expected Upstream error, got {other:?}"),
        }
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn test_rate_limited_is_upstream_429() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429).set_body_json(
                serde_json::json!({"message": "You are making requests too quickly."}),
            ))
            .expect(1)
            .mount(&server)
            .await;

        let err = token_client(&server).get_release(1).await.unwrap_err();
        assert!(matches!(err, CatalogError::Upstream { status: 429, .. }));
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/releases/5"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = token_client(&server).get_release(5).await.unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        // Grab a free port, then release it so nothing is listening there.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let uri = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let client =
            DiscogsClient::new(ClientConfig::default().with_base_url(uri).with_token("t")).unwrap();
        let err = client.get_release(1).await.unwrap_err();
        assert!(matches!(err, CatalogError::Unreachable(_)));
        assert!(err.is_transient());
    }
}
