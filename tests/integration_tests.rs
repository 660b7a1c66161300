use football_api::testing_utils::{RecordingCache, StubTransport};
use football_api::{
    ApiResponse, AppError, CacheStore, Client, ClientConfig, MemoryCache, OutputFormat,
    ParamGroup, RequestParams, Transport, TransportResponse,
};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const STANDINGS_JSON: &str = r#"{"ERROR":"OK","APIRequestsRemaining":"412","ComputationTime":"0.021","teams":[{"stand_team_name":"Arsenal","stand_position":"1"}]}"#;

fn config(output_type: OutputFormat) -> ClientConfig {
    ClientConfig {
        service_url: "http://football-api.test/api/".to_string(),
        output_type,
        ..ClientConfig::new("secret-key")
    }
}

fn standings_params() -> RequestParams {
    RequestParams::from(ParamGroup::new().with("comp_id", "1204"))
}

/// Full pipeline with a decoded format, hashing and a memory cache
#[test]
fn test_decoded_call_is_hashed_cached_and_counted() {
    let transport = Arc::new(StubTransport::ok(STANDINGS_JSON));
    let config = ClientConfig {
        cache_time: 120,
        generate_hash: true,
        ..config(OutputFormat::Array)
    };
    let mut client = Client::builder(config)
        .transport(transport.clone())
        .cache(Arc::new(MemoryCache::default()))
        .build()
        .unwrap();

    let first = client.call("standings", &standings_params()).unwrap();
    let second = client.call("standings", &standings_params()).unwrap();

    assert_eq!(transport.calls(), 1);
    assert_eq!(first, second);
    assert_eq!(client.get_remaining_api_calls(), 412);

    let hash = first.content_hash().unwrap();
    assert_eq!(hash.len(), 64);
    assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(
        first.source_url().unwrap(),
        "http://football-api.test/api/?Action=standings&amp;APIKey=secret-key&amp;OutputType=JSON&amp;comp_id=1204"
    );
    assert!(matches!(first, ApiResponse::Mapping(_)));
}

/// The content hash ignores the vendor's timing field
#[test]
fn test_hash_stable_across_computation_time() {
    let slower = STANDINGS_JSON.replace("0.021", "1.337");
    let transport = Arc::new(StubTransport::scripted(vec![
        Ok(TransportResponse::new(200, STANDINGS_JSON)),
        Ok(TransportResponse::new(200, slower)),
    ]));
    let config = ClientConfig {
        generate_hash: true,
        ..config(OutputFormat::Object)
    };
    let mut client = Client::builder(config)
        .transport(transport)
        .build()
        .unwrap();

    let a = client.call("standings", &standings_params()).unwrap();
    let b = client.call("standings", &standings_params()).unwrap();
    assert_eq!(a.content_hash(), b.content_hash());
    assert!(matches!(a, ApiResponse::Object(_)));
}

#[test]
fn test_pass_through_format_returns_body_verbatim() {
    let body = "ERROR=OK|teams=...";
    let transport = Arc::new(StubTransport::ok(body));
    let mut client = Client::builder(config(OutputFormat::Line))
        .transport(transport.clone())
        .build()
        .unwrap();

    let response = client.call("today", &RequestParams::new()).unwrap();
    assert_eq!(response, ApiResponse::Raw(body.to_string()));
    assert_eq!(client.get_remaining_api_calls(), 1000);
    assert!(transport.urls()[0].ends_with("OutputType=LINE"));
}

#[test]
fn test_rate_limit_envelope_is_classified() {
    let body = json!({
        "ERROR": "To avoid misuse of the service, the number of requests is limited",
        "APIRequestsRemaining": "0"
    })
    .to_string();
    let mut client = Client::builder(config(OutputFormat::Array))
        .transport(Arc::new(StubTransport::ok(body)))
        .build()
        .unwrap();

    let err = client.call("today", &RequestParams::new()).unwrap_err();
    assert!(matches!(err, AppError::RateLimit { .. }));
    assert!(err.is_retryable());
}

#[test]
fn test_xml_response_cached_with_timestamp() {
    let body = "<response><ERROR>OK</ERROR><APIRequestsRemaining>88</APIRequestsRemaining><match>1</match></response>";
    let cache = Arc::new(RecordingCache::new());
    let config = ClientConfig {
        cache_time: 60,
        ..config(OutputFormat::Xml)
    };
    let mut client = Client::builder(config)
        .transport(Arc::new(StubTransport::ok(body)))
        .cache(cache.clone())
        .build()
        .unwrap();

    let response = client.call("fixtures", &RequestParams::new()).unwrap();
    assert!(response.field("cached").is_some());
    assert_eq!(client.get_remaining_api_calls(), 88);

    let url = client.build_url("fixtures", &RequestParams::new()).unwrap();
    let (stored, ttl) = cache.entry(&url).unwrap();
    assert_eq!(ttl, 60);
    assert_eq!(stored, response);
}

#[test]
fn test_dynamic_groups_rejected_before_request() {
    let transport = Arc::new(StubTransport::ok(STANDINGS_JSON));
    let mut client = Client::builder(config(OutputFormat::Array))
        .transport(transport.clone())
        .build()
        .unwrap();

    let err = client
        .call_with_groups("standings", &[json!({"comp_id": 1204}), json!("bad")])
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidParameter(_)));
    assert_eq!(transport.calls(), 0);
}

#[test]
fn test_memory_cache_is_usable_through_trait_object() {
    let store: Arc<dyn CacheStore> = Arc::new(MemoryCache::new(2));
    assert!(store.set("k", ApiResponse::Raw("v".to_string()), 30));
    assert_eq!(store.get("k"), Some(ApiResponse::Raw("v".to_string())));
    assert_eq!(store.get("missing"), None);
}

fn mock_config(server: &MockServer, output_type: OutputFormat) -> ClientConfig {
    ClientConfig {
        service_url: format!("{}/api/", server.uri()),
        output_type,
        ..ClientConfig::new("secret-key")
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_http_call_against_mock_server() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/"))
        .and(query_param("Action", "standings"))
        .and(query_param("APIKey", "secret-key"))
        .and(query_param("OutputType", "JSON"))
        .and(query_param("comp_id", "1204"))
        .respond_with(ResponseTemplate::new(200).set_body_string(STANDINGS_JSON))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = mock_config(&mock_server, OutputFormat::Array);
    let (response, remaining) = tokio::task::spawn_blocking(move || {
        let mut client = Client::new(config)?;
        let response = client.call("standings", &standings_params())?;
        Ok::<_, AppError>((response, client.get_remaining_api_calls()))
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(remaining, 412);
    assert_eq!(response.field("ERROR").as_deref(), Some("OK"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_http_error_status_reported_with_url() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&mock_server)
        .await;

    let config = mock_config(&mock_server, OutputFormat::Array);
    let err = tokio::task::spawn_blocking(move || {
        let mut client = Client::new(config)?;
        client.call("today", &RequestParams::new())
    })
    .await
    .unwrap()
    .unwrap_err();

    assert_eq!(err.status(), Some(503));
    assert!(err.to_string().contains("503"));
    assert!(err.url().unwrap().contains("Action=today"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_http_transport_returns_non_success_bodies() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/"))
        .respond_with(ResponseTemplate::new(404).set_body_string("missing"))
        .mount(&mock_server)
        .await;

    let url = format!("{}/api/?Action=today", mock_server.uri());
    let response = tokio::task::spawn_blocking(move || {
        let transport = football_api::HttpTransport::new();
        transport.get(&url, std::time::Duration::from_secs(5), None)
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(response.status, 404);
    assert_eq!(response.body, "missing");
}
