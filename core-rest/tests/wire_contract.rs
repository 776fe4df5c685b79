//! Integration tests for the wire contract
//!
//! These tests drive the full build/transmit/parse pass through a
//! recording transport and pin the exact request shapes the backend
//! expects:
//! - Filter, sort, pagination, and select parameter rendering
//! - Count and representation preference headers
//! - Mutation targeting via identifying-column filters
//! - Total-count extraction and error-body handling

use async_trait::async_trait;
use bridge_traits::error::Result as TransportResult;
use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use bytes::Bytes;
use core_rest::{ApiError, Key, Query, RestClient, SortDirection};
use serde_json::json;
use std::sync::{Arc, Mutex};

// ============================================================================
// Recording transport
// ============================================================================

/// Transport that records every request and replays canned responses in
/// order.
struct ScriptedHttp {
    requests: Mutex<Vec<HttpRequest>>,
    responses: Mutex<Vec<HttpResponse>>,
}

impl ScriptedHttp {
    fn new(responses: Vec<HttpResponse>) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            responses: Mutex::new(responses),
        }
    }

    fn single(response: HttpResponse) -> Self {
        Self::new(vec![response])
    }

    fn recorded(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for ScriptedHttp {
    async fn execute(&self, request: HttpRequest) -> TransportResult<HttpResponse> {
        self.requests.lock().unwrap().push(request);
        Ok(self.responses.lock().unwrap().remove(0))
    }
}

fn response(status: u16, headers: &[(&str, &str)], body: &str) -> HttpResponse {
    HttpResponse {
        status,
        headers: headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        body: Bytes::from(body.to_string()),
    }
}

fn empty_ok() -> HttpResponse {
    response(200, &[], "[]")
}

// ============================================================================
// Request shapes
// ============================================================================

#[tokio::test]
async fn list_request_renders_filters_sort_pagination_and_select() {
    let http = Arc::new(ScriptedHttp::single(empty_ok()));
    let client = RestClient::new(http.clone(), "http://localhost:3000");

    let query = Query::table("books")
        .select("*,author:authors(name),genre:genres(name)")
        .ilike("title", "dragon")
        .gte("year", 1990)
        .order("title", SortDirection::Ascending)
        .order("year", SortDirection::Descending)
        .limit(10)
        .offset(20)
        .with_exact_count();

    client.select(&query).await.unwrap();

    let requests = http.recorded();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];

    assert_eq!(request.method, HttpMethod::Get);
    assert_eq!(
        request.url,
        "http://localhost:3000/books\
         ?title=ilike.%2Adragon%2A\
         &year=gte.1990\
         &order=title.asc%2Cyear.desc\
         &limit=10\
         &offset=20\
         &select=%2A%2Cauthor%3Aauthors%28name%29%2Cgenre%3Agenres%28name%29"
    );
    assert_eq!(
        request.headers.get("Prefer").map(String::as_str),
        Some("count=exact")
    );
    assert_eq!(
        request.headers.get("Accept").map(String::as_str),
        Some("application/json")
    );
    assert!(request.body.is_none());
}

#[tokio::test]
async fn default_query_sends_no_pagination_parameters() {
    let http = Arc::new(ScriptedHttp::single(empty_ok()));
    let client = RestClient::new(http.clone(), "http://localhost:3000");

    client.select(&Query::table("genres")).await.unwrap();

    let request = &http.recorded()[0];
    assert_eq!(request.url, "http://localhost:3000/genres");
}

#[tokio::test]
async fn update_and_delete_target_the_identifying_column() {
    let http = Arc::new(ScriptedHttp::new(vec![
        response(200, &[], r#"[{"id":7,"title":"Dune"}]"#),
        response(204, &[], ""),
    ]));
    let client = RestClient::new(http.clone(), "http://localhost:3000");

    client
        .update("books", &Key::id(7), &json!({"title": "Dune"}))
        .await
        .unwrap();
    client.delete("books", &Key::id(7)).await.unwrap();

    let requests = http.recorded();
    assert_eq!(requests[0].method, HttpMethod::Patch);
    assert_eq!(requests[0].url, "http://localhost:3000/books?id=eq.7");
    assert_eq!(
        requests[0].headers.get("Prefer").map(String::as_str),
        Some("return=representation")
    );
    assert_eq!(requests[1].method, HttpMethod::Delete);
    assert_eq!(requests[1].url, "http://localhost:3000/books?id=eq.7");
    assert!(!requests[1].headers.contains_key("Prefer"));
}

#[tokio::test]
async fn non_id_key_columns_work() {
    let http = Arc::new(ScriptedHttp::single(response(204, &[], "")));
    let client = RestClient::new(http.clone(), "http://localhost:3000");

    client
        .delete("books", &Key::new("isbn", "978-0-547-72202-6"))
        .await
        .unwrap();

    let request = &http.recorded()[0];
    assert_eq!(
        request.url,
        "http://localhost:3000/books?isbn=eq.978-0-547-72202-6"
    );
}

#[tokio::test]
async fn procedure_call_has_no_query_parameters() {
    let http = Arc::new(ScriptedHttp::single(empty_ok()));
    let client = RestClient::new(http.clone(), "http://localhost:3000");

    client
        .call("get_top_genres", &json!({"limit_count": 5}))
        .await
        .unwrap();

    let request = &http.recorded()[0];
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.url, "http://localhost:3000/rpc/get_top_genres");
    assert_eq!(
        request.headers.get("Content-Type").map(String::as_str),
        Some("application/json")
    );
}

#[tokio::test]
async fn body_bytes_match_declared_content_type_exactly() {
    let http = Arc::new(ScriptedHttp::single(response(201, &[], r#"[{"id":1}]"#)));
    let client = RestClient::new(http.clone(), "http://localhost:3000");

    let record = json!({"title": "Ĉapelo", "year": 2024});
    client.insert("books", &record).await.unwrap();

    let request = &http.recorded()[0];
    let body = request.body.as_ref().expect("body set");
    // The serialized bytes round-trip unchanged: no charset suffix, no
    // re-encoding between the translator and the transport.
    assert_eq!(body.as_ref(), serde_json::to_vec(&record).unwrap());
}

// ============================================================================
// Response handling
// ============================================================================

#[tokio::test]
async fn exact_count_round_trip() {
    let http = Arc::new(ScriptedHttp::single(response(
        200,
        &[("Content-Range", "0-9/42")],
        r#"[{"id":1}]"#,
    )));
    let client = RestClient::new(http, "http://localhost:3000");

    let result = client
        .select(&Query::table("books").with_exact_count())
        .await
        .unwrap();

    assert_eq!(result.total, Some(42));
}

#[tokio::test]
async fn missing_count_header_leaves_total_unset() {
    let http = Arc::new(ScriptedHttp::single(empty_ok()));
    let client = RestClient::new(http, "http://localhost:3000");

    let result = client
        .select(&Query::table("books").with_exact_count())
        .await
        .unwrap();

    assert_eq!(result.total, None);
    assert_ne!(result.total, Some(0));
}

#[tokio::test]
async fn deletion_acknowledgment_is_empty_success() {
    let http = Arc::new(ScriptedHttp::single(response(204, &[], "")));
    let client = RestClient::new(http, "http://localhost:3000");

    let result = client.delete("books", &Key::id(1)).await.unwrap();
    assert!(result.is_empty());
}

#[tokio::test]
async fn server_error_body_message_is_exact() {
    let http = Arc::new(ScriptedHttp::single(response(
        400,
        &[],
        r#"{"message":"duplicate key value"}"#,
    )));
    let client = RestClient::new(http, "http://localhost:3000");

    let err = client
        .insert("genres", &json!({"name": "Fantasy"}))
        .await
        .unwrap_err();

    match err {
        ApiError::Http { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "duplicate key value");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn malformed_success_body_is_not_silent_empty_data() {
    let http = Arc::new(ScriptedHttp::single(response(200, &[], "\"surprise\"")));
    let client = RestClient::new(http, "http://localhost:3000");

    let err = client.select(&Query::table("books")).await.unwrap_err();
    assert!(matches!(err, ApiError::MalformedResponse(_)));
}

#[tokio::test]
async fn concurrent_calls_complete_independently() {
    // Two clients over two scripted transports; completion order is not
    // part of the contract, both results must arrive.
    let slow = Arc::new(ScriptedHttp::single(response(
        200,
        &[],
        r#"[{"id":1,"name":"Ursula K. Le Guin"}]"#,
    )));
    let fast = Arc::new(ScriptedHttp::single(response(
        200,
        &[],
        r#"[{"id":2,"name":"Fantasy"}]"#,
    )));

    let authors_client = RestClient::new(slow, "http://localhost:3000");
    let genres_client = RestClient::new(fast, "http://localhost:3000");

    let authors_query = Query::table("authors");
    let genres_query = Query::table("genres");
    let authors = authors_client.select(&authors_query);
    let genres = genres_client.select(&genres_query);

    let (authors, genres) = tokio::try_join!(authors, genres).unwrap();
    assert_eq!(authors.len(), 1);
    assert_eq!(genres.len(), 1);
}
