//! Wire response parsing
//!
//! Turns raw transport responses into [`QueryResult`] rows or an
//! [`ApiError`]. A single linear pass, no state carried between calls.

use bridge_traits::http::HttpResponse;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{ApiError, Result};

/// Rows returned by a successful call, plus the exact total when it was
/// requested and the server reported one.
///
/// `total` is `None` when unknown. Callers must be able to distinguish
/// "unknown" from a genuine zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    pub rows: Vec<Map<String, Value>>,
    pub total: Option<u64>,
}

impl QueryResult {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Shape of a structured error body reported by the server.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Extract the exact total from a `Content-Range`-style header of the
/// form `<start>-<end>/<total>`. Absent or malformed headers yield
/// `None`, never zero.
pub(crate) fn total_from_headers(response: &HttpResponse) -> Option<u64> {
    let range = response.header("Content-Range")?;
    range.rsplit('/').next()?.parse().ok()
}

/// Message to report for a failed response: the server's structured
/// `message` field when the body parses, else a status-derived fallback.
fn error_message(response: &HttpResponse) -> String {
    match serde_json::from_slice::<ErrorBody>(&response.body) {
        Ok(body) => body.message,
        Err(_) => format!("HTTP {}", response.status),
    }
}

/// Parse a wire response into rows.
///
/// - Non-2xx statuses become [`ApiError::Http`]
/// - 204 and empty success bodies become an empty result without any
///   body parsing
/// - Success bodies normalize to a row sequence whether the server
///   returned an array or a single bare record
pub(crate) fn parse_response(response: HttpResponse) -> Result<QueryResult> {
    let total = total_from_headers(&response);

    if !response.is_success() {
        return Err(ApiError::Http {
            status: response.status,
            message: error_message(&response),
        });
    }

    if response.status == 204 || response.body.is_empty() {
        return Ok(QueryResult { rows: Vec::new(), total });
    }

    let value: Value = serde_json::from_slice(&response.body)
        .map_err(|e| ApiError::MalformedResponse(format!("body is not valid JSON: {}", e)))?;

    let rows = match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(map) => Ok(map),
                other => Err(ApiError::MalformedResponse(format!(
                    "expected a record, got {}",
                    type_name(&other)
                ))),
            })
            .collect::<Result<Vec<_>>>()?,
        Value::Object(map) => vec![map],
        other => {
            return Err(ApiError::MalformedResponse(format!(
                "expected records, got {}",
                type_name(&other)
            )))
        }
    };

    Ok(QueryResult { rows, total })
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a record",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

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

    #[test]
    fn test_total_from_content_range() {
        let resp = response(200, &[("Content-Range", "0-9/42")], "[]");
        assert_eq!(total_from_headers(&resp), Some(42));
    }

    #[test]
    fn test_total_absent_header_is_none() {
        let resp = response(200, &[], "[]");
        assert_eq!(total_from_headers(&resp), None);
    }

    #[test]
    fn test_total_malformed_header_is_none() {
        let resp = response(200, &[("Content-Range", "0-9/*")], "[]");
        assert_eq!(total_from_headers(&resp), None);
    }

    #[test]
    fn test_array_body_parses_to_rows() {
        let resp = response(200, &[], r#"[{"id":1},{"id":2}]"#);
        let result = parse_response(resp).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result.rows[0].get("id"), Some(&Value::from(1)));
        assert_eq!(result.total, None);
    }

    #[test]
    fn test_single_record_normalizes_to_one_row() {
        let resp = response(200, &[], r#"{"id":1,"title":"Dune"}"#);
        let result = parse_response(resp).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.rows[0].get("title"), Some(&Value::from("Dune")));
    }

    #[test]
    fn test_no_content_is_empty_success() {
        let resp = response(204, &[], "");
        let result = parse_response(resp).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.total, None);
    }

    #[test]
    fn test_empty_success_body_is_not_an_error() {
        let resp = response(200, &[], "");
        assert!(parse_response(resp).is_ok());
    }

    #[test]
    fn test_error_status_with_structured_body() {
        let resp = response(400, &[], r#"{"message":"duplicate key value"}"#);
        let err = parse_response(resp).unwrap_err();
        match err {
            ApiError::Http { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "duplicate key value");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_error_status_with_unparseable_body_falls_back() {
        let resp = response(502, &[], "<html>bad gateway</html>");
        let err = parse_response(resp).unwrap_err();
        match err {
            ApiError::Http { message, .. } => assert_eq!(message, "HTTP 502"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_success_with_scalar_body_is_malformed() {
        let resp = response(200, &[], "42");
        assert!(matches!(
            parse_response(resp),
            Err(ApiError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_array_of_scalars_is_malformed() {
        let resp = response(200, &[], "[1,2,3]");
        assert!(matches!(
            parse_response(resp),
            Err(ApiError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_total_survives_error_free_page() {
        let resp = response(200, &[("content-range", "10-19/57")], r#"[{"id":11}]"#);
        let result = parse_response(resp).unwrap();
        assert_eq!(result.total, Some(57));
    }
}
