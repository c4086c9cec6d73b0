//! Verify builder and inference behaviour against JSON test vectors stored in
//! `test-vectors/`.
//!
//! Comparing parsed JSON (not raw strings) avoids false negatives from
//! field-ordering differences.

use bridge_core::{build_request, normalize_headers, HeaderValue, RequestOptions, ResponseType};
use serde_json::Value;

fn parse_response_type(s: &str) -> ResponseType {
    serde_json::from_value(Value::String(s.to_string()))
        .unwrap_or_else(|_| panic!("unknown response type: {s}"))
}

// ---------------------------------------------------------------------------
// Content-type inference
// ---------------------------------------------------------------------------

#[test]
fn content_type_test_vectors() {
    let raw = include_str!("../../test-vectors/content_type.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let content_type = case["content_type"].as_str();
        let expected = parse_response_type(case["expected"].as_str().unwrap());
        assert_eq!(ResponseType::infer(content_type), expected, "{name}");
    }
}

// ---------------------------------------------------------------------------
// Header normalization
// ---------------------------------------------------------------------------

#[test]
fn header_test_vectors() {
    let raw = include_str!("../../test-vectors/headers.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let normalized = normalize_headers(case["input"].as_object().unwrap());
        let actual = serde_json::to_value(&normalized).unwrap();
        assert_eq!(actual, case["expected"], "{name}");
    }
}

// ---------------------------------------------------------------------------
// Request building
// ---------------------------------------------------------------------------

#[test]
fn request_test_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let mut options = RequestOptions::default();

        if let Some(query) = case.get("query").and_then(Value::as_array) {
            options.query = query
                .iter()
                .map(|pair| {
                    let pair = pair.as_array().unwrap();
                    (
                        pair[0].as_str().unwrap().to_string(),
                        pair[1].as_str().unwrap().to_string(),
                    )
                })
                .collect();
        }
        if let Some(headers) = case.get("headers").and_then(Value::as_object) {
            options.headers = normalize_headers(headers)
                .into_iter()
                .map(|(k, v)| (k, HeaderValue::from(v)))
                .collect();
        }
        options.json = case.get("json").cloned();
        options.response_type = case
            .get("response_type")
            .and_then(Value::as_str)
            .map(parse_response_type);

        let built = build_request(
            case["method"].as_str().unwrap(),
            case["url"].as_str().unwrap(),
            &options,
        )
        .unwrap();
        let actual: Value = serde_json::from_str(&built).unwrap();
        assert_eq!(actual, case["expected_request"], "{name}");
    }
}
