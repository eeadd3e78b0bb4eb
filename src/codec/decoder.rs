//! Inbound decoding: HTTP request → [`Event`].
//!
//! # Responsibilities
//! - Read the request body to completion
//! - Pick structured or binary mode from `Content-Type`
//! - Map JSON members or `ce-*` headers onto the event through the attribute table
//!
//! # Design Decisions
//! - Mode selection is a case-sensitive prefix check on the raw header value
//! - Attribute values that are not JSON strings decode to absent, never to an error
//! - The `data` member is kept as its raw JSON text, byte for byte
//! - In binary mode `Content-Type` is not copied into `datacontenttype`

use std::collections::HashMap;

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderMap, Request},
};
use serde_json::value::RawValue;

use crate::codec::types::{CodecResult, Mode};
use crate::event::{Attribute, Event, HEADER_PREFIX};

/// Name of the structured-mode payload member.
const DATA_MEMBER: &str = "data";

/// Decode an HTTP request, reading at most `limit` body bytes.
pub async fn from_http_request(request: Request<Body>, limit: usize) -> CodecResult<(Event, Mode)> {
    let (parts, body) = request.into_parts();
    let body = axum::body::to_bytes(body, limit).await?;
    decode(&parts.headers, body)
}

/// Decode an already-buffered request.
pub fn decode(headers: &HeaderMap, body: Bytes) -> CodecResult<(Event, Mode)> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .map(|v| v.as_bytes())
        .unwrap_or_default();
    tracing::trace!(content_type = %String::from_utf8_lossy(content_type), "Decoding event");

    match Mode::from_content_type(content_type) {
        Mode::Structured => Ok((decode_structured(&body)?, Mode::Structured)),
        Mode::Binary => Ok((decode_binary(headers, body), Mode::Binary)),
    }
}

fn decode_structured(body: &[u8]) -> CodecResult<Event> {
    let envelope: HashMap<String, Box<RawValue>> = serde_json::from_slice(body)?;
    let mut event = Event::new();

    for (key, raw) in envelope {
        if key == DATA_MEMBER {
            event.data = Some(Bytes::copy_from_slice(raw.get().as_bytes()));
            continue;
        }

        let decoded: Option<String> = serde_json::from_str(raw.get()).ok();
        tracing::trace!(attribute = %key, value = ?decoded, "Structured member");

        match Attribute::from_name(&key) {
            Some(attr) => event.set_attribute(attr, decoded.unwrap_or_default()),
            None => {
                let value = decoded.unwrap_or_else(|| raw.get().to_owned());
                event.extensions.insert(key, value);
            }
        }
    }

    Ok(event)
}

fn decode_binary(headers: &HeaderMap, body: Bytes) -> Event {
    let mut event = Event::new();

    // HeaderName is always lower-case, so the prefix match is case-insensitive.
    for name in headers.keys() {
        let Some(attr_name) = name.as_str().strip_prefix(HEADER_PREFIX) else {
            continue;
        };
        let Some(value) = headers.get(name) else {
            continue;
        };
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        tracing::trace!(header = %name, value = %value, "Binary header");

        match Attribute::from_name(attr_name) {
            Some(attr) => event.set_attribute(attr, value),
            None => {
                event.extensions.insert(attr_name.to_owned(), value);
            }
        }
    }

    tracing::trace!(body = %String::from_utf8_lossy(&body), "Binary body");
    event.data = Some(body);
    event
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::types::CodecError;
    use axum::http::{HeaderName, HeaderValue};

    fn structured_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/cloudevents+json; charset=utf-8"),
        );
        headers
    }

    #[test]
    fn test_structured_decode() {
        let body = r#"{"specversion":"1.0","type":"com.example.test","source":"/test","data":{"x":1}}"#;
        let (event, mode) = decode(&structured_headers(), Bytes::from(body)).unwrap();

        assert_eq!(mode, Mode::Structured);
        assert_eq!(event.spec_version(), Some("1.0"));
        assert_eq!(event.ty(), Some("com.example.test"));
        assert_eq!(event.source(), Some("/test"));
        assert_eq!(event.subject(), None);
        assert_eq!(event.data.as_deref(), Some(&br#"{"x":1}"#[..]));
        assert!(event.extensions.is_empty());
    }

    #[test]
    fn test_structured_data_is_kept_raw() {
        let body = r#"{"data": [1, 2,  {"nested" : "yes"}], "datacontenttype": "application/json"}"#;
        let (event, _) = decode(&structured_headers(), Bytes::from(body)).unwrap();

        assert_eq!(event.data.as_deref(), Some(&br#"[1, 2,  {"nested" : "yes"}]"#[..]));
        assert_eq!(event.data_content_type(), Some("application/json"));
    }

    #[test]
    fn test_structured_non_string_attribute_is_absent() {
        let body = r#"{"id":42,"time":null,"subject":"ok"}"#;
        let (event, _) = decode(&structured_headers(), Bytes::from(body)).unwrap();

        assert_eq!(event.id(), None);
        assert_eq!(event.time(), None);
        assert_eq!(event.subject(), Some("ok"));
    }

    #[test]
    fn test_structured_extensions() {
        let body = r#"{"traceparent":"00-abc","Tenant":"acme","count":3,"Type":"x"}"#;
        let (event, _) = decode(&structured_headers(), Bytes::from(body)).unwrap();

        assert_eq!(event.extensions.get("traceparent").map(String::as_str), Some("00-abc"));
        assert_eq!(event.extensions.get("Tenant").map(String::as_str), Some("acme"));
        assert_eq!(event.extensions.get("count").map(String::as_str), Some("3"));
        // Attribute dispatch is case-sensitive
        assert_eq!(event.ty(), None);
        assert_eq!(event.extensions.get("Type").map(String::as_str), Some("x"));
    }

    #[test]
    fn test_structured_malformed_json_fails() {
        let result = decode(&structured_headers(), Bytes::from(r#"{"type":"#));
        assert!(matches!(result, Err(CodecError::Json(_))));

        let result = decode(&structured_headers(), Bytes::new());
        assert!(matches!(result, Err(CodecError::Json(_))));

        let result = decode(&structured_headers(), Bytes::from("[1,2]"));
        assert!(matches!(result, Err(CodecError::Json(_))));
    }

    #[test]
    fn test_structured_with_non_ascii_content_type_parameter() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_bytes(b"application/cloudevents+json; x=\xe9").unwrap(),
        );

        let (event, mode) = decode(&headers, Bytes::from(r#"{"type":"t"}"#)).unwrap();
        assert!(!mode.is_binary());
        assert_eq!(event.ty(), Some("t"));
    }

    #[test]
    fn test_binary_decode() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("ce-specversion", HeaderValue::from_static("1.0"));
        headers.insert(
            HeaderName::from_bytes(b"CE-Type").unwrap(),
            HeaderValue::from_static("com.example.test"),
        );
        headers.insert("ce-source", HeaderValue::from_static("/test"));

        let (event, mode) = decode(&headers, Bytes::from(r#"{"x":1}"#)).unwrap();

        assert_eq!(mode, Mode::Binary);
        assert_eq!(event.spec_version(), Some("1.0"));
        assert_eq!(event.ty(), Some("com.example.test"));
        assert_eq!(event.source(), Some("/test"));
        assert_eq!(event.data.as_deref(), Some(&br#"{"x":1}"#[..]));
        // Content-Type is not an event attribute in binary mode
        assert_eq!(event.data_content_type(), None);
    }

    #[test]
    fn test_binary_extensions_and_ignored_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_bytes(b"Ce-TraceParent").unwrap(),
            HeaderValue::from_static("00-abc"),
        );
        headers.append("ce-tenant", HeaderValue::from_static("first"));
        headers.append("ce-tenant", HeaderValue::from_static("second"));
        headers.insert("x-request-id", HeaderValue::from_static("r-1"));
        headers.insert("ce-datacontenttype", HeaderValue::from_static("text/plain"));

        let (event, _) = decode(&headers, Bytes::from_static(b"hello")).unwrap();

        assert_eq!(event.extensions.len(), 2);
        assert_eq!(event.extensions.get("traceparent").map(String::as_str), Some("00-abc"));
        assert_eq!(event.extensions.get("tenant").map(String::as_str), Some("first"));
        assert_eq!(event.data_content_type(), Some("text/plain"));
        assert_eq!(event.data.as_deref(), Some(&b"hello"[..]));
    }

    #[test]
    fn test_binary_without_content_type() {
        let (event, mode) = decode(&HeaderMap::new(), Bytes::new()).unwrap();
        assert!(mode.is_binary());
        assert_eq!(event.data.as_deref(), Some(&b""[..]));
    }

    #[tokio::test]
    async fn test_from_http_request() {
        let request = Request::builder()
            .method("POST")
            .header("content-type", "text/plain")
            .header("ce-id", "abc-123")
            .body(Body::from("payload"))
            .unwrap();

        let (event, mode) = from_http_request(request, 1024).await.unwrap();
        assert!(mode.is_binary());
        assert_eq!(event.id(), Some("abc-123"));
        assert_eq!(event.data.as_deref(), Some(&b"payload"[..]));
    }

    #[tokio::test]
    async fn test_from_http_request_body_over_limit() {
        let request = Request::builder()
            .body(Body::from("0123456789"))
            .unwrap();

        let result = from_http_request(request, 4).await;
        assert!(matches!(result, Err(CodecError::Body(_))));
    }
}
