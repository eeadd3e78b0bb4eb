//! Outbound encoding: [`Event`] → binary-mode HTTP headers.
//!
//! # Responsibilities
//! - Append one `ce-*` header per populated attribute and extension
//! - Append `Content-Type` from `datacontenttype`
//!
//! # Design Decisions
//! - Headers are appended, existing entries are never replaced
//! - Values are trimmed; blank values produce no header
//! - Names or values the HTTP layer cannot carry are skipped, so encoding never fails

use axum::http::{header, HeaderMap, HeaderName, HeaderValue};

use crate::event::{Attribute, Event, HEADER_PREFIX};

impl Event {
    /// Append this event's attributes to `headers` in binary-mode form.
    pub fn to_http_headers(&self, headers: &mut HeaderMap) {
        for attr in Attribute::ALL {
            add_header(headers, attr.header_name(), self.attribute(attr).unwrap_or_default());
        }

        for (name, value) in &self.extensions {
            add_header(headers, &format!("{}{}", HEADER_PREFIX, name), value);
        }

        add_header(
            headers,
            header::CONTENT_TYPE.as_str(),
            self.data_content_type().unwrap_or_default(),
        );
    }
}

/// Append `name: value` after trimming both. Blank values are dropped.
pub fn add_header(headers: &mut HeaderMap, name: &str, value: &str) {
    let name = name.trim();
    let value = value.trim();
    if value.is_empty() {
        return;
    }

    let Ok(header_name) = HeaderName::from_bytes(name.as_bytes()) else {
        tracing::warn!(header = %name, "Skipping header with invalid name");
        return;
    };
    let Ok(header_value) = HeaderValue::from_str(value) else {
        tracing::warn!(header = %header_name, "Skipping header with invalid value");
        return;
    };

    tracing::trace!(header = %header_name, value = %value, "Setting header");
    headers.append(header_name, header_value);
}
