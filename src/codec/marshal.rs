//! Structured-mode serialization and payload extraction.

use std::collections::BTreeMap;

use axum::body::Bytes;
use serde_json::value::{to_raw_value, RawValue};

use crate::codec::types::CodecResult;
use crate::event::{Attribute, Event};

impl Event {
    /// Serialize as a structured-mode JSON document.
    ///
    /// Only populated attributes are written. `data` is embedded verbatim when
    /// it holds valid JSON and as a JSON string otherwise; `data_object` is
    /// serialized only when `data` is unset or empty. Extension names are
    /// lower-cased and win over a named attribute of the same name.
    pub fn marshal(&self) -> CodecResult<Vec<u8>> {
        let mut envelope: BTreeMap<String, Box<RawValue>> = BTreeMap::new();

        for attr in Attribute::ALL {
            if let Some(value) = self.attribute(attr) {
                envelope.insert(attr.name().to_owned(), to_raw_value(value)?);
            }
        }

        if let Some(data) = self.data_member()? {
            envelope.insert("data".to_owned(), data);
        }

        // Names differing only in case collapse to one member; the last in
        // map order wins, and upper-case sorts before lower-case.
        for (name, value) in &self.extensions {
            envelope.insert(name.to_lowercase(), to_raw_value(value)?);
        }

        Ok(serde_json::to_vec_pretty(&envelope)?)
    }

    /// Payload bytes for a binary-mode body.
    pub fn payload(&self) -> CodecResult<Bytes> {
        if let Some(data) = self.populated_data() {
            return Ok(data.clone());
        }
        match &self.data_object {
            Some(object) => Ok(Bytes::from(serde_json::to_vec(object)?)),
            None => Ok(Bytes::new()),
        }
    }

    fn populated_data(&self) -> Option<&Bytes> {
        self.data.as_ref().filter(|data| !data.is_empty())
    }

    fn data_member(&self) -> CodecResult<Option<Box<RawValue>>> {
        if let Some(data) = self.populated_data() {
            return raw_payload(data).map(Some);
        }
        match &self.data_object {
            Some(object) => Ok(Some(to_raw_value(object)?)),
            None => Ok(None),
        }
    }
}

fn raw_payload(data: &[u8]) -> CodecResult<Box<RawValue>> {
    let text = String::from_utf8_lossy(data);
    match RawValue::from_string(text.clone().into_owned()) {
        Ok(raw) => Ok(raw),
        Err(_) => Ok(to_raw_value(&text)?),
    }
}
