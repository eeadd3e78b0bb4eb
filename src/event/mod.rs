//! Normalized event model.
//!
//! # Data Flow
//! ```text
//! structured body / binary headers + body
//!     → codec::decoder (fills one Event in a single pass)
//!     → application code (reads the Event)
//!     → codec::encoder / codec::marshal (read-only views back to the wire)
//! ```
//!
//! # Design Decisions
//! - Empty attribute values are never stored; empty means absent
//! - Named attributes are reached only through the [`Attribute`] table
//! - `data` holds wire-ready bytes and wins over `data_object`

pub mod attributes;

use std::collections::BTreeMap;

use axum::body::Bytes;

pub use attributes::{Attribute, HEADER_PREFIX};

/// One structured event, independent of its wire encoding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Event {
    spec_version: Option<String>,
    ty: Option<String>,
    source: Option<String>,
    subject: Option<String>,
    id: Option<String>,
    time: Option<String>,
    schema_url: Option<String>,
    data_content_type: Option<String>,

    /// Extension attributes keyed by name.
    pub extensions: BTreeMap<String, String>,

    /// Payload bytes in their encoded form, preserved verbatim.
    pub data: Option<Bytes>,

    /// In-memory payload, serialized on output only when `data` is unset.
    pub data_object: Option<serde_json::Value>,
}

impl Event {
    /// Create an empty event.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a named attribute. Absent attributes yield `None`.
    pub fn attribute(&self, attr: Attribute) -> Option<&str> {
        self.slot(attr).as_deref()
    }

    /// Write a named attribute. An empty value clears it.
    pub fn set_attribute(&mut self, attr: Attribute, value: impl Into<String>) {
        let value = value.into();
        *self.slot_mut(attr) = if value.is_empty() { None } else { Some(value) };
    }

    /// Builder-style variant of [`Event::set_attribute`].
    pub fn with_attribute(mut self, attr: Attribute, value: impl Into<String>) -> Self {
        self.set_attribute(attr, value);
        self
    }

    /// Builder-style extension insert. The name is lower-cased.
    pub fn with_extension(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extensions.insert(name.into().to_lowercase(), value.into());
        self
    }

    /// Builder-style payload setter.
    pub fn with_data(mut self, data: impl Into<Bytes>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn spec_version(&self) -> Option<&str> {
        self.attribute(Attribute::SpecVersion)
    }

    pub fn ty(&self) -> Option<&str> {
        self.attribute(Attribute::Type)
    }

    pub fn source(&self) -> Option<&str> {
        self.attribute(Attribute::Source)
    }

    pub fn subject(&self) -> Option<&str> {
        self.attribute(Attribute::Subject)
    }

    pub fn id(&self) -> Option<&str> {
        self.attribute(Attribute::Id)
    }

    pub fn time(&self) -> Option<&str> {
        self.attribute(Attribute::Time)
    }

    pub fn schema_url(&self) -> Option<&str> {
        self.attribute(Attribute::SchemaUrl)
    }

    pub fn data_content_type(&self) -> Option<&str> {
        self.attribute(Attribute::DataContentType)
    }

    fn slot(&self, attr: Attribute) -> &Option<String> {
        match attr {
            Attribute::SpecVersion => &self.spec_version,
            Attribute::Type => &self.ty,
            Attribute::Source => &self.source,
            Attribute::Subject => &self.subject,
            Attribute::Id => &self.id,
            Attribute::Time => &self.time,
            Attribute::DataContentType => &self.data_content_type,
            Attribute::SchemaUrl => &self.schema_url,
        }
    }

    fn slot_mut(&mut self, attr: Attribute) -> &mut Option<String> {
        match attr {
            Attribute::SpecVersion => &mut self.spec_version,
            Attribute::Type => &mut self.ty,
            Attribute::Source => &mut self.source,
            Attribute::Subject => &mut self.subject,
            Attribute::Id => &mut self.id,
            Attribute::Time => &mut self.time,
            Attribute::DataContentType => &mut self.data_content_type,
            Attribute::SchemaUrl => &mut self.schema_url,
        }
    }
}
