//! Attribute table shared by every wire path.
//!
//! Structured decode, binary decode, header encoding and structured
//! marshalling all resolve attribute names through [`Attribute`], so the
//! mapping between wire names and [`Event`](super::Event) fields lives in
//! exactly one place.

use std::fmt;

/// Prefix carried by every binary-mode event header.
pub const HEADER_PREFIX: &str = "ce-";

/// The named (non-extension) event attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    SpecVersion,
    Type,
    Source,
    Subject,
    Id,
    Time,
    DataContentType,
    SchemaUrl,
}

impl Attribute {
    /// All attributes, in the order headers are written.
    pub const ALL: [Attribute; 8] = [
        Attribute::SpecVersion,
        Attribute::Type,
        Attribute::Source,
        Attribute::Subject,
        Attribute::Id,
        Attribute::Time,
        Attribute::DataContentType,
        Attribute::SchemaUrl,
    ];

    /// Canonical lower-case attribute name.
    pub const fn name(self) -> &'static str {
        match self {
            Attribute::SpecVersion => "specversion",
            Attribute::Type => "type",
            Attribute::Source => "source",
            Attribute::Subject => "subject",
            Attribute::Id => "id",
            Attribute::Time => "time",
            Attribute::DataContentType => "datacontenttype",
            Attribute::SchemaUrl => "schemaurl",
        }
    }

    /// Binary-mode header name (`ce-<name>`).
    pub const fn header_name(self) -> &'static str {
        match self {
            Attribute::SpecVersion => "ce-specversion",
            Attribute::Type => "ce-type",
            Attribute::Source => "ce-source",
            Attribute::Subject => "ce-subject",
            Attribute::Id => "ce-id",
            Attribute::Time => "ce-time",
            Attribute::DataContentType => "ce-datacontenttype",
            Attribute::SchemaUrl => "ce-schemaurl",
        }
    }

    /// Exact, case-sensitive lookup by canonical name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|attr| attr.name() == name)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
