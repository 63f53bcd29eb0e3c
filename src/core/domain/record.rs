//! Record type.
//!
//! One logical user entry parsed out of the authorize file.

use std::ops::Range;

use serde::Serialize;

use crate::core::constants::{CLEARTEXT_PASSWORD, NT_PASSWORD, REPLY_MESSAGE};

/// A single `Name := "value"` item attached to a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    name: String,
    value: String,
}

impl Attribute {
    /// Create a new attribute
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Attribute name, e.g. `NT-Password`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unquoted attribute value
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// The attribute a record authenticates with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretAttribute<'a> {
    /// Upper-case hex MD4 digest of the UTF-16LE secret
    NtHash(&'a str),
    /// Secret stored as-is
    Cleartext(&'a str),
}

impl<'a> SecretAttribute<'a> {
    /// Attribute name as written in the file
    pub fn name(&self) -> &'static str {
        match self {
            SecretAttribute::NtHash(_) => NT_PASSWORD,
            SecretAttribute::Cleartext(_) => CLEARTEXT_PASSWORD,
        }
    }

    /// Stored value
    pub fn value(&self) -> &'a str {
        match self {
            SecretAttribute::NtHash(v) | SecretAttribute::Cleartext(v) => v,
        }
    }
}

/// A user entry: header username plus the attributes of its block.
///
/// `source_range` is the span of file lines the block occupied when it was
/// parsed. It is only meaningful against the exact line sequence it came
/// from and goes stale as soon as the file is rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    username: String,
    attributes: Vec<Attribute>,
    #[serde(skip)]
    source_range: Range<usize>,
}

impl Record {
    /// Create an empty record for `username` spanning `source_range`
    pub fn new(username: impl Into<String>, source_range: Range<usize>) -> Self {
        Self {
            username: username.into(),
            attributes: Vec::new(),
            source_range,
        }
    }

    /// Append an attribute, keeping file order
    pub fn push(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    /// Builder-style [`Record::push`]
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.push(Attribute::new(name, value));
        self
    }

    pub(crate) fn set_end(&mut self, end: usize) {
        self.source_range.end = end;
    }

    /// Record's username
    pub fn username(&self) -> &str {
        &self.username
    }

    /// All attributes in file order
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// First value of the named attribute
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// The secret attribute, preferring `NT-Password` over `Cleartext-Password`
    pub fn secret(&self) -> Option<SecretAttribute<'_>> {
        if let Some(hash) = self.get(NT_PASSWORD) {
            return Some(SecretAttribute::NtHash(hash));
        }
        self.get(CLEARTEXT_PASSWORD).map(SecretAttribute::Cleartext)
    }

    /// The reply message, if any
    pub fn reply_message(&self) -> Option<&str> {
        self.get(REPLY_MESSAGE)
    }

    /// Lines this record occupied in the parsed sequence (end exclusive)
    pub fn source_range(&self) -> Range<usize> {
        self.source_range.clone()
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.username)
    }
}
