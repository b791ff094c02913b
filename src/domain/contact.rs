//! Domain entities: contact record and update set

use std::fmt;

use crate::domain::{DomainError, DomainResult};

/// A single entry in the contact directory.
///
/// `name` keeps its original casing; ordering and lookups go through
/// [`ContactRecord::key`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRecord {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl ContactRecord {
    /// Create a record with the two required fields.
    ///
    /// Fails with [`DomainError::InvalidArgument`] if `name` or `phone` is
    /// empty or whitespace only.
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> DomainResult<Self> {
        let record = Self {
            name: name.into(),
            phone: phone.into(),
            email: None,
            address: None,
        };
        record.validate()?;
        Ok(record)
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = non_empty(Some(email.into()));
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = non_empty(Some(address.into()));
        self
    }

    /// Case-insensitive sort and search key.
    pub fn key(&self) -> String {
        normalize_key(&self.name)
    }

    /// Check the required fields. Fields are public, so the directory
    /// re-checks on insert.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidArgument { field: "name" });
        }
        if self.phone.trim().is_empty() {
            return Err(DomainError::InvalidArgument { field: "phone" });
        }
        Ok(())
    }
}

impl fmt::Display for ContactRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.phone)
    }
}

/// Replacement values for [`ContactDirectory::update`](crate::domain::ContactDirectory::update).
///
/// Absent and empty values both mean "keep what is stored": a field can be
/// replaced but never cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactUpdate {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl ContactUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Overwrite the non-key fields of `record` that carry a non-empty value.
    pub fn apply_to(&self, record: &mut ContactRecord) {
        if let Some(phone) = non_empty(self.phone.clone()) {
            record.phone = phone;
        }
        if let Some(email) = non_empty(self.email.clone()) {
            record.email = Some(email);
        }
        if let Some(address) = non_empty(self.address.clone()) {
            record.address = Some(address);
        }
    }
}

pub(crate) fn normalize_key(name: &str) -> String {
    name.to_lowercase()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
