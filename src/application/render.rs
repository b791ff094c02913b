//! Text rendering of contacts and of the directory tree

use itertools::Itertools;

use crate::config::DisplayConfig;
use crate::domain::{ContactDirectory, ContactRecord};

fn field<'a>(value: Option<&'a str>, display: &'a DisplayConfig) -> &'a str {
    value.unwrap_or(&display.placeholder)
}

/// One-line form: name, phone, email, address joined by the separator.
pub fn record_line(record: &ContactRecord, display: &DisplayConfig) -> String {
    [
        record.name.as_str(),
        record.phone.as_str(),
        field(record.email.as_deref(), display),
        field(record.address.as_deref(), display),
    ]
    .iter()
    .join(&display.separator)
}

/// Labeled multi-line form shown after an update.
pub fn record_details(record: &ContactRecord, display: &DisplayConfig) -> Vec<String> {
    vec![
        format!("Name: {}", record.name),
        format!("Phone: {}", record.phone),
        format!("Email: {}", field(record.email.as_deref(), display)),
        format!("Address: {}", field(record.address.as_deref(), display)),
    ]
}

/// Tree shape of the directory, `None` when it is empty.
pub fn directory_tree(directory: &ContactDirectory) -> Option<String> {
    directory.to_tree().map(|tree| tree.to_string())
}
