//! Conversions between the [`User`] entity and the store's schemaless
//! record format.
//!
//! The write path is typed: entities become a [`UserRecord`] with the
//! canonical coercion rules, serialized to a document. The read path is
//! defensive instead, pulling fields one by one so that a missing or
//! oddly-typed field degrades to the empty-string default rather than
//! rejecting the whole record.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::domain::{User, UserInput};
use crate::store::Document;

/// The storage shape of a user, with the store's camelCase field names.
///
/// `id` is omitted entirely when absent (creation never sends one). Optional
/// address fields are stored as explicit nulls, email as an empty string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    /// ISO-8601 with millisecond precision, or null.
    pub birth_date: Option<String>,
    pub email: String,
    pub street: Option<String>,
    pub zip_code: Option<String>,
    pub city: Option<String>,
}

/// Entity → storage record, without an id. Used by both create and update.
pub fn to_record(user: &User) -> UserRecord {
    UserRecord {
        id: None,
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        birth_date: user.birth_date.map(format_birth_date),
        email: user.email.clone(),
        street: none_if_empty(&user.street),
        zip_code: none_if_empty(&user.zip_code),
        city: none_if_empty(&user.city),
    }
}

/// Storage record → schemaless document.
pub fn record_to_document(record: &UserRecord) -> Document {
    match serde_json::to_value(record) {
        Ok(Value::Object(map)) => map,
        // A struct with named fields always serializes to an object.
        _ => Document::new(),
    }
}

/// Raw document → entity. Missing or non-string textual fields become empty
/// strings; a null or unparseable birth date stays absent.
pub fn document_to_user(id: &str, document: &Document) -> User {
    User::from_input(UserInput {
        id: Some(id.to_string()),
        first_name: text_field(document, "firstName"),
        last_name: text_field(document, "lastName"),
        birth_date: parse_birth_date(id, document.get("birthDate")),
        email: text_field(document, "email"),
        street: text_field(document, "street"),
        zip_code: text_field(document, "zipCode"),
        city: text_field(document, "city"),
    })
}

fn format_birth_date(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_birth_date(id: &str, value: Option<&Value>) -> Option<DateTime<Utc>> {
    let raw = value?.as_str()?;
    match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => Some(parsed.with_timezone(&Utc)),
        Err(error) => {
            warn!(id = %id, raw = %raw, error = %error, "Ignoring unparseable birth date");
            None
        }
    }
}

fn text_field(document: &Document, key: &str) -> Option<String> {
    document
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn none_if_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
