/**
 * Request Validation
 *
 * Every mutating endpoint declares its required fields up front and checks
 * them before touching the database. All failing fields are reported in one
 * response, not just the first.
 *
 * Request bodies deserialize into structs whose fields are all `Option`, so a
 * missing field is a validation failure rather than a JSON rejection:
 *
 * ```rust
 * use social_backend::backend::validation::Validator;
 *
 * let mut v = Validator::default();
 * let text = v.required("text", Some("hello".to_string()), "Text is Required");
 * let image = v.required("image", None, "Image is Required");
 * assert!(v.finish().is_err());
 * # let _ = (text, image);
 * ```
 */

use axum::extract::FromRequest;
use serde::Deserialize;
use uuid::Uuid;

use crate::backend::error::{BackendError, ErrorDetail};

/// JSON body extractor whose rejection is a `BackendError`
///
/// Malformed bodies therefore come back in the same error envelope as field
/// validation failures.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(BackendError))]
pub struct ValidJson<T>(pub T);

/// Collects field failures for one request
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<ErrorDetail>,
}

impl Validator {
    /// Require a non-blank string field
    ///
    /// Returns the value unchanged, or an empty string when the field failed
    /// (the caller must call [`Validator::finish`] before using it).
    pub fn required(&mut self, param: &str, value: Option<String>, msg: &str) -> String {
        match value {
            Some(value) if !value.trim().is_empty() => value,
            _ => {
                self.errors.push(ErrorDetail::field(param, msg));
                String::new()
            }
        }
    }

    /// Require a list with at least one non-blank entry
    pub fn required_list(&mut self, param: &str, value: Option<ListInput>, msg: &str) -> Vec<String> {
        let items = value.map(ListInput::into_items).unwrap_or_default();
        if items.is_empty() {
            self.errors.push(ErrorDetail::field(param, msg));
        }
        items
    }

    /// Fail with every collected error, or succeed when none were recorded
    pub fn finish(self) -> Result<(), BackendError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(BackendError::Validation(self.errors))
        }
    }
}

/// Parse a document id taken from the path
///
/// An id that is not a UUID cannot name any stored document, so it fails
/// with the same 404 as a lookup miss.
pub fn parse_id(raw: &str, not_found: &str) -> Result<Uuid, BackendError> {
    Uuid::parse_str(raw.trim()).map_err(|_| BackendError::not_found(not_found))
}

/// A list field that clients may send as `"a, b"` or `["a", "b"]`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListInput {
    Joined(String),
    Items(Vec<String>),
}

impl ListInput {
    /// Split, trim and drop empty entries
    pub fn into_items(self) -> Vec<String> {
        let raw: Vec<String> = match self {
            ListInput::Joined(joined) => joined.split(',').map(str::to_string).collect(),
            ListInput::Items(items) => items,
        };
        raw.into_iter()
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect()
    }
}
