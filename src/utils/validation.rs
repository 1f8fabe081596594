//! Client-side validation of create requests.
//!
//! Runs before submission; a rejected request never reaches the network.

use crate::domain::entities::NewLink;
use crate::error::ClientError;
use validator::Validate;

/// Message shown when the target URL does not look like an http(s) URL.
pub const INVALID_URL_MESSAGE: &str =
    "Please enter a valid target URL (starting with http/https).";

/// Message shown when a custom code is not 6-8 alphanumeric characters.
pub const INVALID_CODE_MESSAGE: &str =
    "Custom code must be 6-8 alphanumeric characters (A-Z, a-z, 0-9).";

/// Validates a create payload.
///
/// # Rules
///
/// - `target_url` must match an `http(s)://` URL with a dotted host
/// - `custom_code`, if present, must be 6-8 characters of `[A-Za-z0-9]`
///
/// The URL is reported first when both fields are invalid.
///
/// # Errors
///
/// Returns [`ClientError::Validation`] with the user-facing message.
///
/// # Examples
///
/// ```
/// use tinylink_dashboard::domain::entities::NewLink;
/// use tinylink_dashboard::utils::validation::validate_new_link;
///
/// assert!(validate_new_link(&NewLink::new("https://rust-lang.org", None)).is_ok());
/// assert!(validate_new_link(&NewLink::new("ftp://rust-lang.org", None)).is_err());
/// assert!(validate_new_link(&NewLink::new("https://rust-lang.org", Some("ab".into()))).is_err());
/// ```
pub fn validate_new_link(new_link: &NewLink) -> Result<(), ClientError> {
    let Err(errors) = new_link.validate() else {
        return Ok(());
    };

    let fields = errors.field_errors();
    if fields.contains_key("target_url") || fields.contains_key("targetUrl") {
        return Err(ClientError::validation(INVALID_URL_MESSAGE));
    }
    Err(ClientError::validation(INVALID_CODE_MESSAGE))
}

/// Returns true if `code` has the shape of a short code.
pub fn is_valid_code(code: &str) -> bool {
    crate::domain::entities::link::CUSTOM_CODE_REGEX.is_match(code)
}
