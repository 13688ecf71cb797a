//! # Request ID Tracking
//!
//! Correlation ids attached to every request and echoed in the `x-request-id`
//! response header. Uses CUID2 for collision-resistant, URL-safe identifiers.

/// Header carrying the request id in both directions.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// A request ID type using CUID2.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a new random request ID.
    #[inline]
    pub fn new() -> Self { Self(cuid2::cuid()) }

    /// Accept a caller supplied id if it looks like one of ours.
    ///
    /// Ids must be 20 to 64 characters of ASCII alphanumerics, `-` or `_`.
    pub fn try_from_header(value: &str) -> Option<Self> {
        let value = value.trim();
        let valid = (20 ..= 64).contains(&value.len()) &&
            value
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        valid.then(|| Self(value.to_string()))
    }

    /// Reuse the incoming header value when valid, otherwise generate a fresh id.
    pub fn from_header_or_new(value: Option<&str>) -> Self { value.and_then(Self::try_from_header).unwrap_or_default() }

    /// Get the request ID as a string.
    #[inline]
    pub fn as_str(&self) -> &str { &self.0 }
}

impl Default for RequestId {
    #[inline]
    fn default() -> Self { Self::new() }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(&self.0) }
}
