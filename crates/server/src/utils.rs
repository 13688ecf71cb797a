//! Small helpers shared by handlers.

use std::net::SocketAddr;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use error::{AppError, Result};
use http::HeaderMap;

/// Escape LIKE wildcards (`%`, `_`) and the escape character itself so the
/// string matches literally inside a `LIKE ... ESCAPE '\'` pattern.
pub fn escape_like_wildcards(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Best effort caller address: first `X-Forwarded-For` entry, then
/// `X-Real-IP`, then the socket peer.
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> Option<String> {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());
    if let Some(ip) = forwarded {
        return Some(ip.to_string());
    }

    let real_ip = headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty());
    if let Some(ip) = real_ip {
        return Some(ip.to_string());
    }

    peer.map(|addr| addr.ip().to_string())
}

/// Header value as an owned, non-empty string.
pub fn header_string(headers: &HeaderMap, name: http::header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Parse a timestamp given either as RFC 3339 or as a plain `YYYY-MM-DD`
/// date (midnight UTC).
pub fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(start_of_day)
}

/// Like [`parse_datetime`] but reports which parameter was malformed.
pub fn parse_datetime_param(name: &str, value: &str) -> Result<DateTime<Utc>> {
    parse_datetime(value).ok_or_else(|| AppError::bad_request(format!("Invalid date for {}", name)))
}

pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> { Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)) }

/// 23:59:59.999 UTC on `date`.
pub fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    let last_milli = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
    Utc.from_utc_datetime(&date.and_time(last_milli))
}

/// Trimmed optional text where an empty string means "not given".
pub fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_wildcards() {
        assert_eq!(escape_like_wildcards("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like_wildcards("rust"), "rust");
    }

    #[test]
    fn test_client_ip_precedence() {
        let peer: SocketAddr = "10.0.0.9:4000".parse().unwrap();
        let mut headers = HeaderMap::new();
        assert_eq!(client_ip(&headers, Some(peer)).as_deref(), Some("10.0.0.9"));

        headers.insert("x-real-ip", "192.168.1.5".parse().unwrap());
        assert_eq!(client_ip(&headers, Some(peer)).as_deref(), Some("192.168.1.5"));

        headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
        assert_eq!(client_ip(&headers, Some(peer)).as_deref(), Some("203.0.113.7"));

        assert_eq!(client_ip(&HeaderMap::new(), None), None);
    }

    #[test]
    fn test_parse_datetime_forms() {
        let date = parse_datetime("2025-03-01").unwrap();
        assert_eq!(date.to_rfc3339(), "2025-03-01T00:00:00+00:00");

        let ts = parse_datetime("2025-03-01T10:30:00+02:00").unwrap();
        assert_eq!(ts.to_rfc3339(), "2025-03-01T08:30:00+00:00");

        assert!(parse_datetime("yesterday").is_none());
        assert!(parse_datetime_param("startDate", "nope").is_err());
    }

    #[test]
    fn test_end_of_day() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        assert_eq!(
            end_of_day(date).to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            "2025-01-31T23:59:59.999Z"
        );
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some("  ".into())), None);
        assert_eq!(non_empty(Some(" Jobs ".into())).as_deref(), Some("Jobs"));
        assert_eq!(non_empty(None), None);
    }
}
