//! Request-context enrichment for the ingest path: client IP, User-Agent
//! parsing, and optional GeoIP lookup.

use axum::http::HeaderMap;

use folio_core::event::VisitorProfile;

/// Extract the real client IP: first `X-Forwarded-For` entry, then
/// `X-Real-IP`, then the loopback placeholder.
pub fn extract_client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        })
        .unwrap_or_else(|| "127.0.0.1".to_string())
}

/// Header value as an owned string, empty when absent or non-UTF-8.
pub fn header_str(headers: &HeaderMap, name: axum::http::header::HeaderName) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string()
}

/// Build the visitor enrichment profile from the User-Agent string and an
/// optional GeoIP lookup. Both halves are best-effort; a missing database or
/// unparseable UA just leaves fields as `None`.
pub fn visitor_profile(geoip_path: &str, ip: &str, user_agent: &str) -> VisitorProfile {
    let mut profile = VisitorProfile::default();

    if let Some(ua) = parse_user_agent(user_agent) {
        profile.browser = Some(ua.browser);
        profile.os = Some(ua.os);
        profile.device_type = Some(ua.device_type);
    }

    if let Some(geo) = lookup_geo(geoip_path, ip) {
        profile.country = geo.country;
        profile.city = geo.city;
    }

    profile
}

struct GeoInfo {
    country: Option<String>,
    city: Option<String>,
}

/// Attempt a GeoIP lookup for `ip` using the MaxMind database at `path`.
///
/// Returns `None` if the database file is missing or the IP cannot be
/// parsed. Absence is non-fatal: visitors are stored with NULL geo fields.
fn lookup_geo(path: &str, ip: &str) -> Option<GeoInfo> {
    use std::net::IpAddr;
    use std::str::FromStr;

    if !std::path::Path::new(path).exists() {
        // Database absent; warning already logged at startup.
        return None;
    }

    let reader = maxminddb::Reader::open_readfile(path).ok()?;
    let ip_addr = IpAddr::from_str(ip).ok()?;

    let record: maxminddb::geoip2::City = reader.lookup(ip_addr).ok()?;

    let country = record
        .country
        .as_ref()
        .and_then(|c| c.iso_code)
        .map(|s| s.to_string());

    let city = record
        .city
        .as_ref()
        .and_then(|c| c.names.as_ref())
        .and_then(|names| names.get("en"))
        .map(|s| s.to_string());

    Some(GeoInfo { country, city })
}

struct UaInfo {
    browser: String,
    os: String,
    device_type: String,
}

/// Parse a `User-Agent` string via the `woothee` crate.
///
/// Returns `None` if the UA string is empty or cannot be classified.
fn parse_user_agent(user_agent: &str) -> Option<UaInfo> {
    if user_agent.is_empty() {
        return None;
    }

    let result = woothee::parser::Parser::new().parse(user_agent)?;

    // woothee `category` maps to our device_type convention:
    //   "smartphone" / "mobilephone" → "mobile"
    //   "tablet"                     → "tablet"
    //   everything else              → "desktop" (conservative default)
    let device_type = match result.category {
        "smartphone" | "mobilephone" => "mobile",
        "tablet" => "tablet",
        _ => "desktop",
    }
    .to_string();

    Some(UaInfo {
        browser: result.name.to_string(),
        os: result.os.to_string(),
        device_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::USER_AGENT;

    #[test]
    fn forwarded_for_takes_first_entry() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
        assert_eq!(extract_client_ip(&headers), "203.0.113.7");
    }

    #[test]
    fn real_ip_is_the_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", "203.0.113.9".parse().unwrap());
        assert_eq!(extract_client_ip(&headers), "203.0.113.9");
    }

    #[test]
    fn loopback_when_no_headers() {
        assert_eq!(extract_client_ip(&HeaderMap::new()), "127.0.0.1");
    }

    #[test]
    fn missing_user_agent_reads_as_empty() {
        assert_eq!(header_str(&HeaderMap::new(), USER_AGENT), "");
    }

    #[test]
    fn chrome_ua_classifies_as_desktop() {
        let profile = visitor_profile(
            "/nonexistent/GeoLite2-City.mmdb",
            "127.0.0.1",
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
             (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
        );
        assert_eq!(profile.device_type.as_deref(), Some("desktop"));
        assert_eq!(profile.browser.as_deref(), Some("Chrome"));
        assert_eq!(profile.country, None);
    }

    #[test]
    fn empty_ua_leaves_profile_unset() {
        let profile = visitor_profile("/nonexistent.mmdb", "127.0.0.1", "");
        assert_eq!(profile.browser, None);
        assert_eq!(profile.device_type, None);
    }
}
