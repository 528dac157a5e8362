//! Client address extraction for rate limiting and access logs.

use axum::http::HeaderMap;
use std::net::{IpAddr, SocketAddr};

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_REAL_IP: &str = "x-real-ip";

/// Determines the client IP address of a request.
///
/// With `behind_proxy` disabled, the peer socket address is always used and
/// forwarding headers are ignored (they are trivially spoofable).
///
/// With `behind_proxy` enabled the lookup order is:
/// 1. First entry of `X-Forwarded-For`
/// 2. `X-Real-IP`
/// 3. Peer socket address
///
/// Header values that do not parse as an IP address are skipped.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
///
/// let ip = client_ip(&headers, "10.0.0.1:4000".parse().unwrap(), true);
/// assert_eq!(ip.to_string(), "203.0.113.7");
/// ```
pub fn client_ip(headers: &HeaderMap, peer: SocketAddr, behind_proxy: bool) -> IpAddr {
    if behind_proxy {
        let forwarded = headers
            .get(X_FORWARDED_FOR)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .and_then(|v| v.trim().parse::<IpAddr>().ok());

        if let Some(ip) = forwarded {
            return ip;
        }

        let real_ip = headers
            .get(X_REAL_IP)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<IpAddr>().ok());

        if let Some(ip) = real_ip {
            return ip;
        }
    }

    peer.ip()
}
