use std::convert::Infallible;
use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{request::Parts, HeaderMap},
};

const UNKNOWN: &str = "unknown";

/// Best-effort address of the uploading client.
///
/// Proxy headers win over the socket peer, so behind an untrusted proxy the
/// value is caller-controlled and only fit for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientAddress(pub String);

impl<S> FromRequestParts<S> for ClientAddress
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);

        Ok(Self(resolve_client_address(&parts.headers, peer)))
    }
}

fn usable(value: &str) -> Option<&str> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case(UNKNOWN) {
        None
    } else {
        Some(value)
    }
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// `X-Forwarded-For` (first hop), then `X-Real-IP`, then the peer address
pub fn resolve_client_address(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    if let Some(first) = header(headers, "x-forwarded-for")
        .and_then(|v| v.split(',').next())
        .and_then(usable)
    {
        return first.to_string();
    }

    if let Some(real_ip) = header(headers, "x-real-ip").and_then(usable) {
        return real_ip.to_string();
    }

    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN.to_string())
}
