//! Caller identity for quota bookkeeping.
//!
//! The service usually sits behind a proxy or load balancer, so the socket
//! peer is the proxy. Forwarding headers are checked first, in the order
//! common proxies set them.

use std::net::SocketAddr;

use async_trait::async_trait;
use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{request::Parts, HeaderMap},
};

use crate::errors::AppError;

const FORWARDING_HEADERS: &[&str] = &[
    "x-forwarded-for",
    "proxy-client-ip",
    "wl-proxy-client-ip",
    "http_x_forwarded_for",
    "http_x_forwarded",
    "http_x_cluster_client_ip",
    "http_client_ip",
    "http_forwarded_for",
    "http_forwarded",
    "http_via",
    "remote_addr",
];

const UNKNOWN: &str = "unknown";

/// Opaque caller key, normally the client IP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientKey(pub String);

impl ClientKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ClientKey
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);
        Ok(ClientKey(resolve_client_key(&parts.headers, peer)))
    }
}

/// First usable forwarding header, else the peer IP. A comma-separated chain
/// resolves to its first hop, which is the originating client.
pub fn resolve_client_key(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    let raw = FORWARDING_HEADERS
        .iter()
        .filter_map(|name| headers.get(*name))
        .filter_map(|value| value.to_str().ok())
        .map(str::trim)
        .find(|value| !value.is_empty() && !value.eq_ignore_ascii_case(UNKNOWN))
        .map(str::to_string)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| UNKNOWN.to_string());

    match raw.split_once(',') {
        Some((first, _)) => first.trim().to_string(),
        None => raw,
    }
}
