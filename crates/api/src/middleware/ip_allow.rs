//! Client IP allow-list.
//!
//! Entries are single addresses (`192.168.1.10`, `::1`) or IPv4 CIDR
//! blocks (`10.0.0.0/8`). When the check is enabled every request under the
//! protected routes must come from a listed address, otherwise 403.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use medidoc_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// One allow-list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IpRule {
    Exact(IpAddr),
    V4Block { network: u32, prefix: u8 },
}

impl IpRule {
    pub fn matches(&self, ip: IpAddr) -> bool {
        match (self, ip) {
            (IpRule::Exact(allowed), ip) => *allowed == normalize(ip),
            (IpRule::V4Block { network, prefix }, ip) => match normalize(ip) {
                IpAddr::V4(v4) => u32::from(v4) & mask(*prefix) == *network,
                IpAddr::V6(_) => false,
            },
        }
    }
}

impl FromStr for IpRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((addr, prefix)) = s.split_once('/') else {
            return s
                .parse::<IpAddr>()
                .map(|ip| IpRule::Exact(normalize(ip)))
                .map_err(|e| e.to_string());
        };

        let addr: Ipv4Addr = addr.parse().map_err(|e: std::net::AddrParseError| e.to_string())?;
        let prefix: u8 = prefix
            .parse()
            .ok()
            .filter(|p| *p <= 32)
            .ok_or_else(|| format!("invalid prefix length '{prefix}'"))?;
        Ok(IpRule::V4Block {
            network: u32::from(addr) & mask(prefix),
            prefix,
        })
    }
}

impl fmt::Display for IpRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpRule::Exact(ip) => write!(f, "{ip}"),
            IpRule::V4Block { network, prefix } => write!(f, "{}/{prefix}", Ipv4Addr::from(*network)),
        }
    }
}

fn mask(prefix: u8) -> u32 {
    match prefix {
        0 => 0,
        p => u32::MAX << (32 - u32::from(p)),
    }
}

/// IPv4-mapped IPv6 addresses compare as IPv4.
fn normalize(ip: IpAddr) -> IpAddr {
    match ip {
        IpAddr::V6(v6) => v6.to_ipv4_mapped().map_or(ip, IpAddr::V4),
        v4 => v4,
    }
}

/// Resolve the client address of a request.
fn client_ip(request: &Request, trust_forwarded_for: bool) -> Option<IpAddr> {
    if trust_forwarded_for {
        let forwarded = request
            .headers()
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .and_then(|v| v.trim().parse().ok());
        if forwarded.is_some() {
            return forwarded;
        }
    }
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
}

/// Reject requests from clients outside the allow-list.
pub async fn require_allowed_ip(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let access = &state.config.access;
    if !access.enabled {
        return Ok(next.run(request).await);
    }

    match client_ip(&request, access.trust_forwarded_for) {
        Some(ip) if access.is_authorized(ip) => Ok(next.run(request).await),
        ip => {
            tracing::warn!(client_ip = ?ip, path = %request.uri().path(), "Request from non-allowed address");
            Err(AppError::Core(CoreError::Forbidden(
                "このIPアドレスからのアクセスは許可されていません".into(),
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    #[test]
    fn exact_rule_matches_only_that_address() {
        let rule: IpRule = "192.168.1.10".parse().unwrap();
        assert!(rule.matches(ip("192.168.1.10")));
        assert!(!rule.matches(ip("192.168.1.11")));
    }

    #[test]
    fn cidr_blocks_match_their_prefix() {
        let rule: IpRule = "10.20.0.0/16".parse().unwrap();
        assert!(rule.matches(ip("10.20.3.4")));
        assert!(!rule.matches(ip("10.21.0.1")));

        let rule: IpRule = "172.16.5.77/24".parse().unwrap();
        assert_eq!(rule.to_string(), "172.16.5.0/24");
        assert!(rule.matches(ip("172.16.5.1")));
    }

    #[test]
    fn mapped_ipv6_is_treated_as_ipv4() {
        let rule: IpRule = "127.0.0.1".parse().unwrap();
        assert!(rule.matches(ip("::ffff:127.0.0.1")));
    }

    #[test]
    fn invalid_entries_are_rejected() {
        assert!("10.0.0.0/33".parse::<IpRule>().is_err());
        assert!("not-an-ip".parse::<IpRule>().is_err());
        assert!("::1/64".parse::<IpRule>().is_err());
    }
}
