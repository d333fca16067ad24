use std::net::IpAddr;

use poem::Request;

use super::{request_id::RequestId, request_source::RequestSource};

/// Request context that flows from the API layer into coordinators
///
/// Carries what is needed to correlate log lines for one operation. There is no
/// authentication: `actor` is purely descriptive.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    /// IP address of the client making the request
    pub ip_address: Option<IpAddr>,

    /// Unique identifier for this request (for tracing across layers)
    pub request_id: RequestId,

    /// Source of the request (API, CLI, or System)
    pub source: RequestSource,

    /// Who initiated the operation
    pub actor: String,
}

impl RequestContext {
    /// Create a RequestContext for CLI operations
    pub fn for_cli(command_name: &str) -> Self {
        Self {
            ip_address: None,
            request_id: RequestId::new(),
            source: RequestSource::CLI,
            actor: format!("cli:{}", command_name),
        }
    }

    /// Create a RequestContext for system operations
    pub fn for_system(operation_name: &str) -> Self {
        Self {
            ip_address: None,
            request_id: RequestId::new(),
            source: RequestSource::System,
            actor: format!("system:{}", operation_name),
        }
    }

    /// Create a RequestContext for an HTTP request
    pub fn from_request(req: &Request) -> Self {
        let ip_address = Self::extract_ip_address(req);
        Self {
            ip_address,
            request_id: RequestId::new(),
            source: RequestSource::API,
            actor: ip_address
                .map(|ip| format!("api:{}", ip))
                .unwrap_or_else(|| "api:unknown".to_string()),
        }
    }

    /// Extract IP address from request headers
    ///
    /// Checks X-Forwarded-For, X-Real-IP, and falls back to remote address.
    fn extract_ip_address(req: &Request) -> Option<IpAddr> {
        // Check X-Forwarded-For header (proxy/load balancer)
        if let Some(forwarded) = req.header("X-Forwarded-For") {
            if let Some(ip) = forwarded.split(',').next() {
                return ip.trim().parse().ok();
            }
        }

        // Check X-Real-IP header (nginx)
        if let Some(real_ip) = req.header("X-Real-IP") {
            return real_ip.parse().ok();
        }

        req.remote_addr().as_socket_addr().map(|addr| addr.ip())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_cli_context() {
        let ctx = RequestContext::for_cli("export-report");
        assert_eq!(ctx.source, RequestSource::CLI);
        assert_eq!(ctx.actor, "cli:export-report");
        assert!(ctx.ip_address.is_none());
    }

    #[test]
    fn test_from_request_prefers_forwarded_for() {
        let req = Request::builder()
            .header("X-Forwarded-For", "203.0.113.9, 10.0.0.1")
            .finish();
        let ctx = RequestContext::from_request(&req);

        assert_eq!(ctx.source, RequestSource::API);
        assert_eq!(ctx.ip_address, Some("203.0.113.9".parse().unwrap()));
        assert_eq!(ctx.actor, "api:203.0.113.9");
    }

    #[test]
    fn test_each_context_gets_a_fresh_request_id() {
        let a = RequestContext::for_system("seed");
        let b = RequestContext::for_system("seed");
        assert_ne!(a.request_id, b.request_id);
    }
}
