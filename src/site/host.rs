//! Host-based tenant routing.
//!
//! Maps the `Host` header of a document request to a tenant identifier. Only
//! requests that pass [`is_document_path`] should be routed this way; static
//! assets and API calls keep their original path.

/// Subdomains that never name a tenant.
pub const RESERVED_IDENTIFIERS: &[&str] = &["www", "app", "api"];

/// Outcome of host resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostRoute {
    /// Serve the request as-is.
    PassThrough,
    /// Treat the request as targeting `/<identifier><path>`.
    RewriteTo(String),
}

/// Path prefixes and exact paths that are never tenant documents.
const EXCLUDED_PREFIXES: &[&str] = &["/_next/static", "/_next/image", "/api/"];
const EXCLUDED_PATHS: &[&str] = &[
    "/favicon.ico",
    "/robots.txt",
    "/sitemap.xml",
    "/api",
    "/health",
];

#[must_use]
pub fn is_reserved(identifier: &str) -> bool {
    RESERVED_IDENTIFIERS.contains(&identifier)
}

/// Resolves a `Host` header against the configured root domain.
#[must_use]
pub fn resolve_host(host: &str, root_domain: &str) -> HostRoute {
    let lowered = strip_port(host.trim()).to_ascii_lowercase();
    // A fully qualified name may end in one dot.
    let host = lowered.strip_suffix('.').unwrap_or(&lowered);
    let root_domain = root_domain.trim().trim_matches('.').to_ascii_lowercase();

    if is_local(host) || root_domain.is_empty() {
        return HostRoute::PassThrough;
    }

    let Some(prefix) = host.strip_suffix(&root_domain) else {
        return HostRoute::PassThrough;
    };

    let candidate = if prefix.is_empty() {
        ""
    } else if let Some(sub) = prefix.strip_suffix('.') {
        sub
    } else {
        // "evilwebownr.com" shares the suffix but is a different domain.
        return HostRoute::PassThrough;
    };

    if candidate.is_empty() || is_reserved(candidate) {
        return HostRoute::PassThrough;
    }

    HostRoute::RewriteTo(candidate.to_string())
}

/// Returns true for document-navigation paths that host routing applies to.
#[must_use]
pub fn is_document_path(path: &str) -> bool {
    if EXCLUDED_PATHS.contains(&path) || EXCLUDED_PREFIXES.iter().any(|p| path.starts_with(p)) {
        return false;
    }

    let last_segment = path.rsplit('/').next().unwrap_or("");
    !last_segment.contains('.')
}

/// Applies a host route to the request path.
#[must_use]
pub fn rewrite_path(route: &HostRoute, path: &str) -> String {
    match route {
        HostRoute::PassThrough => path.to_string(),
        HostRoute::RewriteTo(identifier) => {
            let rest = path.trim_start_matches('/');
            if rest.is_empty() {
                format!("/{identifier}")
            } else {
                format!("/{identifier}/{rest}")
            }
        }
    }
}

fn strip_port(host: &str) -> &str {
    if let Some(rest) = host.strip_prefix('[') {
        // IPv6 literal, e.g. "[::1]:3000"
        return rest.split(']').next().unwrap_or(rest);
    }
    match host.rsplit_once(':') {
        Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) && !name.contains(':') => {
            name
        }
        _ => host,
    }
}

fn is_local(host: &str) -> bool {
    host.starts_with("localhost")
        || host
            .parse::<std::net::IpAddr>()
            .is_ok_and(|ip| ip.is_loopback())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT: &str = "webownr.com";

    #[test]
    fn test_subdomain_rewrites() {
        assert_eq!(
            resolve_host("acme.webownr.com", ROOT),
            HostRoute::RewriteTo("acme".to_string())
        );
        assert_eq!(
            resolve_host("Acme.WebOwnr.com:443", ROOT),
            HostRoute::RewriteTo("acme".to_string())
        );
        assert_eq!(
            resolve_host("acme.webownr.com.", ROOT),
            HostRoute::RewriteTo("acme".to_string())
        );
        assert_eq!(
            resolve_host("acme.webownr.com.:8443", ROOT),
            HostRoute::RewriteTo("acme".to_string())
        );
    }

    #[test]
    fn test_numeric_subdomain_is_not_loopback() {
        assert_eq!(
            resolve_host("127.webownr.com", ROOT),
            HostRoute::RewriteTo("127".to_string())
        );
        assert_eq!(
            resolve_host("127.0.0.1.webownr.com", ROOT),
            HostRoute::RewriteTo("127.0.0.1".to_string())
        );
        assert_eq!(resolve_host("127.0.0.1", ROOT), HostRoute::PassThrough);
    }

    #[test]
    fn test_foreign_hosts_pass_through() {
        for host in [
            "example.org",
            "acme.example.org",
            "evilwebownr.com",
            "webownr.com.evil.net",
            "",
        ] {
            assert_eq!(resolve_host(host, ROOT), HostRoute::PassThrough, "{host}");
        }
    }

    #[test]
    fn test_reserved_and_empty_pass_through() {
        for host in [
            "webownr.com",
            "webownr.com.",
            "www.webownr.com",
            "app.webownr.com",
            "api.webownr.com",
            ".webownr.com",
        ] {
            assert_eq!(resolve_host(host, ROOT), HostRoute::PassThrough, "{host}");
        }
    }

    #[test]
    fn test_local_development_passes_through() {
        for host in [
            "localhost",
            "localhost:3000",
            "127.0.0.1:8080",
            "127.1.2.3",
            "[::1]:8080",
            "::1",
        ] {
            assert_eq!(resolve_host(host, ROOT), HostRoute::PassThrough, "{host}");
        }
        assert_eq!(
            resolve_host("localhost:3000", "localhost:3000"),
            HostRoute::PassThrough
        );
    }

    #[test]
    fn test_document_path_matcher() {
        assert!(is_document_path("/"));
        assert!(is_document_path("/about"));
        assert!(is_document_path("/acme/services"));

        assert!(!is_document_path("/_next/static/chunks/app.js"));
        assert!(!is_document_path("/_next/image"));
        assert!(!is_document_path("/favicon.ico"));
        assert!(!is_document_path("/robots.txt"));
        assert!(!is_document_path("/sitemap.xml"));
        assert!(!is_document_path("/api"));
        assert!(!is_document_path("/api/v1/admin/sites"));
        assert!(!is_document_path("/logo.png"));
        assert!(!is_document_path("/health"));
    }

    #[test]
    fn test_rewrite_path() {
        let route = HostRoute::RewriteTo("acme".to_string());
        assert_eq!(rewrite_path(&route, "/"), "/acme");
        assert_eq!(rewrite_path(&route, "/about"), "/acme/about");
        assert_eq!(rewrite_path(&HostRoute::PassThrough, "/about"), "/about");
    }
}
