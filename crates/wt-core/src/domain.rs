//! URL decomposition into host and domain components.
//!
//! Every visit event carries a [`PageLocation`] derived once at load time.
//! The registrable domain is the public-suffix-aware root
//! (`www.mail.google.com` → `google.com`); the full host keeps every
//! subdomain label.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Schemes that represent real page navigations. Anything else
/// (`chrome://`, `about:`, `file://`, ...) is browser chrome, not browsing.
const NAVIGATION_SCHEMES: &[&str] = &["http", "https", "ftp"];

/// Why a URL could not be decomposed.
///
/// Callers treat any variant as "drop the event", never as a fatal error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecomposeError {
    /// The string failed to parse as a URL at all.
    #[error("unparseable URL: {reason}")]
    Parse { reason: String },

    /// The URL parsed but its scheme is not a page navigation.
    #[error("non-navigation scheme: {scheme}")]
    NonNavigation { scheme: String },

    /// The URL parsed but carries no usable host.
    #[error("URL has no host")]
    MissingHost,
}

/// The host-derived parts of a visited URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLocation {
    /// Public-suffix-aware root domain, e.g. `google.com`.
    pub registrable_domain: String,
    /// Complete subdomain-qualified hostname, e.g. `mail.google.com`.
    pub full_host: String,
    /// Path plus query string, e.g. `/mail/u/0?hl=en`.
    pub path: String,
}

/// Decomposes a URL into its [`PageLocation`].
///
/// Pure function of its input; no side effects.
pub fn decompose(url: &str) -> Result<PageLocation, DecomposeError> {
    let parsed = Url::parse(url).map_err(|e| DecomposeError::Parse {
        reason: e.to_string(),
    })?;

    let scheme = parsed.scheme();
    if !NAVIGATION_SCHEMES.contains(&scheme) {
        return Err(DecomposeError::NonNavigation {
            scheme: scheme.to_string(),
        });
    }

    let (full_host, registrable_domain) = match parsed.host() {
        Some(url::Host::Domain(name)) => {
            let host = name.to_ascii_lowercase();
            let registrable = registrable_domain(&host);
            (host, registrable)
        }
        // IP literals have no registrable domain; the address stands in for both.
        Some(ip) => {
            let host = ip.to_string();
            (host.clone(), host)
        }
        None => return Err(DecomposeError::MissingHost),
    };

    if full_host.is_empty() {
        return Err(DecomposeError::MissingHost);
    }

    let path = parsed.query().map_or_else(
        || parsed.path().to_string(),
        |query| format!("{}?{query}", parsed.path()),
    );

    Ok(PageLocation {
        registrable_domain,
        full_host,
        path,
    })
}

/// Returns the eTLD+1 for a hostname.
///
/// Hosts the public suffix list has no opinion on (internal hostnames,
/// made-up TLDs) fall back to the last two labels.
fn registrable_domain(host: &str) -> String {
    if let Some(domain) = psl::domain_str(host) {
        return domain.to_string();
    }

    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() <= 2 {
        host.to_string()
    } else {
        labels[labels.len() - 2..].join(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_subdomains_to_registrable_domain() {
        let page = decompose("https://mail.google.com/x").unwrap();
        assert_eq!(page.registrable_domain, "google.com");
        assert_eq!(page.full_host, "mail.google.com");
        assert_eq!(page.path, "/x");
    }

    #[test]
    fn deep_subdomains_collapse_to_same_root() {
        let page = decompose("https://www.mail.google.com/inbox").unwrap();
        assert_eq!(page.registrable_domain, "google.com");
        assert_eq!(page.full_host, "www.mail.google.com");
    }

    #[test]
    fn bare_domain_is_its_own_registrable_domain() {
        let page = decompose("https://github.com/rust-lang/rust").unwrap();
        assert_eq!(page.registrable_domain, "github.com");
        assert_eq!(page.full_host, "github.com");
        assert_eq!(page.path, "/rust-lang/rust");
    }

    #[test]
    fn query_string_is_kept_in_path() {
        let page = decompose("https://duckduckgo.com/search?q=rust&ia=web").unwrap();
        assert_eq!(page.path, "/search?q=rust&ia=web");
    }

    #[test]
    fn multi_label_public_suffix_is_respected() {
        let page = decompose("https://www.bbc.co.uk/news").unwrap();
        assert_eq!(page.registrable_domain, "bbc.co.uk");
        assert_eq!(page.full_host, "www.bbc.co.uk");
    }

    #[test]
    fn host_is_lowercased() {
        let page = decompose("https://Mail.Google.COM/x").unwrap();
        assert_eq!(page.full_host, "mail.google.com");
        assert_eq!(page.registrable_domain, "google.com");
    }

    #[test]
    fn browser_chrome_is_rejected() {
        assert_eq!(
            decompose("chrome://newtab/"),
            Err(DecomposeError::NonNavigation {
                scheme: "chrome".to_string()
            })
        );
        assert!(matches!(
            decompose("about:blank"),
            Err(DecomposeError::NonNavigation { .. })
        ));
    }

    #[test]
    fn empty_and_malformed_urls_are_rejected() {
        assert!(matches!(decompose(""), Err(DecomposeError::Parse { .. })));
        assert!(matches!(
            decompose("not a url"),
            Err(DecomposeError::Parse { .. })
        ));
    }

    #[test]
    fn hostless_urls_are_rejected() {
        assert!(matches!(
            decompose("mailto:someone@example.com"),
            Err(DecomposeError::NonNavigation { .. })
        ));
    }

    #[test]
    fn ip_hosts_keep_the_address() {
        let page = decompose("http://192.168.0.1/admin").unwrap();
        assert_eq!(page.full_host, "192.168.0.1");
        assert_eq!(page.registrable_domain, "192.168.0.1");
    }

    #[test]
    fn unknown_suffix_falls_back_to_last_two_labels() {
        let page = decompose("http://build.ci.internal/job/1").unwrap();
        assert_eq!(page.full_host, "build.ci.internal");
        assert_eq!(page.registrable_domain, "ci.internal");
    }

    #[test]
    fn single_label_host_is_kept_whole() {
        let page = decompose("http://localhost:8080/docs").unwrap();
        assert_eq!(page.full_host, "localhost");
        assert_eq!(page.registrable_domain, "localhost");
    }
}
