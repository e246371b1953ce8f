//! Endpoint resolution for gateway and deployment targets.
//!
//! The platform exposes two request bases: the shared LLM gateway, which
//! expects the bare host (callers append the gateway route themselves), and
//! per-model deployments under `/api/v2/deployments/{id}/`. Callers hand us a
//! base URL in whatever shape their environment provides (with or without a
//! trailing slash, with or without an `/api/v2` suffix) and resolution
//! normalizes it. All functions here are pure string transformations and
//! idempotent: resolving an already-resolved URL returns it unchanged.

use url::Url;

use crate::error::{Error, Result};

/// Trailing API segment recognized during normalization.
const API_SEGMENT: &str = "api/v2";

/// Chat completions route on the shared LLM gateway.
pub const GATEWAY_CHAT_PATH: &str = "api/v2/genai/llmgw/chat/completions";

/// Route prefix for submitting agent jobs from a custom model.
const AGENT_JOB_PATH: &str = "api/v2/genai/agents/fromCustomModel";

/// Base URL plus optional deployment selector.
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    /// Caller-supplied base URL.
    pub base_url: String,
    /// Deployment to target; `None` selects the shared gateway.
    pub deployment_id: Option<String>,
}

impl EndpointConfig {
    /// Create a new endpoint configuration.
    pub fn new(base_url: impl Into<String>, deployment_id: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            deployment_id,
        }
    }

    /// Resolve the request base URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the base URL is not an absolute
    /// http(s) URL.
    pub fn resolve(&self) -> Result<String> {
        match self.deployment_id.as_deref() {
            Some(deployment_id) => deployment_base(&self.base_url, deployment_id),
            None => gateway_base(&self.base_url),
        }
    }
}

/// Check that a base URL is an absolute http(s) URL with a host.
pub fn validate_base_url(base_url: &str) -> Result<()> {
    let parsed = Url::parse(base_url)
        .map_err(|e| Error::configuration(format!("Invalid base URL '{base_url}': {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(Error::configuration(format!(
            "Base URL must be an absolute http(s) URL: '{base_url}'"
        )));
    }
    Ok(())
}

/// Resolve the base URL for the shared LLM gateway.
///
/// Strips a trailing `/api/v2` or `/api/v2/` segment, leaving a single
/// trailing slash; any other URL is returned unchanged. The segment match is
/// case-sensitive and anchored at the end of the path, so routes that merely
/// pass through `/api/v2/` (such as a gateway chat path) are preserved.
pub fn gateway_base(base_url: &str) -> Result<String> {
    validate_base_url(base_url)?;

    let trimmed = base_url.strip_suffix('/').unwrap_or(base_url);
    if let Some(root) = trimmed.strip_suffix(API_SEGMENT) {
        // Segment boundary check: "/xapi/v2" is not an API suffix
        if root.ends_with('/') {
            return Ok(root.to_string());
        }
    }

    Ok(base_url.to_string())
}

/// Resolve the base URL for a specific deployment.
///
/// URLs that already carry a `/api/v2/deployments` or `/api/v2/genai` path
/// are treated as fully specified by the caller and returned unchanged.
/// Otherwise the path is extended to end in
/// `/api/v2/deployments/{deployment_id}/`.
pub fn deployment_base(base_url: &str, deployment_id: &str) -> Result<String> {
    validate_base_url(base_url)?;

    if base_url.contains("/api/v2/deployments") || base_url.contains("/api/v2/genai") {
        return Ok(base_url.to_string());
    }

    let mut resolved = base_url.trim_end_matches('/').to_string();
    if !resolved.ends_with("/api/v2") {
        resolved.push_str("/api/v2");
    }
    resolved.push_str("/deployments/");
    resolved.push_str(deployment_id);
    resolved.push('/');
    Ok(resolved)
}

/// URL for a chat completion request.
///
/// With a deployment this is the deployment's own `chat/completions` route;
/// without one it is the shared gateway route. A base URL that already ends
/// in `chat/completions` is used as-is.
pub fn chat_url(base_url: &str, deployment_id: Option<&str>) -> Result<String> {
    let base = EndpointConfig::new(base_url, deployment_id.map(String::from)).resolve()?;
    let trimmed = base.trim_end_matches('/');
    if trimmed.ends_with("chat/completions") {
        return Ok(base);
    }
    match deployment_id {
        Some(_) => Ok(format!("{trimmed}/chat/completions")),
        None => Ok(format!("{trimmed}/{GATEWAY_CHAT_PATH}")),
    }
}

/// URL for submitting an agent job against a custom model.
pub fn agent_job_url(base_url: &str, custom_model_id: &str) -> Result<String> {
    let root = gateway_base(base_url)?;
    Ok(format!(
        "{}/{AGENT_JOB_PATH}/{custom_model_id}/chat/",
        root.trim_end_matches('/')
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_base_acceptance_table() {
        let cases = [
            ("https://example.com", "https://example.com"),
            ("https://example.com/", "https://example.com/"),
            ("https://example.com/api/v2", "https://example.com/"),
            ("https://example.com/api/v2/", "https://example.com/"),
            ("https://example.com/other-path", "https://example.com/other-path"),
            (
                "https://custom.example.com:8080/path/to/api/v2/",
                "https://custom.example.com:8080/path/to/",
            ),
            (
                "https://example.com/api/v2/deployment/",
                "https://example.com/api/v2/deployment/",
            ),
            (
                "https://example.com/api/v2/deployment",
                "https://example.com/api/v2/deployment",
            ),
            (
                "https://example.com/api/v2/genai/llmgw/chat/completions",
                "https://example.com/api/v2/genai/llmgw/chat/completions",
            ),
            (
                "https://example.com/api/v2/genai/llmgw/chat/completions/",
                "https://example.com/api/v2/genai/llmgw/chat/completions/",
            ),
        ];

        for (input, expected) in cases {
            assert_eq!(gateway_base(input).unwrap(), expected, "input: {input}");
        }
    }

    #[test]
    fn test_gateway_base_segment_is_anchored() {
        // "xapi/v2" is not the API segment
        assert_eq!(
            gateway_base("https://example.com/xapi/v2").unwrap(),
            "https://example.com/xapi/v2"
        );
    }

    #[test]
    fn test_gateway_base_idempotent() {
        for input in [
            "https://example.com",
            "https://example.com/api/v2",
            "https://custom.example.com:8080/path/to/api/v2/",
        ] {
            let once = gateway_base(input).unwrap();
            let twice = gateway_base(&once).unwrap();
            assert_eq!(once, twice, "input: {input}");
        }
    }

    #[test]
    fn test_deployment_base_acceptance_table() {
        let cases = [
            (
                "https://example.com",
                "https://example.com/api/v2/deployments/test-id/",
            ),
            (
                "https://example.com/",
                "https://example.com/api/v2/deployments/test-id/",
            ),
            (
                "https://example.com/api/v2",
                "https://example.com/api/v2/deployments/test-id/",
            ),
            (
                "https://example.com/api/v2/",
                "https://example.com/api/v2/deployments/test-id/",
            ),
            (
                "https://example.com/other-path",
                "https://example.com/other-path/api/v2/deployments/test-id/",
            ),
            (
                "https://custom.example.com:8080/path/to/api/v2/",
                "https://custom.example.com:8080/path/to/api/v2/deployments/test-id/",
            ),
            (
                "https://example.com/api/v2/deployments/",
                "https://example.com/api/v2/deployments/",
            ),
            (
                "https://example.com/api/v2/deployments",
                "https://example.com/api/v2/deployments",
            ),
            (
                "https://example.com/api/v2/genai/llmgw/chat/completions",
                "https://example.com/api/v2/genai/llmgw/chat/completions",
            ),
            (
                "https://example.com/api/v2/genai/llmgw/chat/completions/",
                "https://example.com/api/v2/genai/llmgw/chat/completions/",
            ),
        ];

        for (input, expected) in cases {
            assert_eq!(
                deployment_base(input, "test-id").unwrap(),
                expected,
                "input: {input}"
            );
        }
    }

    #[test]
    fn test_deployment_base_identity_on_resolved() {
        let resolved = deployment_base("https://example.com", "abc").unwrap();
        assert_eq!(resolved, "https://example.com/api/v2/deployments/abc/");
        assert_eq!(deployment_base(&resolved, "abc").unwrap(), resolved);
    }

    #[test]
    fn test_malformed_base_url() {
        for input in ["example.com", "not a url", "ftp://example.com", ""] {
            assert!(gateway_base(input).is_err(), "input: {input}");
            assert!(deployment_base(input, "abc").is_err(), "input: {input}");
        }
    }

    #[test]
    fn test_endpoint_config_resolve() {
        let gateway = EndpointConfig::new("https://example.com/api/v2", None);
        assert_eq!(gateway.resolve().unwrap(), "https://example.com/");

        let deployment =
            EndpointConfig::new("https://example.com/api/v2/", Some("abc".to_string()));
        assert_eq!(
            deployment.resolve().unwrap(),
            "https://example.com/api/v2/deployments/abc/"
        );
    }

    #[test]
    fn test_chat_url_gateway() {
        assert_eq!(
            chat_url("https://example.com", None).unwrap(),
            "https://example.com/api/v2/genai/llmgw/chat/completions"
        );
        // An already-complete gateway chat URL passes through
        assert_eq!(
            chat_url("https://example.com/api/v2/genai/llmgw/chat/completions", None).unwrap(),
            "https://example.com/api/v2/genai/llmgw/chat/completions"
        );
    }

    #[test]
    fn test_chat_url_deployment() {
        assert_eq!(
            chat_url("https://example.com", Some("abc")).unwrap(),
            "https://example.com/api/v2/deployments/abc/chat/completions"
        );
    }

    #[test]
    fn test_agent_job_url() {
        assert_eq!(
            agent_job_url("https://example.com/api/v2", "model-1").unwrap(),
            "https://example.com/api/v2/genai/agents/fromCustomModel/model-1/chat/"
        );
        assert_eq!(
            agent_job_url("https://example.com", "model-1").unwrap(),
            "https://example.com/api/v2/genai/agents/fromCustomModel/model-1/chat/"
        );
    }
}
