//! HTTP client for the agent platform.

use crate::config::ClientConfig;
use crate::endpoint;
use crate::error::{Error, Result};
use agents_core::job::{JobHandle, JobOutcome, JobRequest, JobStatusBody};
use agents_core::request::ChatRequest;
use agents_core::response::ChatCompletion;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, LOCATION, USER_AGENT};
use reqwest::StatusCode;
use secrecy::Secret;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};
use url::Url;

/// Client for the agent platform's gateway, deployment, and agent job APIs.
///
/// # Example
///
/// ```rust,no_run
/// use agents_sdk::Client;
/// use agents_core::JobRequest;
///
/// #[tokio::main]
/// async fn main() -> Result<(), agents_sdk::Error> {
///     let client = Client::builder()
///         .base_url("https://app.example.com")
///         .api_token("your-api-token")
///         .build()?;
///
///     let outcome = client
///         .run_agent("custom-model-id", &JobRequest::from_prompt("Hello!"))
///         .await?;
///
///     println!("{}", outcome.into_text());
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct Client {
    /// HTTP client. Redirects are never followed automatically; the job
    /// protocol inspects `303 See Other` responses itself.
    http: reqwest::Client,
    /// Client configuration.
    config: Arc<ClientConfig>,
}

impl Client {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        // Fail fast on a base URL the resolver would reject per request
        endpoint::validate_base_url(&config.base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| Error::configuration(format!("Invalid user agent: {e}")))?,
        );

        if let Some(api_token) = config.api_token_value() {
            let mut value = HeaderValue::from_str(&format!("Bearer {api_token}"))
                .map_err(|e| Error::configuration(format!("Invalid API token: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .redirect(reqwest::redirect::Policy::none())
            .default_headers(headers)
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send a synchronous chat completion request.
    ///
    /// Targets the configured deployment's own chat route, or the shared
    /// gateway route when no deployment is configured.
    #[instrument(skip(self, request), fields(model = %request.model))]
    pub async fn chat_completion(&self, request: &ChatRequest) -> Result<ChatCompletion> {
        let url = endpoint::chat_url(&self.config.base_url, self.config.deployment_id.as_deref())?;

        debug!("Sending chat completion request to {url}");

        let response = self.http.post(&url).json(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::api(status.as_u16(), body));
        }

        response
            .json()
            .await
            .map_err(|e| Error::parse(format!("Failed to parse completion response: {e}")))
    }

    /// Run an agent custom model to completion: submit, poll, classify.
    #[instrument(skip(self, request), fields(custom_model_id = %custom_model_id))]
    pub async fn run_agent(
        &self,
        custom_model_id: &str,
        request: &JobRequest,
    ) -> Result<JobOutcome> {
        let handle = self.submit_agent_job(custom_model_id, request).await?;
        self.wait_for_job(&handle).await
    }

    /// Submit an agent job.
    ///
    /// A submission succeeds only when the response is ok AND carries a
    /// `Location` header pointing at the status endpoint; anything else is
    /// [`Error::SubmissionRejected`] with the response text attached.
    #[instrument(skip(self, request), fields(custom_model_id = %custom_model_id))]
    pub async fn submit_agent_job(
        &self,
        custom_model_id: &str,
        request: &JobRequest,
    ) -> Result<JobHandle> {
        let url = endpoint::agent_job_url(&self.config.base_url, custom_model_id)?;

        debug!("Submitting agent job to {url}");

        let response = self.http.post(&url).json(request).send().await?;
        let status = response.status();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::submission_rejected(status.as_u16(), body));
        }

        let Some(location) = location else {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::submission_rejected(
                status.as_u16(),
                format!("accepted without a Location header: {body}"),
            ));
        };

        let status_url = Url::parse(&location)
            .map_err(|e| Error::parse(format!("Invalid status location '{location}': {e}")))?;

        debug!("Job accepted, status at {status_url}");
        Ok(JobHandle::new(status_url))
    }

    /// Poll a job until it reaches a terminal state.
    ///
    /// Sleeps the configured poll interval between polls. A `303 See Other`
    /// resolves the job through its `Location` target; an ok response with an
    /// `ERROR`/`ABORTED` status body fails with [`Error::Remote`]; a non-ok
    /// response fails with [`Error::Transport`]. When a poll deadline is
    /// configured, exceeding it fails with [`Error::DeadlineExceeded`].
    #[instrument(skip(self, handle), fields(status_url = %handle.status_url))]
    pub async fn wait_for_job(&self, handle: &JobHandle) -> Result<JobOutcome> {
        let started = Instant::now();
        let mut attempts: u32 = 0;

        loop {
            attempts += 1;

            let response = self.http.get(handle.status_url.clone()).send().await?;
            let status = response.status();

            if status == StatusCode::SEE_OTHER {
                let location = response
                    .headers()
                    .get(LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .map(String::from)
                    .ok_or_else(|| {
                        Error::transport(status.as_u16(), "redirect without a Location header")
                    })?;

                debug!(attempts, "Job complete, fetching result from {location}");
                let payload = self.fetch_result(&location).await?;
                return Ok(JobOutcome::classify(payload));
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(Error::transport(status.as_u16(), body));
            }

            let body: JobStatusBody = response
                .json()
                .await
                .map_err(|e| Error::parse(format!("Failed to parse status body: {e}")))?;

            if body.status().is_terminal_failure() {
                let value = serde_json::to_value(&body)
                    .map_err(|e| Error::parse(format!("Failed to encode status body: {e}")))?;
                return Err(Error::remote(value));
            }

            debug!(attempts, status = %body.status(), "Job still in progress");

            if let Some(deadline) = self.config.poll_deadline {
                if started.elapsed() >= deadline {
                    return Err(Error::deadline_exceeded(started.elapsed()));
                }
            }

            tokio::time::sleep(self.config.poll_interval).await;
        }
    }

    /// Fetch the terminal payload from a redirect target.
    async fn fetch_result(&self, url: &str) -> Result<serde_json::Value> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::transport(status.as_u16(), body));
        }

        response
            .json()
            .await
            .map_err(|e| Error::parse(format!("Failed to parse result payload: {e}")))
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.config.base_url)
            .field("deployment_id", &self.config.deployment_id)
            .field("has_api_token", &self.config.has_api_token())
            .finish()
    }
}

/// Builder for creating a [`Client`].
#[derive(Debug, Default)]
pub struct ClientBuilder {
    base_url: Option<String>,
    api_token: Option<Secret<String>>,
    deployment_id: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    poll_interval: Option<Duration>,
    poll_deadline: Option<Duration>,
    user_agent: Option<String>,
}

impl ClientBuilder {
    /// Create a new client builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the API token.
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(Secret::new(token.into()));
        self
    }

    /// Target a specific deployment instead of the shared gateway.
    pub fn deployment_id(mut self, deployment_id: impl Into<String>) -> Self {
        self.deployment_id = Some(deployment_id.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the delay between status polls.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    /// Bound how long to poll a job before giving up.
    pub fn poll_deadline(mut self, deadline: Duration) -> Self {
        self.poll_deadline = Some(deadline);
        self
    }

    /// Set the user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is missing or malformed, or if the
    /// HTTP client cannot be created.
    pub fn build(self) -> Result<Client> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::configuration("base URL is required"))?;

        let mut config = ClientConfig::new(base_url);
        config.api_token = self.api_token;
        config.deployment_id = self.deployment_id;
        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }
        if let Some(connect_timeout) = self.connect_timeout {
            config.connect_timeout = connect_timeout;
        }
        if let Some(poll_interval) = self.poll_interval {
            config.poll_interval = poll_interval;
        }
        config.poll_deadline = self.poll_deadline;
        if let Some(user_agent) = self.user_agent {
            config.user_agent = user_agent;
        }

        Client::new(config)
    }
}
