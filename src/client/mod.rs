//! Request emission.
//!
//! # Data Flow
//! ```text
//! SimulatedUser resolves a path
//!     → RequestSink::get(path)
//!         - HttpSink: base URL + path → reqwest GET → drain body
//!         - test sinks: record the path
//!     → RequestOutcome (status code or failure kind, elapsed time)
//! ```
//!
//! # Design Decisions
//! - A request never returns `Err`: every outcome is data to be tallied
//! - No retries; one GET per step
//! - One shared `reqwest::Client` so users reuse pooled connections

use std::future::Future;
use std::time::{Duration, Instant};
use thiserror::Error;
use url::Url;

const USER_AGENT: &str = concat!("route-swarm/", env!("CARGO_PKG_VERSION"));

/// Why a request produced no status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Timeout,
    Connect,
    InvalidUrl,
    Other,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Timeout => "timeout",
            FailureKind::Connect => "connect",
            FailureKind::InvalidUrl => "invalid_url",
            FailureKind::Other => "other",
        }
    }
}

/// Result of one GET.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    Status { code: u16, elapsed: Duration },
    Failed { kind: FailureKind, elapsed: Duration },
}

impl RequestOutcome {
    pub fn elapsed(&self) -> Duration {
        match self {
            RequestOutcome::Status { elapsed, .. } | RequestOutcome::Failed { elapsed, .. } => *elapsed,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            RequestOutcome::Status { code, .. } => Some(*code),
            RequestOutcome::Failed { .. } => None,
        }
    }

    /// True for a 4xx/5xx response. Transport failures are not error statuses.
    pub fn is_error_status(&self) -> bool {
        matches!(self, RequestOutcome::Status { code, .. } if *code >= 400)
    }
}

/// Something that can issue a GET for a path and report what happened.
pub trait RequestSink: Send + Sync + 'static {
    fn get(&self, path: &'static str) -> impl Future<Output = RequestOutcome> + Send;
}

/// Errors building the HTTP sink.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid target host '{host}': {source}")]
    InvalidHost {
        host: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// `reqwest`-backed sink targeting one base URL.
#[derive(Debug, Clone)]
pub struct HttpSink {
    client: reqwest::Client,
    base: Url,
}

impl HttpSink {
    pub fn new(host: &str, connect_timeout: Duration, request_timeout: Duration) -> Result<Self, ClientError> {
        let base = Url::parse(host).map_err(|source| ClientError::InvalidHost {
            host: host.to_string(),
            source,
        })?;

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()?;

        Ok(Self { client, base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }
}

impl RequestSink for HttpSink {
    async fn get(&self, path: &'static str) -> RequestOutcome {
        let start = Instant::now();

        let url = match self.base.join(path) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "Cannot build request URL");
                return RequestOutcome::Failed {
                    kind: FailureKind::InvalidUrl,
                    elapsed: start.elapsed(),
                };
            }
        };

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                return RequestOutcome::Failed {
                    kind: classify(&e),
                    elapsed: start.elapsed(),
                };
            }
        };

        let code = response.status().as_u16();
        // Drain the body so the connection goes back to the pool.
        match response.bytes().await {
            Ok(_) => RequestOutcome::Status {
                code,
                elapsed: start.elapsed(),
            },
            Err(e) => RequestOutcome::Failed {
                kind: classify(&e),
                elapsed: start.elapsed(),
            },
        }
    }
}

fn classify(e: &reqwest::Error) -> FailureKind {
    if e.is_timeout() {
        FailureKind::Timeout
    } else if e.is_connect() {
        FailureKind::Connect
    } else {
        FailureKind::Other
    }
}
