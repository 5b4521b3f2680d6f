/// Synchronous client for the dashboard data source.
///
/// The source is a single JSON endpoint (`API_BASE_URL`) returning a
/// [`DashboardPayload`]. When it cannot be reached or returns something that
/// does not decode, [`Client::load`] substitutes the built-in dashboard and
/// marks the result as [`DataOrigin::Fallback`] so callers can show that the
/// data is offline.
///
/// ### Notes
/// - Transient failures (5xx, transport errors) are retried with a short backoff.
/// - Network timeouts are 30s total and 10s to connect.
///
/// Typical usage:
/// ```no_run
/// # use chartdash::Client;
/// let client = Client::from_env()?;
/// let outcome = client.load()?;
/// println!("{} charts", outcome.payload.charts.len());
/// # Ok::<(), anyhow::Error>(())
/// ```
use crate::dashboard::{DashboardPayload, DataOrigin, LoadOutcome};
use crate::fixture::fallback_payload;
use anyhow::{Context, Result, anyhow, bail};
use log::{debug, warn};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use std::time::Duration;

/// Environment variable naming the data source.
pub const BASE_URL_ENV: &str = "API_BASE_URL";

/// Pause before the built-in dashboard is shown after a failed fetch.
pub const DEFAULT_FALLBACK_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: Option<String>,
    http: HttpClient,
    fallback_delay: Duration,
}

impl Client {
    /// Client for `base_url`; `None` means every fetch fails and `load` always
    /// falls back.
    pub fn new(base_url: Option<String>) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10))
            .redirect(Policy::limited(5))
            .user_agent(concat!("chartdash/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("build http client")?;
        Ok(Self {
            base_url: base_url.filter(|u| !u.trim().is_empty()),
            http,
            fallback_delay: DEFAULT_FALLBACK_DELAY,
        })
    }

    /// Client for the URL in `API_BASE_URL`, if set.
    pub fn from_env() -> Result<Self> {
        Self::new(std::env::var(BASE_URL_ENV).ok())
    }

    pub fn with_fallback_delay(mut self, delay: Duration) -> Self {
        self.fallback_delay = delay;
        self
    }

    /// One GET of the dashboard payload.
    ///
    /// ### Errors
    /// - No base URL configured
    /// - Network/HTTP error (4xx fails at once, 5xx is retried)
    /// - JSON decoding error
    pub fn fetch(&self) -> Result<DashboardPayload> {
        let url = self
            .base_url
            .as_deref()
            .ok_or_else(|| anyhow!("no data source configured (set {})", BASE_URL_ENV))?;

        // Small retry for transient failures (5xx / network errors)
        let get_payload = |u: &str| -> Result<DashboardPayload> {
            let mut last_err: Option<anyhow::Error> = None;
            for backoff_ms in [100u64, 300, 700] {
                match self.http.get(u).send() {
                    Ok(r) if r.status().is_success() => {
                        return r.json().context("decode dashboard payload");
                    }
                    Ok(r) if r.status().is_server_error() => {
                        last_err = Some(anyhow!("HTTP {}", r.status()));
                    }
                    Ok(r) => bail!("request failed with HTTP {}", r.status()),
                    Err(e) => last_err = Some(e.into()),
                }
                debug!("GET {} failed, retrying in {}ms", u, backoff_ms);
                std::thread::sleep(Duration::from_millis(backoff_ms));
            }
            match last_err {
                Some(e) => Err(e.context("network error")),
                None => bail!("network error"),
            }
        };

        get_payload(url).with_context(|| format!("GET {}", url))
    }

    /// Fetch the payload, or fall back to the built-in dashboard.
    ///
    /// Only fails if the built-in dashboard itself cannot be built.
    pub fn load(&self) -> Result<LoadOutcome> {
        match self.fetch() {
            Ok(payload) => Ok(LoadOutcome {
                payload,
                origin: DataOrigin::Live,
            }),
            Err(e) => {
                let reason = format!("{:#}", e);
                warn!("dashboard fetch failed, showing built-in data: {}", reason);
                if !self.fallback_delay.is_zero() {
                    std::thread::sleep(self.fallback_delay);
                }
                fallback(reason)
            }
        }
    }
}

/// The built-in dashboard, tagged with why it is being shown.
pub fn fallback(reason: impl Into<String>) -> Result<LoadOutcome> {
    let payload = fallback_payload().context("build built-in dashboard")?;
    Ok(LoadOutcome {
        payload,
        origin: DataOrigin::Fallback {
            reason: reason.into(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::FALLBACK_TITLE;

    #[test]
    fn blank_base_url_is_unset() {
        let c = Client::new(Some("   ".into())).unwrap();
        assert!(c.base_url.is_none());
        let err = c.fetch().unwrap_err();
        assert!(err.to_string().contains(BASE_URL_ENV));
    }

    #[test]
    fn unreachable_source_falls_back() {
        // port 1 is reserved; the connection is refused immediately
        let c = Client::new(Some("http://127.0.0.1:1/".into()))
            .unwrap()
            .with_fallback_delay(Duration::ZERO);
        let out = c.load().unwrap();
        assert_eq!(out.payload.title(), FALLBACK_TITLE);
        match out.origin {
            DataOrigin::Fallback { reason } => assert!(reason.contains("127.0.0.1")),
            DataOrigin::Live => panic!("expected fallback"),
        }
    }

    #[test]
    fn fallback_reason_is_kept() {
        let out = fallback("offline mode").unwrap();
        assert_eq!(
            out.origin,
            DataOrigin::Fallback {
                reason: "offline mode".into()
            }
        );
        assert_eq!(out.payload.charts.len(), 7);
    }
}
