use anyhow::Context;
use std::net::SocketAddr;
use std::time::Duration;

const PORT_VAR: &str = "TIMETABLE__SERVER__PORT";
const BODY_LIMIT_VAR: &str = "TIMETABLE__SERVER__BODY_LIMIT";
const TIMEOUT_VAR: &str = "TIMETABLE__SERVER__REQUEST_TIMEOUT_SECS";
const RETAINED_VAR: &str = "TIMETABLE__JOBS__RETAINED";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub port: u16,
    /// Maximum request body in bytes.
    pub body_limit: usize,
    pub request_timeout: Duration,
    /// Finished jobs kept for polling.
    pub jobs_retained: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: 8080,
            body_limit: 2 * 1024 * 1024,
            request_timeout: Duration::from_secs(60),
            jobs_retained: jobs::DEFAULT_RETAINED,
        }
    }
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut s = Self::default();
        if let Some(v) = get(PORT_VAR) {
            s.port = v.trim().parse().with_context(|| format!("{PORT_VAR}={v}"))?;
        }
        if let Some(v) = get(BODY_LIMIT_VAR) {
            s.body_limit = v
                .trim()
                .parse()
                .with_context(|| format!("{BODY_LIMIT_VAR}={v}"))?;
        }
        if let Some(v) = get(TIMEOUT_VAR) {
            let secs: u64 = v.trim().parse().with_context(|| format!("{TIMEOUT_VAR}={v}"))?;
            s.request_timeout = Duration::from_secs(secs);
        }
        if let Some(v) = get(RETAINED_VAR) {
            s.jobs_retained = v
                .trim()
                .parse()
                .with_context(|| format!("{RETAINED_VAR}={v}"))?;
        }
        Ok(s)
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
