use crate::signaling::IdlePolicy;
use std::env;
use std::time::Duration;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

pub struct Config {
    pub port: u16,
    /// Unset disables idle eviction
    pub lobby_idle_timeout: Option<Duration>,
    pub sweep_interval: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let secs = |key: &str| {
            lookup(key)
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_secs)
        };

        Self {
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            lobby_idle_timeout: secs("LOBBY_IDLE_TIMEOUT_SECS"),
            sweep_interval: secs("LOBBY_SWEEP_INTERVAL_SECS")
                .filter(|d| !d.is_zero())
                .unwrap_or(DEFAULT_SWEEP_INTERVAL),
        }
    }

    pub fn addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    pub fn idle_policy(&self) -> Option<IdlePolicy> {
        self.lobby_idle_timeout
            .map(|max_idle| IdlePolicy::new(max_idle, self.sweep_interval))
    }
}
