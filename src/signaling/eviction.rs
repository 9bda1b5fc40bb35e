use super::registry::LobbyRegistry;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Deletes lobbies nobody has touched for `max_idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdlePolicy {
    pub max_idle: Duration,
    pub sweep_interval: Duration,
}

impl IdlePolicy {
    pub fn new(max_idle: Duration, sweep_interval: Duration) -> Self {
        Self {
            max_idle,
            // tokio intervals panic on a zero period
            sweep_interval: sweep_interval.max(Duration::from_millis(1)),
        }
    }

    pub fn sweep(&self, registry: &LobbyRegistry, now: Instant) -> Vec<String> {
        let evicted = registry.evict_idle(now, self.max_idle);
        if !evicted.is_empty() {
            info!(count = evicted.len(), lobbies = ?evicted, "Evicted idle lobbies");
        }
        evicted
    }

    /// Run `sweep` every `sweep_interval` until the task is aborted
    pub fn spawn(self, registry: Arc<LobbyRegistry>) -> JoinHandle<()> {
        info!(
            max_idle_secs = self.max_idle.as_secs(),
            interval_secs = self.sweep_interval.as_secs(),
            "Idle lobby eviction enabled"
        );
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.sweep_interval);
            // First tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                debug!("Sweeping idle lobbies");
                self.sweep(&registry, Instant::now());
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_keeps_active_lobbies() {
        let registry = LobbyRegistry::new();
        let lobby_id = registry.create_lobby().unwrap();
        let policy = IdlePolicy::new(Duration::from_secs(300), Duration::from_secs(60));

        assert!(policy.sweep(&registry, Instant::now()).is_empty());
        assert!(registry.contains(&lobby_id));
    }

    #[test]
    fn sweep_evicts_after_max_idle() {
        let registry = LobbyRegistry::new();
        let lobby_id = registry.create_lobby().unwrap();
        let policy = IdlePolicy::new(Duration::from_secs(300), Duration::from_secs(60));

        let later = Instant::now() + Duration::from_secs(301);
        let evicted = policy.sweep(&registry, later);

        assert_eq!(evicted, vec![lobby_id.clone()]);
        assert!(!registry.contains(&lobby_id));
    }

    #[test]
    fn zero_interval_is_clamped() {
        let policy = IdlePolicy::new(Duration::from_secs(1), Duration::ZERO);
        assert!(policy.sweep_interval > Duration::ZERO);
    }

    #[tokio::test]
    async fn spawned_sweep_runs_periodically() {
        let registry = Arc::new(LobbyRegistry::new());
        registry.create_lobby().unwrap();
        let policy = IdlePolicy::new(Duration::ZERO, Duration::from_millis(10));

        let handle = policy.spawn(registry.clone());
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.abort();

        assert!(registry.lobby_ids().is_empty());
    }
}
