use std::{
    fmt,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use rand::Rng;

/// Picks which of the configured API keys authenticates the next request.
pub trait KeySelector: Send + Sync + fmt::Debug {
    /// Returns an index in `0..len`. `len` is never zero.
    fn select(&self, len: usize) -> usize;
}

/// Cycles through the keys in order. The cursor is atomic, so two concurrent
/// requests never observe the same position.
#[derive(Debug, Default)]
pub struct RoundRobin {
    cursor: AtomicUsize,
}

impl KeySelector for RoundRobin {
    fn select(&self, len: usize) -> usize {
        self.cursor.fetch_add(1, Ordering::Relaxed) % len
    }
}

/// Picks a key uniformly at random for every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomKey;

impl KeySelector for RandomKey {
    fn select(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// How requests are spread over multiple API keys. Only matters with more than one key.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum KeyStrategy {
    #[default]
    RoundRobin,
    Random,
}

impl KeyStrategy {
    pub(crate) fn selector(self) -> Arc<dyn KeySelector> {
        match self {
            KeyStrategy::RoundRobin => Arc::new(RoundRobin::default()),
            KeyStrategy::Random => Arc::new(RandomKey),
        }
    }
}

/// The set of bearer tokens a client authenticates with.
#[derive(Clone)]
pub(crate) struct ApiKeys {
    keys: Arc<[String]>,
    selector: Arc<dyn KeySelector>,
}

impl ApiKeys {
    /// Returns `None` if no non-blank key was supplied.
    pub(crate) fn new(keys: Vec<String>, selector: Arc<dyn KeySelector>) -> Option<Self> {
        let keys: Vec<String> = keys
            .into_iter()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();
        if keys.is_empty() {
            return None;
        }

        Some(Self {
            keys: keys.into(),
            selector,
        })
    }

    /// Resolves the bearer token for the next request.
    pub(crate) fn resolve(&self) -> &str {
        let index = self.selector.select(self.keys.len()) % self.keys.len();
        &self.keys[index]
    }
}

// never print the keys themselves
impl fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeys")
            .field("count", &self.keys.len())
            .field("selector", &self.selector)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(strategy: KeyStrategy, raw: &[&str]) -> ApiKeys {
        ApiKeys::new(raw.iter().map(|k| k.to_string()).collect(), strategy.selector())
            .expect("at least one key")
    }

    #[test]
    fn round_robin_alternates_strictly() {
        let keys = keys(KeyStrategy::RoundRobin, &["sk-a", "sk-b"]);
        let picked: Vec<&str> = (0..6).map(|_| keys.resolve()).collect();
        assert_eq!(picked, ["sk-a", "sk-b", "sk-a", "sk-b", "sk-a", "sk-b"]);
    }

    #[test]
    fn round_robin_is_shared_across_threads() {
        let keys = keys(KeyStrategy::RoundRobin, &["sk-a", "sk-b"]);
        let picked: Vec<&str> = std::thread::scope(|scope| {
            let workers: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| (0..1000).map(|_| keys.resolve()).collect::<Vec<_>>()))
                .collect();
            workers
                .into_iter()
                .flat_map(|worker| worker.join().unwrap())
                .collect()
        });

        assert_eq!(picked.len(), 8000);
        assert_eq!(picked.iter().filter(|k| **k == "sk-a").count(), 4000);
        assert_eq!(picked.iter().filter(|k| **k == "sk-b").count(), 4000);
    }

    #[test]
    fn random_stays_in_range() {
        let keys = keys(KeyStrategy::Random, &["sk-a", "sk-b", "sk-c"]);
        for _ in 0..100 {
            assert!(["sk-a", "sk-b", "sk-c"].contains(&keys.resolve()));
        }
    }

    #[test]
    fn blank_keys_are_dropped() {
        let keys = keys(KeyStrategy::RoundRobin, &["  ", "sk-only", ""]);
        assert_eq!(keys.resolve(), "sk-only");
        assert_eq!(keys.resolve(), "sk-only");
    }

    #[test]
    fn no_usable_key_is_rejected() {
        let selector = KeyStrategy::RoundRobin.selector();
        assert!(ApiKeys::new(vec!["".into(), " ".into()], selector).is_none());
    }

    #[test]
    fn debug_output_hides_keys() {
        let keys = keys(KeyStrategy::RoundRobin, &["sk-secret"]);
        assert!(!format!("{keys:?}").contains("sk-secret"));
    }
}
