use std::collections::HashMap;
use std::hash::Hash;

/// Memoizing key/value store owned by a single query adapter
#[derive(Debug, Clone)]
pub struct Cache<K, V> {
    entries: HashMap<K, V>,
}

impl<K: Eq + Hash, V: Clone> Cache<K, V> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Cached value for `key`, computing and storing it on a miss.
    ///
    /// Failures are returned and not remembered, so the next call retries.
    pub fn get_or_try_compute<F, E>(&mut self, key: K, compute: F) -> Result<V, E>
    where
        F: FnOnce(&K) -> Result<V, E>,
    {
        if let Some(value) = self.entries.get(&key) {
            return Ok(value.clone());
        }
        let value = compute(&key)?;
        self.entries.insert(key, value.clone());
        Ok(value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Eq + Hash, V: Clone> Default for Cache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_runs_once_per_key() {
        let mut cache: Cache<String, usize> = Cache::new();
        let mut calls = 0;

        let first: Result<usize, ()> = cache.get_or_try_compute("a".to_string(), |key| {
            calls += 1;
            Ok(key.len())
        });
        let second: Result<usize, ()> = cache.get_or_try_compute("a".to_string(), |_| {
            calls += 1;
            Ok(99)
        });

        assert_eq!(first, Ok(1));
        assert_eq!(second, Ok(1));
        assert_eq!(calls, 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_failed_compute_is_not_memoized() {
        let mut cache: Cache<&str, u32> = Cache::new();

        let failed: Result<u32, &str> = cache.get_or_try_compute("k", |_| Err("boom"));
        assert!(failed.is_err());
        assert!(cache.is_empty());

        let ok: Result<u32, &str> = cache.get_or_try_compute("k", |_| Ok(7));
        assert_eq!(ok, Ok(7));
        let again: Result<u32, &str> = cache.get_or_try_compute("k", |_| Err("not called"));
        assert_eq!(again, Ok(7));
    }
}
