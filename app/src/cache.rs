use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
    time::{Duration, Instant},
};

struct Entry<T> {
    value: T,
    expires_at: Instant,
}

impl<T> Entry<T> {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Shared string-keyed map whose entries disappear after their TTL.
///
/// Expired entries are treated as absent on every read and are pruned
/// lazily whenever the map is written to.
pub struct ExpiringCache<T> {
    data: Arc<Mutex<HashMap<String, Entry<T>>>>,
}

impl<T> Clone for ExpiringCache<T> {
    fn clone(&self) -> Self {
        ExpiringCache {
            data: Arc::clone(&self.data),
        }
    }
}

impl<T> ExpiringCache<T> {
    pub fn new() -> Self {
        Self {
            data: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn get_connection(&self) -> MutexGuard<'_, HashMap<String, Entry<T>>> {
        // a panic while holding the lock cannot leave a half-written entry
        self.data.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn set_data(&self, id: &str, data: T, ttl: Duration) {
        let now = Instant::now();
        let mut conn = self.get_connection();
        conn.retain(|_, entry| entry.is_live(now));
        conn.insert(
            id.to_owned(),
            Entry {
                value: data,
                expires_at: now + ttl,
            },
        );
    }

    pub fn contains_key(&self, id: &str) -> bool {
        let conn = self.get_connection();
        conn.get(id).is_some_and(|e| e.is_live(Instant::now()))
    }

    pub fn delete_data(&self, id: &str) -> Option<T> {
        let mut conn = self.get_connection();
        conn.remove(id)
            .filter(|entry| entry.is_live(Instant::now()))
            .map(|entry| entry.value)
    }

    /// Removes the entry only when it is live and `predicate` accepts it,
    /// all under a single lock.
    pub fn take_if<F>(&self, id: &str, predicate: F) -> Option<T>
    where
        F: FnOnce(&T) -> bool,
    {
        let mut conn = self.get_connection();
        let now = Instant::now();
        let (live, accepted) = match conn.get(id) {
            Some(entry) => {
                let live = entry.is_live(now);
                (live, live && predicate(&entry.value))
            }
            None => return None,
        };

        if accepted {
            return conn.remove(id).map(|entry| entry.value);
        }
        if !live {
            conn.remove(id);
        }
        None
    }

    pub fn count(&self) -> usize {
        let now = Instant::now();
        self.get_connection()
            .values()
            .filter(|e| e.is_live(now))
            .count()
    }
}

impl<T: Clone> ExpiringCache<T> {
    pub fn get_data(&self, id: &str) -> Option<T> {
        let conn = self.get_connection();
        conn.get(id)
            .filter(|entry| entry.is_live(Instant::now()))
            .map(|entry| entry.value.clone())
    }
}

impl<T> Default for ExpiringCache<T> {
    fn default() -> Self {
        Self::new()
    }
}
