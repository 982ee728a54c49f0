use parking_lot::Mutex;
use std::{collections::HashMap, time::Duration};
use tokio::time::Instant;

use crate::model::WeatherReading;

pub const DEFAULT_TTL: Duration = Duration::from_secs(10 * 60);

#[derive(Debug, Clone)]
struct CacheEntry {
    reading: WeatherReading,
    stored_at: Instant,
}

/// In-memory store of formatted readings keyed by normalized location.
/// Stale entries are dropped when they are next read.
#[derive(Debug)]
pub struct WeatherCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl WeatherCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn normalize_key(location: &str) -> String {
        location.trim().to_lowercase()
    }

    pub fn get(&self, location: &str) -> Option<WeatherReading> {
        let key = Self::normalize_key(location);
        let mut entries = self.entries.lock();

        let entry = entries.get(&key)?;
        if entry.stored_at.elapsed() > self.ttl {
            entries.remove(&key);
            return None;
        }

        Some(entry.reading.clone())
    }

    pub fn put(&self, location: &str, reading: WeatherReading) {
        let entry = CacheEntry {
            reading,
            stored_at: Instant::now(),
        };
        self.entries.lock().insert(Self::normalize_key(location), entry);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for WeatherCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
