use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use log::{debug, warn};

use nourishplate_shared::models::{NutritionFact, NutritionFactsCache};

/// Slot name the facts cache lives under.
const FACTS_CACHE_KEY: &str = "nutrition_facts";

/// Cached facts stay valid for one hour.
const CACHE_TTL_MINUTES: i64 = 60;

/// String-slot storage behind the cache. The instance-local in-memory
/// implementation is the only one in the service; the trait keeps the
/// corruption and expiry behavior testable against raw slots.
pub trait CacheStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
    fn remove(&self, key: &str);
}

#[derive(Default)]
pub struct MemoryCacheStorage {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryCacheStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheStorage for MemoryCacheStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.slots.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.slots.lock().unwrap().insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.slots.lock().unwrap().remove(key);
    }
}

/// Time-boxed cache in front of facts generation. A stale or unparseable
/// slot counts as a miss and is purged.
pub struct FactsCache {
    storage: Arc<dyn CacheStorage>,
}

impl FactsCache {
    pub fn new(storage: Arc<dyn CacheStorage>) -> Self {
        Self { storage }
    }

    pub fn get(&self) -> Option<Vec<NutritionFact>> {
        self.get_at(Utc::now())
    }

    pub fn set(&self, facts: &[NutritionFact]) {
        self.set_at(facts, Utc::now());
    }

    fn get_at(&self, now: DateTime<Utc>) -> Option<Vec<NutritionFact>> {
        let raw = self.storage.get(FACTS_CACHE_KEY)?;

        let entry: NutritionFactsCache = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Clearing corrupted facts cache slot: {}", e);
                self.storage.remove(FACTS_CACHE_KEY);
                return None;
            }
        };

        let age = now.signed_duration_since(entry.timestamp);
        if age >= Duration::minutes(CACHE_TTL_MINUTES) {
            debug!("Facts cache expired ({} min old), purging", age.num_minutes());
            self.storage.remove(FACTS_CACHE_KEY);
            return None;
        }

        Some(entry.facts)
    }

    fn set_at(&self, facts: &[NutritionFact], now: DateTime<Utc>) {
        let entry = NutritionFactsCache {
            facts: facts.to_vec(),
            timestamp: now,
        };
        match serde_json::to_string(&entry) {
            Ok(raw) => self.storage.set(FACTS_CACHE_KEY, raw),
            Err(e) => warn!("Failed to serialize facts cache entry: {}", e),
        }
    }
}
