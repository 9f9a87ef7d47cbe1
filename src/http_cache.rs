use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use tracing::debug;

/// Identifies one upstream response: which call, for which entity, and for
/// which season when the call is season-scoped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub op: &'static str,
    pub entity: String,
    pub season: Option<i32>,
}

impl CacheKey {
    pub fn new(op: &'static str, entity: impl ToString, season: Option<i32>) -> Self {
        Self {
            op,
            entity: entity.to_string(),
            season,
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    body: String,
    fetched_at: Instant,
}

/// In-memory response bodies with a fixed time-to-live.
#[derive(Debug)]
pub struct ResponseCache {
    ttl: Duration,
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<String> {
        self.get_at(key, Instant::now())
    }

    fn get_at(&self, key: &CacheKey, now: Instant) -> Option<String> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let fresh = entries
            .get(key)
            .is_some_and(|entry| now.saturating_duration_since(entry.fetched_at) < self.ttl);
        if fresh {
            return entries.get(key).map(|entry| entry.body.clone());
        }
        entries.remove(key);
        None
    }

    pub fn insert(&self, key: CacheKey, body: String) {
        self.insert_at(key, body, Instant::now());
    }

    fn insert_at(&self, key: CacheKey, body: String, fetched_at: Instant) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let ttl = self.ttl;
        entries.retain(|_, e| fetched_at.saturating_duration_since(e.fetched_at) < ttl);
        entries.insert(key, CacheEntry { body, fetched_at });
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// GET `url`, serving a fresh cached body for `key` when one exists.
/// Only successful responses are cached.
pub fn fetch_json_cached(
    client: &Client,
    url: &str,
    key: CacheKey,
    cache: &ResponseCache,
) -> Result<String> {
    if let Some(body) = cache.get(&key) {
        debug!(op = key.op, entity = %key.entity, "cache hit");
        return Ok(body);
    }

    let resp = client.get(url).send().context("request failed")?;
    let status = resp.status();
    let body = resp.text().context("failed reading body")?;
    if !status.is_success() {
        return Err(anyhow::anyhow!("http {}: {}", status, body));
    }

    cache.insert(key, body.clone());
    Ok(body)
}
