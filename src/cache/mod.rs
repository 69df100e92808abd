//! Memoization of synthesis runs.
//!
//! An explicit map keyed by the exact parameter tuple, with time-based
//! eviction. Owned by the calling layer: construct one per session, no
//! global state. Given the synthesizer's determinism a hit is
//! indistinguishable from a recomputation, so staleness only bounds how
//! long entries occupy memory.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::error::Result;
use crate::logging::structured::LogContext;
use crate::synthesis::generator::{generate, SynthesisOutput};

/// Default entry TTL - 2 hours.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 2 * 60 * 60;

/// Cache key: the exact parameter tuple. Float parameters are keyed by bit
/// pattern, so `0.1` and `0.1000...1` are distinct entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SynthesisKey {
    num_agents: u32,
    duration_hours: u32,
    base_alert_rate_bits: u64,
    anomaly_multiplier_bits: u64,
    seed: u64,
}

impl SynthesisKey {
    pub fn new(
        num_agents: u32,
        duration_hours: u32,
        base_alert_rate: f64,
        anomaly_multiplier: f64,
        seed: u64,
    ) -> Self {
        Self {
            num_agents,
            duration_hours,
            base_alert_rate_bits: base_alert_rate.to_bits(),
            anomaly_multiplier_bits: anomaly_multiplier.to_bits(),
            seed,
        }
    }
}

struct CacheEntry {
    output: SynthesisOutput,
    inserted_at: Instant,
}

/// TTL-bounded memoization of synthesizer calls.
pub struct SynthesisCache {
    entries: HashMap<SynthesisKey, CacheEntry>,
    ttl: Duration,
}

impl Default for SynthesisCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_CACHE_TTL_SECS))
    }
}

impl SynthesisCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a live entry; expired entries count as misses.
    pub fn get(&self, key: &SynthesisKey) -> Option<&SynthesisOutput> {
        self.entries
            .get(key)
            .filter(|e| e.inserted_at.elapsed() <= self.ttl)
            .map(|e| &e.output)
    }

    pub fn insert(&mut self, key: SynthesisKey, output: SynthesisOutput) {
        self.entries.insert(
            key,
            CacheEntry {
                output,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Drop every expired entry.
    pub fn evict_expired(&mut self) {
        let ttl = self.ttl;
        self.entries.retain(|_, e| e.inserted_at.elapsed() <= ttl);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Memoized synthesis: return the cached tables for this exact parameter
    /// tuple, or run the synthesizer and cache the result.
    pub fn get_or_generate(
        &mut self,
        ctx: &LogContext,
        num_agents: u32,
        duration_hours: u32,
        base_alert_rate: f64,
        anomaly_multiplier: f64,
        seed: u64,
    ) -> Result<SynthesisOutput> {
        let key = SynthesisKey::new(
            num_agents,
            duration_hours,
            base_alert_rate,
            anomaly_multiplier,
            seed,
        );

        if let Some(output) = self.get(&key) {
            log::debug!("{} SYNTHESIS_CACHE_HIT agents={} hours={}", ctx, num_agents, duration_hours);
            return Ok(output.clone());
        }

        let output = generate(
            ctx,
            num_agents,
            duration_hours,
            base_alert_rate,
            anomaly_multiplier,
            seed,
        )?;
        self.insert(key, output.clone());
        log::debug!("{} SYNTHESIS_CACHE_STORE entries={}", ctx, self.len());
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> LogContext {
        LogContext::new("test-run")
    }

    #[test]
    fn test_cache_hit_returns_identical_output() {
        let mut cache = SynthesisCache::default();
        let a = cache.get_or_generate(&ctx(), 4, 1, 5.0, 2.0, 42).unwrap();
        let b = cache.get_or_generate(&ctx(), 4, 1, 5.0, 2.0, 42).unwrap();
        assert_eq!(a, b);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_distinct_parameters_distinct_entries() {
        let mut cache = SynthesisCache::default();
        cache.get_or_generate(&ctx(), 4, 1, 5.0, 2.0, 42).unwrap();
        cache.get_or_generate(&ctx(), 4, 1, 5.0, 2.0, 43).unwrap();
        cache.get_or_generate(&ctx(), 4, 1, 5.5, 2.0, 42).unwrap();
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_expired_entry_is_a_miss() {
        let mut cache = SynthesisCache::new(Duration::from_secs(0));
        let out = cache.get_or_generate(&ctx(), 2, 1, 5.0, 2.0, 42).unwrap();
        let key = SynthesisKey::new(2, 1, 5.0, 2.0, 42);
        std::thread::sleep(Duration::from_millis(5));
        assert!(cache.get(&key).is_none());

        cache.evict_expired();
        assert!(cache.is_empty());

        // A miss regenerates the same tables.
        let again = cache.get_or_generate(&ctx(), 2, 1, 5.0, 2.0, 42).unwrap();
        assert_eq!(out, again);
    }

    #[test]
    fn test_generation_errors_are_not_cached() {
        let mut cache = SynthesisCache::default();
        assert!(cache.get_or_generate(&ctx(), 2, 1, -5.0, 2.0, 42).is_err());
        assert!(cache.is_empty());
    }
}
