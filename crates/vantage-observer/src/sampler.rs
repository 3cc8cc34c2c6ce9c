//! SPDX-FileCopyrightText: © 2025 The Vantage Authors
//! SPDX-License-Identifier: Apache-2.0
//!

//! Dual-read sampling gate
//!
//! Decides whether a request also issues a shadow read against the
//! non-primary backend. The only shared mutable state is one generator
//! behind a mutex; the draw happens inside the critical section, so the
//! gate is safe under arbitrary concurrent invocation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

use vantage_core::config::TelemetryConfig;

/// Concurrency-safe gate controlling shadow-read probability
#[derive(Debug)]
pub struct DualReadSampler {
    enabled: bool,
    rate: f64,
    rng: Mutex<StdRng>,
}

impl DualReadSampler {
    /// Create a sampler from the telemetry configuration
    ///
    /// Disabled unless the dual-read flag is set and the sample rate is
    /// positive.
    pub fn new(cfg: &TelemetryConfig) -> Self {
        if !cfg.dual_read || cfg.dual_sample_rate <= 0.0 {
            return Self::disabled();
        }
        Self::with_rng(cfg.dual_sample_rate, StdRng::from_entropy())
    }

    /// Create a disabled sampler
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            rate: 0.0,
            rng: Mutex::new(StdRng::seed_from_u64(0)),
        }
    }

    /// Create a sampler with an injected generator
    ///
    /// Tests substitute a seeded generator here to make sampling
    /// deterministic.
    pub fn with_rng(rate: f64, rng: StdRng) -> Self {
        Self {
            enabled: rate > 0.0,
            rate,
            rng: Mutex::new(rng),
        }
    }

    /// Whether dual reads are enabled at all
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Decide whether this call should issue a shadow read
    pub fn should_sample(&self) -> bool {
        if !self.enabled {
            return false;
        }
        if self.rate >= 1.0 {
            return true;
        }

        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            // A poisoned lock means another thread panicked mid-draw; skip
            // sampling rather than take the service down.
            Err(_) => return false,
        };
        rng.gen::<f64>() < self.rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_one_always_samples() {
        let sampler = DualReadSampler::with_rng(1.0, StdRng::seed_from_u64(7));
        assert!((0..1000).all(|_| sampler.should_sample()));
    }

    #[test]
    fn test_disabled_never_samples() {
        let sampler = DualReadSampler::disabled();
        assert!((0..1000).all(|_| !sampler.should_sample()));

        let zero_rate = DualReadSampler::new(&TelemetryConfig {
            dual_read: true,
            dual_sample_rate: 0.0,
            ..Default::default()
        });
        assert!(!zero_rate.is_enabled());
        assert!((0..1000).all(|_| !zero_rate.should_sample()));

        let flag_off = DualReadSampler::new(&TelemetryConfig {
            dual_read: false,
            dual_sample_rate: 0.5,
            ..Default::default()
        });
        assert!(!flag_off.is_enabled());
    }

    #[test]
    fn test_half_rate_samples_near_half() {
        let sampler = DualReadSampler::with_rng(0.5, StdRng::seed_from_u64(42));
        let trials = 10_000;
        let sampled = (0..trials).filter(|_| sampler.should_sample()).count();
        let frequency = sampled as f64 / trials as f64;
        // ~5 standard deviations of tolerance around 0.5.
        assert!(
            (frequency - 0.5).abs() < 0.025,
            "observed frequency {frequency}"
        );
    }

    #[test]
    fn test_sampler_is_safe_under_concurrency() {
        let sampler = std::sync::Arc::new(DualReadSampler::with_rng(
            0.5,
            StdRng::seed_from_u64(99),
        ));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let sampler = sampler.clone();
                std::thread::spawn(move || (0..1000).filter(|_| sampler.should_sample()).count())
            })
            .collect();
        let total: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert!(total > 3000 && total < 5000, "sampled {total} of 8000");
    }
}
