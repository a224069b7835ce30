//! Benchmarking utilities for comparing kernel tiers.
//!
//! This module exposes every tier the host can run, side by side with the
//! standard library's `to_ascii_uppercase` as a baseline:
//!
//! ```
//! use simd_upcase::bench::{Contender, PlatformInfo, measure, random_ascii};
//!
//! let platform = PlatformInfo::detect();
//! let input = random_ascii(4096, &mut rand::rng());
//!
//! for contender in platform.contenders() {
//!     let m = measure(contender, &input, 10, 1).unwrap();
//!     println!("{}: {:.1} MiB/s", contender, m.throughput_mib_s());
//! }
//! ```

use crate::core::tier::Tier;
use crate::features::CapabilityFlags;
use rand::Rng;
use serde::Serialize;
use std::fmt;
use std::hint::black_box;
use std::time::{Duration, Instant};

/// Characters used for generated benchmark input: letters, digits, space
/// and common punctuation.
const BENCH_CHARSET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789 !@#$%^&*()-_=+[]{}|;:\"'<>,.?/";

/// Something that can be timed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Contender {
    /// `<[u8]>::to_ascii_uppercase` from the standard library
    Baseline,
    /// One of this crate's kernels, forced
    Kernel(Tier),
}

impl fmt::Display for Contender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Contender::Baseline => write!(f, "std"),
            Contender::Kernel(tier) => write!(f, "{}", tier.label()),
        }
    }
}

/// Platform capabilities for SIMD.
#[derive(Debug, Clone, Serialize)]
pub struct PlatformInfo {
    pub arch: &'static str,
    pub instruction_set: &'static str,
    pub capabilities: CapabilityFlags,
}

impl PlatformInfo {
    /// Detect current platform capabilities.
    pub fn detect() -> Self {
        Self::with_capabilities(CapabilityFlags::detect())
    }

    /// Platform limited to `capabilities`, e.g. a configured tier cap.
    pub fn with_capabilities(capabilities: CapabilityFlags) -> Self {
        PlatformInfo {
            arch: std::env::consts::ARCH,
            instruction_set: capabilities.instruction_set(),
            capabilities,
        }
    }

    /// Tiers this platform can run, slowest first.
    pub fn available_tiers(&self) -> Vec<Tier> {
        available_tiers(&self.capabilities)
    }

    /// The baseline followed by every available tier.
    pub fn contenders(&self) -> Vec<Contender> {
        std::iter::once(Contender::Baseline)
            .chain(self.available_tiers().into_iter().map(Contender::Kernel))
            .collect()
    }

    /// Format as display string.
    pub fn display(&self) -> String {
        let labels: Vec<&str> = self
            .available_tiers()
            .into_iter()
            .filter(|tier| *tier != Tier::Scalar)
            .map(Tier::label)
            .collect();

        if labels.is_empty() {
            self.arch.to_string()
        } else {
            format!("{} ({})", self.arch, labels.join(", "))
        }
    }
}

/// Tiers `capabilities` allows, slowest first. Always starts with
/// [`Tier::Scalar`].
pub fn available_tiers(capabilities: &CapabilityFlags) -> Vec<Tier> {
    capabilities.supported_tiers()
}

/// Random printable ASCII of length `len`.
pub fn random_ascii<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<u8> {
    (0..len)
        .map(|_| BENCH_CHARSET[rng.random_range(0..BENCH_CHARSET.len())])
        .collect()
}

/// Runs `contender` once.
///
/// Returns `None` for a kernel the host cannot execute.
pub fn run(contender: Contender, input: &[u8]) -> Option<Vec<u8>> {
    match contender {
        Contender::Baseline => Some(input.to_ascii_uppercase()),
        Contender::Kernel(tier) => crate::simd::upcase_with_tier(input, tier),
    }
}

/// Checks every available tier against the baseline.
///
/// Returns the first tier whose output differs.
pub fn verify_tiers(input: &[u8], platform: &PlatformInfo) -> Result<(), Tier> {
    let expected = input.to_ascii_uppercase();
    for tier in platform.available_tiers() {
        if run(Contender::Kernel(tier), input).as_deref() != Some(expected.as_slice()) {
            return Err(tier);
        }
    }
    Ok(())
}

/// Timing for one contender on one input.
#[derive(Debug, Clone, Copy)]
pub struct Measurement {
    pub contender: Contender,
    pub bytes: usize,
    pub iterations: u32,
    pub elapsed: Duration,
}

impl Measurement {
    /// Mean time per call.
    pub fn per_iteration(&self) -> Duration {
        self.elapsed / self.iterations.max(1)
    }

    /// Processed bytes per second, in MiB.
    pub fn throughput_mib_s(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            return f64::INFINITY;
        }
        (self.bytes as f64 * self.iterations as f64) / secs / (1024.0 * 1024.0)
    }

    /// How many times faster this measurement is than `baseline`.
    pub fn speedup_over(&self, baseline: &Measurement) -> f64 {
        let ours = self.per_iteration().as_secs_f64();
        if ours == 0.0 {
            return f64::INFINITY;
        }
        baseline.per_iteration().as_secs_f64() / ours
    }
}

/// Times `iterations` calls of `contender` after `warmup` untimed calls.
///
/// Returns `None` for a kernel the host cannot execute.
pub fn measure(
    contender: Contender,
    input: &[u8],
    iterations: u32,
    warmup: u32,
) -> Option<Measurement> {
    for _ in 0..warmup {
        black_box(run(contender, black_box(input))?);
    }

    let iterations = iterations.max(1);
    let start = Instant::now();
    for _ in 0..iterations {
        black_box(run(contender, black_box(input))?);
    }
    let elapsed = start.elapsed();

    Some(Measurement {
        contender,
        bytes: input.len(),
        iterations,
        elapsed,
    })
}
