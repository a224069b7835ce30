use crate::errors::{UnknownTierError, find_closest_tier};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kernel tiers ranked by throughput.
///
/// The derived ordering follows the declaration order, so `Ord::max` picks
/// the faster of two tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Tier {
    /// Byte-at-a-time loop, always available
    Scalar,
    /// 16-byte lanes (SSE2 on x86_64, NEON on aarch64)
    Narrow,
    /// 32-byte lanes, one chunk per iteration (AVX)
    Wide,
    /// 64 bytes per iteration as two independent 32-byte lanes (AVX2)
    WideExtended,
}

impl Tier {
    /// All tiers, slowest first.
    pub const ALL: [Tier; 4] = [Tier::Scalar, Tier::Narrow, Tier::Wide, Tier::WideExtended];

    /// Instruction set label reported for this tier on the current target.
    pub fn label(self) -> &'static str {
        match self {
            Tier::Scalar => "DEFAULT",
            #[cfg(target_arch = "aarch64")]
            Tier::Narrow => "NEON",
            #[cfg(not(target_arch = "aarch64"))]
            Tier::Narrow => "SSE2",
            Tier::Wide => "AVX",
            Tier::WideExtended => "AVX2",
        }
    }

    /// Bytes consumed per vector iteration (1 for the scalar loop).
    pub fn block_size(self) -> usize {
        match self {
            Tier::Scalar => 1,
            Tier::Narrow => 16,
            Tier::Wide => 32,
            Tier::WideExtended => 64,
        }
    }

    /// Canonical lowercase name used in config files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Scalar => "default",
            #[cfg(target_arch = "aarch64")]
            Tier::Narrow => "neon",
            #[cfg(not(target_arch = "aarch64"))]
            Tier::Narrow => "sse2",
            Tier::Wide => "avx",
            Tier::WideExtended => "avx2",
        }
    }

    /// Every spelling accepted by `from_str`, used for typo suggestions.
    fn known_names() -> Vec<String> {
        [
            "default", "scalar", "sse2", "neon", "narrow", "avx", "wide", "avx2", "wide-extended",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }
}

impl FromStr for Tier {
    type Err = UnknownTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "default" | "scalar" => Ok(Tier::Scalar),
            "sse2" | "neon" | "narrow" => Ok(Tier::Narrow),
            "avx" | "avx1" | "wide" => Ok(Tier::Wide),
            "avx2" | "wide-extended" | "wideextended" => Ok(Tier::WideExtended),
            _ => {
                let suggestion = find_closest_tier(&normalized, &Tier::known_names());
                Err(UnknownTierError::new(s, suggestion))
            }
        }
    }
}

impl TryFrom<String> for Tier {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse().map_err(|e: UnknownTierError| e.summary())
    }
}

impl From<Tier> for String {
    fn from(tier: Tier) -> Self {
        tier.as_str().to_string()
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
