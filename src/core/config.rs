use crate::core::tier::Tier;
use crate::dispatch::Upcaser;
use crate::errors::ConfigError;
use crate::features::CapabilityFlags;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_BENCH_SIZES: [usize; 3] = [2_000, 200_000, 2_000_000];
const DEFAULT_BENCH_ITERATIONS: u32 = 50;
const DEFAULT_BENCH_WARMUP: u32 = 5;
const DEFAULT_LOG_LEVEL: &str = "warn";

/// Dispatcher settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DispatchSettings {
    /// Highest tier the dispatcher may select (unset = best available)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tier: Option<Tier>,
}

/// Settings for the `bench` command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchSettings {
    /// Input sizes in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<usize>>,
    /// Timed runs per tier and size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iterations: Option<u32>,
    /// Untimed runs before measuring
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warmup: Option<u32>,
}

impl BenchSettings {
    pub fn sizes(&self) -> Vec<usize> {
        self.sizes
            .clone()
            .unwrap_or_else(|| DEFAULT_BENCH_SIZES.to_vec())
    }

    pub fn iterations(&self) -> u32 {
        self.iterations.unwrap_or(DEFAULT_BENCH_ITERATIONS).max(1)
    }

    pub fn warmup(&self) -> u32 {
        self.warmup.unwrap_or(DEFAULT_BENCH_WARMUP)
    }
}

/// Logging settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogSettings {
    /// `tracing` filter directive, e.g. "warn" or "simd_upcase=debug"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

impl LogSettings {
    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }
}

/// Settings loaded from TOML.
///
/// Every field is optional so that a later layer only overrides the keys it
/// actually sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub dispatch: DispatchSettings,
    pub bench: BenchSettings,
    pub log: LogSettings,
}

impl Settings {
    /// Parses settings from TOML content.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Loads the built-in settings bundled with the library.
    pub fn load_default() -> Result<Self, ConfigError> {
        let content = include_str!("../../simd-upcase.toml");
        Self::from_toml(content).map_err(|source| ConfigError::Parse {
            path: "<built-in>".to_string(),
            source,
        })
    }

    /// Loads settings from a file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })
    }

    /// `<config dir>/simd-upcase/config.toml`, if the platform has a config dir.
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("simd-upcase").join("config.toml"))
    }

    /// Loads settings with overrides from standard locations.
    ///
    /// Layers in priority order (later wins):
    /// 1. Built-in settings
    /// 2. `~/.config/simd-upcase/config.toml` (user overrides)
    /// 3. `./simd-upcase.toml` (project-local overrides)
    /// 4. `explicit`, tilde-expanded, which must exist
    ///
    /// Broken files in layers 2 and 3 are reported and skipped; a broken
    /// explicit file is an error.
    pub fn load_with_overrides(explicit: Option<&str>) -> Result<Self, ConfigError> {
        let mut settings = Self::load_default()?;

        if let Some(user_config_path) = Self::user_config_path() {
            settings.merge_optional(&user_config_path, "user");
        }
        settings.merge_optional(Path::new("simd-upcase.toml"), "local");

        if let Some(path) = explicit {
            let expanded = shellexpand::tilde(path);
            let explicit_path = Path::new(expanded.as_ref());
            if !explicit_path.exists() {
                return Err(ConfigError::NotFound {
                    path: path.to_string(),
                });
            }
            settings.merge(Self::load_from_file(explicit_path)?);
        }

        Ok(settings)
    }

    /// Merges the file at `path` if it exists and parses.
    ///
    /// A broken file is reported on stderr and skipped. Returns whether the
    /// layer was applied.
    fn merge_optional(&mut self, path: &Path, layer: &str) -> bool {
        if !path.exists() {
            return false;
        }

        match Self::load_from_file(path) {
            Ok(settings) => {
                self.merge(settings);
                true
            }
            Err(e) => {
                eprintln!("Warning: skipping {} config: {}", layer, e.reason());
                false
            }
        }
    }

    /// Merges another layer into this one; keys set in `other` win.
    pub fn merge(&mut self, other: Settings) {
        if other.dispatch.max_tier.is_some() {
            self.dispatch.max_tier = other.dispatch.max_tier;
        }
        if other.bench.sizes.is_some() {
            self.bench.sizes = other.bench.sizes;
        }
        if other.bench.iterations.is_some() {
            self.bench.iterations = other.bench.iterations;
        }
        if other.bench.warmup.is_some() {
            self.bench.warmup = other.bench.warmup;
        }
        if other.log.level.is_some() {
            self.log.level = other.log.level;
        }
    }

    /// Capabilities of this host, capped at `dispatch.max_tier`.
    pub fn capabilities(&self) -> CapabilityFlags {
        let detected = CapabilityFlags::detect();
        match self.dispatch.max_tier {
            Some(max) => detected.capped(max),
            None => detected,
        }
    }

    /// Dispatcher honoring these settings.
    pub fn upcaser(&self) -> Upcaser {
        Upcaser::with_capabilities(self.capabilities())
    }
}
