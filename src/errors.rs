use std::fmt;

/// Error when a tier name is not recognized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTierError {
    pub name: String,
    pub suggestion: Option<String>,
}

impl UnknownTierError {
    pub fn new(name: impl Into<String>, suggestion: Option<String>) -> Self {
        Self {
            name: name.into(),
            suggestion,
        }
    }

    /// One-line message without the `error:` prefix, for embedding in
    /// other errors.
    pub fn summary(&self) -> String {
        match &self.suggestion {
            Some(suggestion) => format!(
                "unknown tier '{}', did you mean '{}'?",
                self.name, suggestion
            ),
            None => format!("unknown tier '{}'", self.name),
        }
    }
}

impl fmt::Display for UnknownTierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let use_color = should_use_color();

        if use_color {
            writeln!(f, "\x1b[1;31merror:\x1b[0m unknown tier '{}'", self.name)?;
        } else {
            writeln!(f, "error: unknown tier '{}'", self.name)?;
        }

        writeln!(f)?;

        if let Some(suggestion) = &self.suggestion {
            if use_color {
                writeln!(f, "\x1b[1;36mhint:\x1b[0m did you mean '{}'?", suggestion)?;
            } else {
                writeln!(f, "hint: did you mean '{}'?", suggestion)?;
            }
        }

        write!(f, "      valid tiers: avx2, avx, sse2, neon, default")
    }
}

impl std::error::Error for UnknownTierError {}

/// Error when a forced tier cannot run on this host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierUnavailableError {
    /// Label of the requested tier
    pub requested: &'static str,
    /// Label of the best tier the host supports
    pub best_available: &'static str,
}

impl TierUnavailableError {
    pub fn new(requested: &'static str, best_available: &'static str) -> Self {
        Self {
            requested,
            best_available,
        }
    }
}

impl fmt::Display for TierUnavailableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if should_use_color() {
            writeln!(
                f,
                "\x1b[1;31merror:\x1b[0m {} kernel is not supported on this CPU",
                self.requested
            )?;
            write!(
                f,
                "\n\x1b[1;36mhint:\x1b[0m the best available instruction set is {}",
                self.best_available
            )
        } else {
            writeln!(f, "error: {} kernel is not supported on this CPU", self.requested)?;
            write!(
                f,
                "\nhint: the best available instruction set is {}",
                self.best_available
            )
        }
    }
}

impl std::error::Error for TierUnavailableError {}

/// Errors that can occur while loading settings.
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read
    Io {
        path: String,
        source: std::io::Error,
    },
    /// The file is not valid settings TOML
    Parse {
        path: String,
        source: toml::de::Error,
    },
    /// An explicitly requested file does not exist
    NotFound { path: String },
}

impl ConfigError {
    /// The message without the `error:` prefix.
    pub fn reason(&self) -> String {
        match self {
            ConfigError::Io { path, source } => {
                format!("cannot read config '{}': {}", path, source)
            }
            ConfigError::Parse { path, source } => {
                format!("invalid config '{}': {}", path, source)
            }
            ConfigError::NotFound { path } => {
                format!("config file '{}' does not exist", path)
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if should_use_color() {
            write!(f, "\x1b[1;31merror:\x1b[0m {}", self.reason())
        } else {
            write!(f, "error: {}", self.reason())
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            ConfigError::NotFound { .. } => None,
        }
    }
}

/// Check if colored output should be used
fn should_use_color() -> bool {
    // Respect NO_COLOR environment variable
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    use std::io::IsTerminal;
    std::io::stderr().is_terminal()
}

/// Calculate Levenshtein distance between two strings
fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let len2 = s2.chars().count();
    if s1.is_empty() {
        return len2;
    }
    if len2 == 0 {
        return s1.chars().count();
    }

    let mut prev_row: Vec<usize> = (0..=len2).collect();
    let mut curr_row = vec![0; len2 + 1];

    for (i, c1) in s1.chars().enumerate() {
        curr_row[0] = i + 1;

        for (j, c2) in s2.chars().enumerate() {
            let cost = usize::from(c1 != c2);
            curr_row[j + 1] = (curr_row[j] + 1)
                .min(prev_row[j + 1] + 1)
                .min(prev_row[j] + cost);
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[len2]
}

/// Find the closest matching tier name
pub fn find_closest_tier(name: &str, available: &[String]) -> Option<String> {
    let threshold = if name.len() < 5 { 2 } else { 3 };

    available
        .iter()
        .map(|candidate| (levenshtein_distance(name, candidate), candidate))
        .filter(|(distance, _)| *distance <= threshold)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, candidate)| candidate.clone())
}
