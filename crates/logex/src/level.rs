//! crates/logex/src/level.rs
//! Severity levels and the shared threshold used to filter them.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

use tracing::level_filters::LevelFilter;

use crate::error::ParseLevelError;

/// Severity of a log entry, ordered from most to least severe.
///
/// The derived ordering follows declaration order, so `Level::Panic` compares
/// as the *smallest* value. A threshold of `Level::Warn` therefore enables
/// every level `<= Level::Warn`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Level {
    /// Logs and then panics with the rendered message.
    Panic,
    /// Logs and then exits the process with status 1.
    Fatal,
    /// Failures that should definitely be noted.
    Error,
    /// Non-critical entries that deserve eyes.
    Warn,
    /// General operational entries.
    Info,
    /// Verbose diagnostics, usually only enabled when debugging.
    #[default]
    Debug,
}

impl Level {
    /// Every level, most severe first.
    pub const ALL: [Self; 6] = [
        Self::Panic,
        Self::Fatal,
        Self::Error,
        Self::Warn,
        Self::Info,
        Self::Debug,
    ];

    /// Returns the lowercase name of the level.
    ///
    /// # Examples
    ///
    /// ```
    /// use logex::Level;
    ///
    /// assert_eq!(Level::Warn.as_str(), "warning");
    /// assert_eq!(Level::Debug.as_str(), "debug");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Panic => "panic",
            Self::Fatal => "fatal",
            Self::Error => "error",
            Self::Warn => "warning",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }

    /// Returns the four-character marker rendered at the start of each line.
    ///
    /// # Examples
    ///
    /// ```
    /// use logex::Level;
    ///
    /// assert_eq!(Level::Fatal.short_name(), "FATA");
    /// assert_eq!(Level::Info.short_name(), "INFO");
    /// ```
    #[must_use]
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::Panic => "PANI",
            Self::Fatal => "FATA",
            Self::Error => "ERRO",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBU",
        }
    }

    /// Reports whether an entry at this level passes the given threshold.
    ///
    /// # Examples
    ///
    /// ```
    /// use logex::Level;
    ///
    /// assert!(Level::Error.is_enabled_at(Level::Warn));
    /// assert!(!Level::Info.is_enabled_at(Level::Warn));
    /// ```
    #[must_use]
    pub fn is_enabled_at(self, threshold: Self) -> bool {
        self <= threshold
    }

    /// The tracing level an entry at this severity is dispatched with.
    #[must_use]
    pub const fn as_tracing(self) -> tracing::Level {
        match self {
            Self::Panic | Self::Fatal | Self::Error => tracing::Level::ERROR,
            Self::Warn => tracing::Level::WARN,
            Self::Info => tracing::Level::INFO,
            Self::Debug => tracing::Level::DEBUG,
        }
    }

    /// The tracing filter equivalent to using this level as a threshold.
    #[must_use]
    pub const fn as_level_filter(self) -> LevelFilter {
        match self {
            Self::Panic | Self::Fatal | Self::Error => LevelFilter::ERROR,
            Self::Warn => LevelFilter::WARN,
            Self::Info => LevelFilter::INFO,
            Self::Debug => LevelFilter::DEBUG,
        }
    }

    /// Maps a tracing level back onto a severity. TRACE folds into `Debug`.
    #[must_use]
    pub fn from_tracing(level: &tracing::Level) -> Self {
        match *level {
            tracing::Level::ERROR => Self::Error,
            tracing::Level::WARN => Self::Warn,
            tracing::Level::INFO => Self::Info,
            _ => Self::Debug,
        }
    }

    const fn to_u8(self) -> u8 {
        self as u8
    }

    const fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Panic,
            1 => Self::Fatal,
            2 => Self::Error,
            3 => Self::Warn,
            4 => Self::Info,
            _ => Self::Debug,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "panic" => Ok(Self::Panic),
            "fatal" => Ok(Self::Fatal),
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            _ => Err(ParseLevelError::new(input)),
        }
    }
}

/// Lock-free holder for the active threshold.
///
/// Readers racing a [`store`](Self::store) may observe either value.
#[derive(Debug)]
pub(crate) struct AtomicLevel(AtomicU8);

impl AtomicLevel {
    pub(crate) const fn new(level: Level) -> Self {
        Self(AtomicU8::new(level.to_u8()))
    }

    pub(crate) fn load(&self) -> Level {
        Level::from_u8(self.0.load(Ordering::Relaxed))
    }

    pub(crate) fn store(&self, level: Level) {
        self.0.store(level.to_u8(), Ordering::Relaxed);
    }
}
