//! Python version value object

use std::fmt;
use std::str::FromStr;

use crate::domain::error::VersionParseError;

/// Value object for a dotted Python version descriptor (e.g. "3.10").
/// Immutable and validated on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PythonVersion {
    major: u32,
    minor: u32,
    micro: Option<u32>,
}

impl PythonVersion {
    /// Create a version from major and minor components
    pub const fn new(major: u32, minor: u32) -> Self {
        Self {
            major,
            minor,
            micro: None,
        }
    }

    /// Major component
    pub const fn major(&self) -> u32 {
        self.major
    }

    /// Minor component
    pub const fn minor(&self) -> u32 {
        self.minor
    }

    /// Dotted rendering, as given (e.g. "3.10" or "3.10.2")
    pub fn dotted(&self) -> String {
        match self.micro {
            Some(micro) => format!("{}.{}.{}", self.major, self.minor, micro),
            None => format!("{}.{}", self.major, self.minor),
        }
    }

    /// First two components concatenated without a separator
    /// (the library-name convention, e.g. "3.10" -> "310")
    pub fn compact(&self) -> String {
        format!("{}{}", self.major, self.minor)
    }

    /// Whether this interpreter generation is supported (CPython 3+)
    pub const fn is_supported(&self) -> bool {
        self.major >= 3
    }
}

impl FromStr for PythonVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let err = || VersionParseError {
            input: s.to_string(),
        };

        let mut parts = input.split('.');
        let major = parts
            .next()
            .filter(|p| !p.is_empty())
            .and_then(|p| p.parse().ok())
            .ok_or_else(err)?;
        let minor = parts
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or_else(err)?;
        let micro = match parts.next() {
            Some(p) => Some(p.parse().map_err(|_| err())?),
            None => None,
        };

        if parts.next().is_some() {
            return Err(err());
        }

        Ok(Self {
            major,
            minor,
            micro,
        })
    }
}

impl fmt::Display for PythonVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dotted())
    }
}
