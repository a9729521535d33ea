//! Engine version identity
//!
//! The host engine is identified by a major.minor pair ("4.27", "5.0").
//! Ordering is derived from (major, minor) so it is total and monotonic,
//! which lets gate thresholds be written with plain `>=` comparisons.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error produced when an engine version string does not parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid engine version '{0}', expected major.minor")]
pub struct InvalidVersion(pub String);

/// The engine version a build is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EngineVersion {
    pub major: u16,
    pub minor: u16,
}

impl EngineVersion {
    /// Create a new version
    #[inline]
    pub const fn new(major: u16, minor: u16) -> Self {
        Self { major, minor }
    }
}

impl FromStr for EngineVersion {
    type Err = InvalidVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('.');
        let major = parts.next().and_then(|p| p.parse().ok());
        let minor = parts.next().and_then(|p| p.parse().ok());
        match (major, minor, parts.next()) {
            (Some(major), Some(minor), None) => Ok(Self { major, minor }),
            _ => Err(InvalidVersion(s.into())),
        }
    }
}

impl fmt::Display for EngineVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parsing() {
        let v: EngineVersion = "4.27".parse().unwrap();
        assert_eq!(v.major, 4);
        assert_eq!(v.minor, 27);
        assert_eq!(v.to_string(), "4.27");
    }

    #[test]
    fn test_version_parsing_rejects_garbage() {
        assert!("".parse::<EngineVersion>().is_err());
        assert!("5".parse::<EngineVersion>().is_err());
        assert!("5.0.1".parse::<EngineVersion>().is_err());
        assert!("five.zero".parse::<EngineVersion>().is_err());
    }

    #[test]
    fn test_version_ordering() {
        let v419 = EngineVersion::new(4, 19);
        let v427 = EngineVersion::new(4, 27);
        let v50 = EngineVersion::new(5, 0);

        assert!(v419 < v427);
        assert!(v427 < v50);
        assert!(v50 >= EngineVersion::new(5, 0));
    }
}
