//! Library versions and the skew check run when a recipe is created.

use crate::error::CoreError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// `major.minor.micro` version triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub micro: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32, micro: u32) -> Self {
        Version {
            major,
            minor,
            micro,
        }
    }

    /// Version of this library as compiled.
    pub fn current() -> Self {
        Version {
            major: env!("CARGO_PKG_VERSION_MAJOR").parse().unwrap_or(0),
            minor: env!("CARGO_PKG_VERSION_MINOR").parse().unwrap_or(0),
            micro: env!("CARGO_PKG_VERSION_PATCH").parse().unwrap_or(0),
        }
    }

    /// Packed numeric form, `major * 10000 + minor * 100 + micro`.
    pub fn code(&self) -> u64 {
        self.major as u64 * 10_000 + self.minor as u64 * 100 + self.micro as u64
    }

    /// Inverse of [`code`](Self::code).
    pub fn from_code(code: u64) -> Self {
        Version {
            major: (code / 10_000) as u32,
            minor: (code / 100 % 100) as u32,
            micro: (code % 100) as u32,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.micro)
    }
}

impl FromStr for Version {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('.').collect();
        if parts.is_empty() || parts.len() > 3 {
            return Err(CoreError::IllegalInput(format!("Invalid version: {}", s)));
        }
        let mut numbers = [0u32; 3];
        for (slot, part) in numbers.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| CoreError::IllegalInput(format!("Invalid version: {}", s)))?;
        }
        Ok(Version::new(numbers[0], numbers[1], numbers[2]))
    }
}

/// Compare the version a recipe was built against with the running one.
///
/// A running library with an older major version is an error; any other
/// difference is only reported.
pub fn check_version_skew(compiled: &Version, runtime: &Version) -> Result<(), CoreError> {
    if compiled == runtime {
        return Ok(());
    }
    if runtime.major < compiled.major {
        return Err(CoreError::IncompatibleVersion(format!(
            "Recipe built against {} cannot run on older library {}",
            compiled, runtime
        )));
    }
    warn!(
        compiled = %compiled,
        runtime = %runtime,
        "Recipe was built against a different library version"
    );
    Ok(())
}
