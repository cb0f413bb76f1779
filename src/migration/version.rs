//! Gradle version parsing and distance classification
//!
//! Gradle versions are `MAJOR.MINOR[.PATCH][-qualifier]` (`8.5`,
//! `8.10.2`, `8.0-rc-1`). They are normalised onto `semver::Version` so
//! that ordering, including pre-release qualifiers, comes from `semver`.

use regex::Regex;
use semver::{Prerelease, Version};
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

static GRADLE_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)(?:\.(\d+))?(?:\.(\d+))?(?:-([0-9A-Za-z][0-9A-Za-z.-]*))?$")
        .expect("valid regex")
});

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct GradleVersion(Version);

impl GradleVersion {
    pub fn parse(raw: &str) -> Option<Self> {
        let caps = GRADLE_VERSION.captures(raw.trim())?;
        let number = |i: usize| -> Option<u64> {
            match caps.get(i) {
                Some(m) => m.as_str().parse().ok(),
                None => Some(0),
            }
        };

        let mut version = Version::new(number(1)?, number(2)?, number(3)?);
        if let Some(qualifier) = caps.get(4) {
            version.pre = Prerelease::new(qualifier.as_str()).ok()?;
        }
        Some(Self(version))
    }

    pub fn major(&self) -> u64 {
        self.0.major
    }

    pub fn minor(&self) -> u64 {
        self.0.minor
    }
}

impl fmt::Display for GradleVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0.major, self.0.minor)?;
        if self.0.patch > 0 {
            write!(f, ".{}", self.0.patch)?;
        }
        if !self.0.pre.is_empty() {
            write!(f, "-{}", self.0.pre)?;
        }
        Ok(())
    }
}

/// Distance between the current and target versions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionGap {
    /// At least one side could not be parsed
    Unknown,
    Downgrade,
    Same,
    /// Same major, newer minor or patch
    Minor,
    Major { majors: u64 },
}

impl VersionGap {
    pub fn between(current: &str, target: &str) -> Self {
        let (Some(current), Some(target)) =
            (GradleVersion::parse(current), GradleVersion::parse(target))
        else {
            return VersionGap::Unknown;
        };

        match current.cmp(&target) {
            Ordering::Greater => VersionGap::Downgrade,
            Ordering::Equal => VersionGap::Same,
            Ordering::Less if current.major() == target.major() => VersionGap::Minor,
            Ordering::Less => VersionGap::Major {
                majors: target.major() - current.major(),
            },
        }
    }

    pub fn crosses_major(&self) -> bool {
        matches!(self, VersionGap::Major { .. })
    }
}
