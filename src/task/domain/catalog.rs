//! Fixed catalogs selected on the task intake form.

use super::{ParsePlatformError, ParseRequestTypeError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Website platform the build targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    /// WordPress.
    #[serde(rename = "WP")]
    WordPress,
    /// Duda.
    #[serde(rename = "DUDA")]
    Duda,
}

impl Platform {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WordPress => "WP",
            Self::Duda => "DUDA",
        }
    }
}

impl TryFrom<&str> for Platform {
    type Error = ParsePlatformError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "WP" => Ok(Self::WordPress),
            "DUDA" => Ok(Self::Duda),
            _ => Err(ParsePlatformError(value.to_owned())),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of work requested for a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum RequestType {
    /// Rebuild of the whole site.
    #[serde(rename = "Full Redesign")]
    FullRedesign,
    /// Copy or media changes on existing pages.
    #[serde(rename = "Content Update")]
    ContentUpdate,
    /// New functionality added to the site.
    #[serde(rename = "New Feature")]
    NewFeature,
    /// Correction of broken behaviour.
    #[serde(rename = "Bug Fix")]
    BugFix,
    /// Search engine optimisation pass.
    #[serde(rename = "SEO Optimization")]
    SeoOptimization,
    /// Page speed and asset optimisation pass.
    #[serde(rename = "Performance Optimization")]
    PerformanceOptimization,
}

impl RequestType {
    /// Every request type offered on the intake form, in display order.
    pub const ALL: [Self; 6] = [
        Self::FullRedesign,
        Self::ContentUpdate,
        Self::NewFeature,
        Self::BugFix,
        Self::SeoOptimization,
        Self::PerformanceOptimization,
    ];

    /// Returns the canonical label, used for both display and storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FullRedesign => "Full Redesign",
            Self::ContentUpdate => "Content Update",
            Self::NewFeature => "New Feature",
            Self::BugFix => "Bug Fix",
            Self::SeoOptimization => "SEO Optimization",
            Self::PerformanceOptimization => "Performance Optimization",
        }
    }
}

impl TryFrom<&str> for RequestType {
    type Error = ParseRequestTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim();
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str().eq_ignore_ascii_case(normalized))
            .ok_or_else(|| ParseRequestTypeError(value.to_owned()))
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
