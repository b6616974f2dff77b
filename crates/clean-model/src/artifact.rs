//! Artifact references and publish metadata.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Validated artifact name, usable as a single path component.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ArtifactName(String);

impl ArtifactName {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidArtifactName(value, "name is empty"));
        }
        if trimmed == "." || trimmed == ".." {
            return Err(ModelError::InvalidArtifactName(value, "reserved name"));
        }
        if trimmed.contains(['/', '\\']) {
            return Err(ModelError::InvalidArtifactName(
                value,
                "path separators are not allowed",
            ));
        }
        if trimmed.contains(':') {
            return Err(ModelError::InvalidArtifactName(
                value,
                "':' is reserved for versions",
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ArtifactVersion {
    #[default]
    Latest,
    Number(u32),
}

impl FromStr for ArtifactVersion {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("latest") {
            return Ok(Self::Latest);
        }
        trimmed
            .strip_prefix('v')
            .and_then(|digits| digits.parse::<u32>().ok())
            .map(Self::Number)
            .ok_or_else(|| ModelError::InvalidArtifactVersion(s.to_string()))
    }
}

impl fmt::Display for ArtifactVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latest => f.write_str("latest"),
            Self::Number(n) => write!(f, "v{n}"),
        }
    }
}

/// `name[:version]` reference to a stored artifact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactRef {
    pub name: ArtifactName,
    pub version: ArtifactVersion,
}

impl FromStr for ArtifactRef {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        let (name, version) = match s.rsplit_once(':') {
            Some((name, version)) => (name, version.parse()?),
            None => (s, ArtifactVersion::Latest),
        };
        Ok(Self {
            name: ArtifactName::new(name)?,
            version,
        })
    }
}

impl fmt::Display for ArtifactRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.version)
    }
}

/// Metadata attached to a newly published artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactSpec {
    pub name: ArtifactName,
    #[serde(rename = "type")]
    pub artifact_type: String,
    pub description: String,
}

impl ArtifactSpec {
    pub fn new(
        name: ArtifactName,
        artifact_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name,
            artifact_type: artifact_type.into(),
            description: description.into(),
        }
    }
}
