use std::{fmt, path::Path};

use regex::Regex;

use crate::docweave_error::DocweaveError;

/// Validated page location: lowercase slug segments joined by `/`, for
/// example `cloud-platform/live-trading/brokerages/alpaca/orders`. The first
/// segment names the site section the context resolver derives flags from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location(String);

impl Location {
    pub fn parse<S: Into<String>>(location: S) -> Result<Location, DocweaveError> {
        let location = location.into();
        let valid = Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*(/[a-z0-9]+(-[a-z0-9]+)*)*$")?;
        if !valid.is_match(&location) {
            return Err(DocweaveError::invalid_location(format!(
                "invalid page location '{location}'"
            )));
        }
        Ok(Location(location))
    }

    /// Derive a location from a page path relative to the pages root
    pub fn from_rel_path(path: &Path) -> Result<Location, DocweaveError> {
        let segments: Vec<String> = path
            .with_extension("")
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Self::parse(segments.join("/"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First segment of the location
    pub fn section(&self) -> &str {
        self.0.split('/').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
