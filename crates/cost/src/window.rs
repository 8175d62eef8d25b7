//! Time-window selectors accepted by the cost API.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CostApiError, Result};

/// A `window` query value, e.g. `7d`, `yesterday` or an RFC 3339 range.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Window(String);

impl Window {
    /// Wrap an arbitrary selector string.
    ///
    /// # Errors
    ///
    /// Returns [`CostApiError::InvalidWindow`] if the selector is blank.
    pub fn new(selector: impl Into<String>) -> Result<Self> {
        let selector = selector.into();
        if selector.trim().is_empty() {
            return Err(CostApiError::InvalidWindow(
                "window selector must not be empty".to_string(),
            ));
        }
        Ok(Self(selector))
    }

    /// The last `n` days (`{n}d`).
    #[must_use]
    pub fn days(n: u32) -> Self {
        Self(format!("{n}d"))
    }

    /// The last `n` hours (`{n}h`).
    #[must_use]
    pub fn hours(n: u32) -> Self {
        Self(format!("{n}h"))
    }

    #[must_use]
    pub fn today() -> Self {
        Self("today".to_string())
    }

    #[must_use]
    pub fn yesterday() -> Self {
        Self("yesterday".to_string())
    }

    #[must_use]
    pub fn week() -> Self {
        Self("week".to_string())
    }

    #[must_use]
    pub fn month() -> Self {
        Self("month".to_string())
    }

    /// An explicit `start,end` range in UTC.
    ///
    /// # Errors
    ///
    /// Returns [`CostApiError::InvalidWindow`] unless `start` is before `end`.
    pub fn range(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start >= end {
            return Err(CostApiError::InvalidWindow(
                "start must be before end".to_string(),
            ));
        }
        Ok(Self(format!(
            "{},{}",
            start.to_rfc3339_opts(SecondsFormat::Secs, true),
            end.to_rfc3339_opts(SecondsFormat::Secs, true)
        )))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Window {
    type Err = CostApiError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}
