//! Session keys.

use std::fmt;

/// Stands in for a missing or blank key part.
pub const DEFAULT_PART: &str = "default";

/// Identity of one world instance: `project::instance`.
///
/// Blank parts become [`DEFAULT_PART`], so `"::"`, `""` and
/// `"default::default"` all name the same session.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId {
    project:  String,
    instance: String,
}

impl SessionId {
    pub fn new(project: impl AsRef<str>, instance: impl AsRef<str>) -> Self {
        fn part(s: &str) -> String {
            let s = s.trim();
            if s.is_empty() { DEFAULT_PART.to_owned() } else { s.to_owned() }
        }
        Self { project: part(project.as_ref()), instance: part(instance.as_ref()) }
    }

    /// Parse `project::instance`.  A key without `::` names the project's
    /// default instance.
    pub fn parse(key: &str) -> Self {
        match key.split_once("::") {
            Some((project, instance)) => Self::new(project, instance),
            None => Self::new(key, ""),
        }
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn instance(&self) -> &str {
        &self.instance
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new("", "")
    }
}

impl From<&str> for SessionId {
    fn from(key: &str) -> Self {
        Self::parse(key)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.project, self.instance)
    }
}
