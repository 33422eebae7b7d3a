//! Filename rules
//!
//! Turns dashboard titles into file names that are valid on the target
//! filesystem. The set of illegal characters is explicit configuration rather
//! than whatever the host OS happens to forbid.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Suffix appended to every backup file name
pub const BACKUP_SUFFIX: &str = "_backup.json";

/// Replacement for each illegal character
pub const REPLACEMENT: char = '_';

const UNIX_ILLEGAL: &[char] = &['/', '\0'];

const WINDOWS_ILLEGAL: &[char] = &['"', '<', '>', '|', '\0', ':', '*', '?', '\\', '/'];

/// Set of characters that may not appear in a file name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilenameRules {
    /// `/` and NUL
    Unix,
    /// Reserved Windows characters plus control characters U+0001..U+001F
    Windows,
    /// Same set as [`FilenameRules::Windows`], so snapshots survive being
    /// copied between systems
    #[default]
    Portable,
    /// Explicit list of characters
    Custom(Vec<char>),
}

impl FilenameRules {
    /// Whether `c` must be replaced
    pub fn is_illegal(&self, c: char) -> bool {
        match self {
            Self::Unix => UNIX_ILLEGAL.contains(&c),
            Self::Windows | Self::Portable => {
                WINDOWS_ILLEGAL.contains(&c) || ('\u{1}'..='\u{1f}').contains(&c)
            }
            Self::Custom(chars) => chars.contains(&c),
        }
    }

    /// Replaces every illegal character with [`REPLACEMENT`]
    ///
    /// One replacement per character; all other characters keep their order.
    pub fn sanitize(&self, title: &str) -> String {
        title
            .chars()
            .map(|c| if self.is_illegal(c) { REPLACEMENT } else { c })
            .collect()
    }

    /// File name used for a dashboard with the given title
    pub fn backup_file_name(&self, title: &str) -> String {
        format!("{}{}", self.sanitize(title), BACKUP_SUFFIX)
    }
}

impl fmt::Display for FilenameRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unix => write!(f, "unix"),
            Self::Windows => write!(f, "windows"),
            Self::Portable => write!(f, "portable"),
            Self::Custom(chars) => write!(f, "custom:{}", chars.iter().collect::<String>()),
        }
    }
}

impl FromStr for FilenameRules {
    type Err = String;

    /// Accepts `unix`, `windows`, `portable` or `custom:<chars>`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(chars) = s.strip_prefix("custom:") {
            if chars.is_empty() {
                return Err("custom filename rules need at least one character".to_string());
            }
            return Ok(Self::Custom(chars.chars().collect()));
        }

        match s.trim() {
            "unix" => Ok(Self::Unix),
            "windows" => Ok(Self::Windows),
            "portable" => Ok(Self::Portable),
            other => Err(format!(
                "unknown filename rules '{}' (expected unix, windows, portable or custom:<chars>)",
                other
            )),
        }
    }
}
