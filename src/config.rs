//! Form behavior configuration

use serde::{Deserialize, Serialize};

/// Tunable rules for a form session
///
/// Hosts load or persist this however they like; the library never
/// touches the filesystem. Missing fields deserialize to their
/// defaults and unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormConfig {
    /// Enforce landline = 10 digits and mobile = 11 digits instead of
    /// the legacy rule that accepts 10 or 11 for either field
    #[serde(default)]
    pub strict_phone_lengths: bool,
    /// Age below which guardian names become required
    #[serde(default = "default_adulthood_age")]
    pub adulthood_age: i32,
}

fn default_adulthood_age() -> i32 {
    18
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            strict_phone_lengths: false,
            adulthood_age: default_adulthood_age(),
        }
    }
}
