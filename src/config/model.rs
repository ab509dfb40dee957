//! Config struct definition and default implementation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// File name looked up at the repository root when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = ".branchtidy.yaml";

/// Configuration for branchtidy.
///
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Git settings
    // =========================================================================
    /// Name of the trunk branch (default: "main").
    pub trunk_branch: String,

    /// Remote fetched with `--prune` (default: "origin").
    pub remote: String,

    // =========================================================================
    // Alias listing
    // =========================================================================
    /// Descriptions shown in place of the raw value for known aliases.
    pub alias_descriptions: BTreeMap<String, String>,

    /// Maximum characters of an alias value before it is cut with `...`.
    pub alias_description_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trunk_branch: default_trunk_branch(),
            remote: default_remote(),
            alias_descriptions: default_alias_descriptions(),
            alias_description_width: default_alias_description_width(),
        }
    }
}

fn default_trunk_branch() -> String {
    "main".to_string()
}
fn default_remote() -> String {
    "origin".to_string()
}
fn default_alias_description_width() -> usize {
    80
}

/// Descriptions for the aliases this tool is usually installed under.
pub(crate) fn default_alias_descriptions() -> BTreeMap<String, String> {
    [
        ("alias", "List all git aliases in a formatted table"),
        (
            "branches",
            "Download all remote branches and create local tracking branches",
        ),
        (
            "cleanup",
            "Delete local branches with no remote tracking or that no longer exist on remote",
        ),
    ]
    .into_iter()
    .map(|(name, description)| (name.to_string(), description.to_string()))
    .collect()
}
