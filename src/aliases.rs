//! Listing of configured git command aliases.
//!
//! Aliases are read from `git config --get-regexp ^alias\.` and paired with a
//! short description: a configured one for well-known aliases, otherwise the
//! alias value itself (shell aliases are prefixed with `Shell:`).

use crate::config::Config;
use crate::error::Result;
use crate::vcs::VcsBackend;
use log::debug;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static ALIAS_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^alias\.(.+?)\s+(.+)$").expect("alias pattern is valid"));

/// One alias row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AliasEntry {
    pub name: String,
    pub description: String,
}

impl AliasEntry {
    fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
        }
    }
}

/// Read aliases through `backend`, falling back to a fixed list when git
/// reports none or the lookup fails.
pub fn list_aliases<B: VcsBackend + ?Sized>(backend: &B, config: &Config) -> Result<Vec<AliasEntry>> {
    let output = backend.list_aliases()?;
    if !output.success() {
        debug!("alias lookup failed ({}), using fallback list", output.diagnostic());
        return Ok(fallback_aliases());
    }
    Ok(parse_aliases(
        &output.stdout,
        &config.alias_descriptions,
        config.alias_description_width,
    ))
}

/// Parse `alias.<name> <value>` lines into entries sorted by name.
pub fn parse_aliases(
    raw: &str,
    descriptions: &BTreeMap<String, String>,
    width: usize,
) -> Vec<AliasEntry> {
    let mut entries: Vec<AliasEntry> = raw
        .lines()
        .filter_map(|line| ALIAS_LINE.captures(line))
        .map(|caps| {
            let name = &caps[1];
            AliasEntry::new(name, &describe(name, &caps[2], descriptions, width))
        })
        .collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries
}

/// Description shown for one alias.
pub fn describe(
    name: &str,
    value: &str,
    descriptions: &BTreeMap<String, String>,
    width: usize,
) -> String {
    if let Some(description) = descriptions.get(name) {
        return description.clone();
    }
    match value.strip_prefix('!') {
        Some(command) => format!("Shell: {}", truncate(command, width)),
        None => truncate(value, width),
    }
}

/// Cut `text` to `width` characters, ending in `...` when shortened.
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// Entries shown when git config cannot be read.
pub fn fallback_aliases() -> Vec<AliasEntry> {
    vec![
        AliasEntry::new("alias", "List all aliases"),
        AliasEntry::new("branches", "Track all remote branches"),
        AliasEntry::new("cleanup", "Cleanup merged branches"),
    ]
}
