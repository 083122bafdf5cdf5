//! Configuration surface for the query engine.
//!
//! Loaded externally (TOML file) and treated as read-only afterwards.
//! Every command recognition pattern is configurable; an empty or
//! missing pattern disables that command entirely. Capture group
//! conventions: `Text` carries the search text, `Number` a 1-based
//! selection, `Page` a 1-based page number. Group names only need to
//! start with the conventional name, so alternation branches can use
//! `Number1`/`Number2` — the regex engine rejects a name used twice.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Engine configuration with defaults matching the public bot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Directory API base URL
    pub api_base_url: String,

    /// Maximum list items rendered per page
    pub page_max_size: i64,

    /// Idle seconds after which a session is reset before handling
    pub timeout_secs: u64,

    /// Reset the session when input is unrecognized or a captured
    /// number fails to parse
    pub reset_on_invalid: bool,

    /// Search-servers pattern; `Text` group captures the server name
    pub search_servers_pattern: String,

    /// Search-player pattern; `Text` group captures the player name
    pub search_player_pattern: String,

    /// Previous-page pattern
    pub previous_page_pattern: String,

    /// Next-page pattern
    pub next_page_pattern: String,

    /// Show-brief pattern; `Number` group is the 1-based list number
    pub show_brief_pattern: String,

    /// Show-detailed pattern; the `Number`-prefixed group that matched
    /// is the 1-based list number
    pub show_detailed_pattern: String,

    /// Switch-page pattern; `Page` group is the 1-based page number
    pub switch_page_pattern: String,

    /// Version lookup pattern, handled at the transport edge
    pub get_version_pattern: String,

    /// Reply for an empty server search
    pub not_found_server_text: String,

    /// Reply for an empty player search
    pub not_found_player_text: String,

    /// Header line of the list view. Placeholders: `PageNumber`,
    /// `MaxPageNumber` (both 1-based).
    pub list_header_format: String,

    /// Per-item line of the list view. Placeholders: `ItemNumber`,
    /// `ServerName`, `CurrentPlayerCount`, `MaxPlayerCount`,
    /// `IsPassword`, `Platform`, `Host`.
    pub list_item_format: String,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.dstserverlist.top/api/v2/server".to_string(),
            page_max_size: 9,
            timeout_secs: 600,
            reset_on_invalid: true,
            search_servers_pattern: r"^查服\s*(?<Text>.*)$".to_string(),
            search_player_pattern: r"^查玩家\s*(?<Text>.*)$".to_string(),
            previous_page_pattern: r"^\s*上一页\s*$".to_string(),
            next_page_pattern: r"^\s*下一页\s*$".to_string(),
            show_brief_pattern: r"^(?<Number>\d+)$".to_string(),
            show_detailed_pattern: r"^(\.(?<Number1>\d+))|((?<Number2>\d+)\.)$".to_string(),
            switch_page_pattern: r"^p(?<Page>\d+)$".to_string(),
            get_version_pattern: r"^(获取|查询)饥荒版本$".to_string(),
            not_found_server_text: "没有搜索到相关服务器".to_string(),
            not_found_player_text: "没有搜索到相关玩家".to_string(),
            list_header_format: "当前是第{PageNumber}页 一共{MaxPageNumber}页".to_string(),
            list_item_format: "{ItemNumber}. {ServerName} ({CurrentPlayerCount}/{MaxPlayerCount})"
                .to_string(),
        }
    }
}

impl QueryConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        toml::from_str(&text).map_err(Error::from)
    }

    /// Load from a TOML file if it exists, otherwise defaults.
    ///
    /// # Errors
    ///
    /// Returns an error only when an existing file is unreadable or
    /// malformed.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

/// Treat empty/whitespace-only patterns as "command disabled".
#[must_use]
pub(crate) fn enabled_pattern(pattern: &str) -> Option<&str> {
    let trimmed = pattern.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
