//! Query specification posted to the directory list endpoint.
//!
//! One `ListQuery` exists per active search. A new top-level search
//! command replaces the specification wholesale — filters never carry
//! over between searches. The filter parser mutates fields line by
//! line; the API client only reads.

use serde::{Deserialize, Serialize};

use crate::filter::{FilterList, FilterValue};

/// Which kind of search the active specification represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    /// Searching by server name
    Servers,
    /// Searching by player name
    Players,
}

/// Complete filter set for one list request.
///
/// Serialized PascalCase to match the directory API; unset fields are
/// omitted from the wire body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ListQuery {
    /// Server name filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_name: Option<FilterValue>,
    /// Player name filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_name: Option<FilterValue>,
    /// Host identity (lobby operator id)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// IP address, CIDR, or wildcard expression
    #[serde(rename = "IP", skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    /// Day-count expression (`<`, `<=`, `>`, `>=`, `=`, `%` suffix)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<String>,
    /// Port expression
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
    /// Connected-count expression
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connected: Option<String>,
    /// Platform alternatives
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<FilterList>,
    /// Season alternatives (English identifiers)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<FilterList>,
    /// PvP tri-state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_pvp: Option<bool>,
    /// Password tri-state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_password: Option<bool>,
    /// Zero-based page index
    pub page_index: i64,
    /// Page size
    pub page_count: i64,
    /// Case-insensitive matching on the service side
    pub ignore_case: bool,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            server_name: None,
            player_name: None,
            host: None,
            ip: None,
            days: None,
            port: None,
            connected: None,
            platform: None,
            season: None,
            is_pvp: None,
            is_password: None,
            page_index: 0,
            page_count: 9,
            ignore_case: true,
        }
    }
}

impl ListQuery {
    /// Fresh specification for a server-name search.
    #[must_use]
    pub fn for_servers(name: &str) -> Self {
        Self {
            server_name: Some(FilterValue::plain(name)),
            ..Self::default()
        }
    }

    /// Fresh specification for a player-name search.
    #[must_use]
    pub fn for_players(name: &str) -> Self {
        Self {
            player_name: Some(FilterValue::plain(name)),
            ..Self::default()
        }
    }

    /// Which search this specification represents.
    ///
    /// Player search wins when both name filters are somehow set; a
    /// fresh spec sets exactly one.
    #[must_use]
    pub fn search_kind(&self) -> SearchKind {
        if self.player_name.is_some() {
            SearchKind::Players
        } else {
            SearchKind::Servers
        }
    }

    /// The name filter belonging to the active search, for the
    /// regex/exact toggles.
    pub fn active_name_filter(&mut self) -> Option<&mut FilterValue> {
        match self.search_kind() {
            SearchKind::Players => self.player_name.as_mut(),
            SearchKind::Servers => self.server_name.as_mut(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_server_search_sets_only_server_name() {
        let q = ListQuery::for_servers("Hello");
        assert_eq!(q.server_name, Some(FilterValue::plain("Hello")));
        assert!(q.player_name.is_none());
        assert_eq!(q.search_kind(), SearchKind::Servers);
    }

    #[test]
    fn unset_fields_are_omitted_from_wire_body() {
        let q = ListQuery::for_servers("x");
        let json = serde_json::to_value(&q).expect("serializes");
        assert_eq!(json["ServerName"]["Value"], "x");
        assert!(json.get("IP").is_none());
        assert!(json.get("IsPvp").is_none());
        assert_eq!(json["PageIndex"], 0);
        assert_eq!(json["IgnoreCase"], true);
    }

    #[test]
    fn active_name_filter_follows_search_kind() {
        let mut q = ListQuery::for_players("abc");
        let f = q.active_name_filter().expect("player filter present");
        assert_eq!(f.value, "abc");
    }
}
