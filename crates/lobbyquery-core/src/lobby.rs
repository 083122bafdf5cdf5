//! Wire models returned by the directory API.
//!
//! The list endpoint and the details endpoint share one record shape;
//! a list row simply arrives with fewer fields populated. Everything
//! deserializes leniently — missing fields default rather than fail,
//! since the remote service is the source of truth and this side only
//! does shape checks.

use serde::{Deserialize, Serialize};

/// One page of list results. Immutable once received; superseded
/// wholesale by the next fetch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ListResponse {
    /// Item count on this page
    pub count: i64,
    /// Item count across all pages
    pub total_count: i64,
    /// Highest valid zero-based page index
    pub max_page_index: i64,
    /// Zero-based index of this page
    pub page_index: i64,
    /// Item summaries, page-ordered
    pub list: Vec<ServerInfo>,
}

/// One server record, summary or detailed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ServerInfo {
    /// Server display name
    pub name: String,
    /// Row identifier used by the details endpoint
    pub row_id: String,
    /// Public address
    pub address: String,
    /// Port
    pub port: i64,
    /// Connected player count
    pub connected: i64,
    /// Player capacity
    pub max_connections: i64,
    /// Host identity (lobby operator id)
    pub host: String,
    /// Play style (survival, endless, ...)
    pub intent: String,
    /// Game mode
    pub mode: String,
    /// Platform name
    pub platform: String,
    /// Current season
    pub season: String,
    /// PvP enabled
    #[serde(alias = "pvp")]
    pub is_pvp: bool,
    /// Join requires a password
    #[serde(alias = "Password")]
    pub is_password: bool,
    /// Server description, detailed view only
    pub description: String,
    /// Connected players, present when the service includes them
    pub players: Option<Vec<PlayerInfo>>,
    /// Installed mods, detailed view only
    pub mods_info: Option<Vec<ModInfo>>,
    /// World day information, detailed view only
    pub days_info: Option<DayInfo>,
}

/// A connected player.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PlayerInfo {
    /// Player name
    pub name: String,
    /// Chosen character, empty when not yet picked
    pub prefab: String,
    /// In-game color
    pub color: String,
    /// Network identity
    pub net_id: String,
}

/// An installed mod.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ModInfo {
    /// Mod identifier
    pub id: i64,
    /// Mod display name
    pub name: String,
    /// Installed version
    pub current_version: String,
    /// Latest published version
    pub new_version: String,
    /// Clients must download this mod
    pub is_client_download: bool,
}

/// World day / season progress.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DayInfo {
    /// Current world day
    pub day: i64,
    /// Days elapsed in the current season
    pub days_elapsed_in_season: i64,
    /// Days remaining in the current season
    pub days_left_in_season: i64,
}

impl DayInfo {
    /// Total length of the current season in days.
    #[must_use]
    pub fn total_days_in_season(self) -> i64 {
        self.days_elapsed_in_season + self.days_left_in_season
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_body_deserializes_with_defaults() {
        let body = r#"{"Count": 1, "List": [{"Name": "srv", "RowId": "r1"}]}"#;
        let resp: ListResponse = serde_json::from_str(body).expect("lenient parse");
        assert_eq!(resp.count, 1);
        assert_eq!(resp.max_page_index, 0);
        assert_eq!(resp.list[0].name, "srv");
        assert!(resp.list[0].players.is_none());
    }

    #[test]
    fn lowercase_pvp_alias_is_accepted() {
        let body = r#"{"Name": "srv", "pvp": true}"#;
        let info: ServerInfo = serde_json::from_str(body).expect("parses");
        assert!(info.is_pvp);
    }

    #[test]
    fn season_total_sums_elapsed_and_left() {
        let d = DayInfo {
            day: 30,
            days_elapsed_in_season: 5,
            days_left_in_season: 15,
        };
        assert_eq!(d.total_days_in_season(), 20);
    }
}
