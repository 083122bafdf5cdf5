//! Template-driven rendering of list, brief, and detailed views.
//!
//! Format strings support three substitution forms:
//!
//! - plain: `{Field}`
//! - boolean conditional: `{Field:trueText|falseText}`
//! - null coalescing: `{Field:isnull:fallbackText|{Field}}`
//!
//! Placeholder names are case-insensitive. Unresolvable placeholders
//! render as empty text instead of erroring, so a bad config template
//! degrades instead of breaking replies. `{{` and `}}` escape literal
//! braces.
//!
//! The formatter is an explicitly constructed instance injected into
//! the engine — there is no process-wide default.

use std::collections::HashMap;

use crate::config::QueryConfig;
use crate::filter::FilterValue;
use crate::lobby::{ListResponse, PlayerInfo, ServerInfo};
use crate::translate;

const PLAYER_SEPARATOR: &str = ", ";

/// A named template parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateValue {
    /// Text value
    Str(String),
    /// Numeric value
    Int(i64),
    /// Boolean value, usable with the conditional form
    Bool(bool),
    /// Explicit null, usable with the isnull form
    Null,
}

impl TemplateValue {
    fn render(&self) -> String {
        match self {
            Self::Str(s) => s.clone(),
            Self::Int(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Null => String::new(),
        }
    }

    fn from_opt(value: Option<i64>) -> Self {
        value.map_or(Self::Null, Self::Int)
    }
}

/// Case-insensitive parameter map.
#[derive(Debug, Default)]
pub struct TemplateParams {
    values: HashMap<String, TemplateValue>,
}

impl TemplateParams {
    /// Empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parameter; names are matched case-insensitively.
    #[must_use]
    pub fn with(mut self, name: &str, value: TemplateValue) -> Self {
        self.values.insert(name.to_ascii_lowercase(), value);
        self
    }

    fn get(&self, name: &str) -> Option<&TemplateValue> {
        self.values.get(&name.to_ascii_lowercase())
    }
}

/// Render a format string against a parameter set.
#[must_use]
pub fn render(template: &str, params: &TemplateParams) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        match c {
            '{' if chars.peek().is_some_and(|&(_, n)| n == '{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek().is_some_and(|&(_, n)| n == '}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                if let Some(end) = matching_brace(template, i) {
                    out.push_str(&render_placeholder(&template[i + 1..end], params));
                    // Skip to the closing brace.
                    while chars.peek().is_some_and(|&(j, _)| j <= end) {
                        chars.next();
                    }
                } else {
                    out.push('{');
                }
            }
            _ => out.push(c),
        }
    }
    out
}

/// Index of the `}` matching the `{` at `open`, honoring nesting.
fn matching_brace(template: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in template[open..].char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Split at the first `|` that is not inside a nested placeholder.
fn split_top_level(text: &str) -> Option<(&str, &str)> {
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            '|' if depth == 0 => return Some((&text[..i], &text[i + 1..])),
            _ => {}
        }
    }
    None
}

fn render_placeholder(inner: &str, params: &TemplateParams) -> String {
    let Some((name, spec)) = inner.split_once(':') else {
        // Plain substitution; unknown names render empty.
        return params.get(inner.trim()).map(TemplateValue::render).unwrap_or_default();
    };
    let value = params.get(name.trim());

    if let Some(fallback_spec) = spec.strip_prefix("isnull:") {
        let (null_text, else_template) = split_top_level(fallback_spec).unwrap_or((fallback_spec, ""));
        return match value {
            None | Some(TemplateValue::Null) => render(null_text, params),
            Some(_) => render(else_template, params),
        };
    }

    // Boolean conditional: {Field:trueText|falseText}.
    let (true_text, false_text) = split_top_level(spec).unwrap_or((spec, ""));
    match value {
        Some(TemplateValue::Bool(true)) => render(true_text, params),
        Some(TemplateValue::Bool(false)) => render(false_text, params),
        // Non-boolean or missing values cannot pick a branch.
        _ => String::new(),
    }
}

/// Renders the three view kinds from configured format strings.
#[derive(Debug, Clone)]
pub struct Formatter {
    list_header_format: String,
    list_item_format: String,
    page_max_size: i64,
}

impl Formatter {
    /// Build a formatter from the configuration surface.
    #[must_use]
    pub fn new(config: &QueryConfig) -> Self {
        Self {
            list_header_format: config.list_header_format.clone(),
            list_item_format: config.list_item_format.clone(),
            page_max_size: config.page_max_size,
        }
    }

    /// Render the list view for one result snapshot.
    ///
    /// `target_player_filter` is set when the session's
    /// show-target-players flag is on: each item's player sub-list is
    /// filtered by the active player-name filter and appended beneath
    /// the item line.
    #[must_use]
    pub fn render_list(
        &self,
        snapshot: &ListResponse,
        target_player_filter: Option<&FilterValue>,
        show_target_players: bool,
    ) -> String {
        let mut out = String::new();
        let header_params = TemplateParams::new()
            .with("PageNumber", TemplateValue::Int(snapshot.page_index + 1))
            .with("MaxPageNumber", TemplateValue::Int(snapshot.max_page_index + 1));
        out.push_str(&render(&self.list_header_format, &header_params));
        out.push('\n');

        let shown = snapshot
            .list
            .len()
            .min(usize::try_from(snapshot.count.min(self.page_max_size)).unwrap_or(0));
        for (i, server) in snapshot.list.iter().take(shown).enumerate() {
            let params = TemplateParams::new()
                .with("ItemNumber", TemplateValue::Int(i64::try_from(i).unwrap_or(0) + 1))
                .with("ServerName", TemplateValue::Str(server.name.clone()))
                .with("CurrentPlayerCount", TemplateValue::Int(server.connected))
                .with("MaxPlayerCount", TemplateValue::Int(server.max_connections))
                .with("IsPassword", TemplateValue::Bool(server.is_password))
                .with("Platform", TemplateValue::Str(server.platform.clone()))
                .with("Host", TemplateValue::Str(server.host.clone()));
            out.push_str(&render(&self.list_item_format, &params));
            out.push('\n');

            if show_target_players {
                let players = server.players.as_deref().unwrap_or_default();
                let matching: Vec<&PlayerInfo> = players
                    .iter()
                    .filter(|p| target_player_filter.map_or(true, |f| f.matches(&p.name)))
                    .collect();
                out.push_str("  玩家: ");
                out.push_str(&join_players(&matching));
                out.push('\n');
            }
        }
        out.trim_end().to_string()
    }

    /// Render the brief or detailed view of one server record.
    #[must_use]
    pub fn render_server(&self, server: &ServerInfo, detailed: bool) -> String {
        let params = server_params(server);
        let mut out = String::new();
        let mut line = |template: &str| {
            out.push_str(&render(template, &params));
            out.push('\n');
        };

        line("{Name} ({CurrentPlayerCount}/{MaxPlayerCount}){IsPassword: 🔒|}");
        if detailed {
            line("地址: {IP}:{Port}");
            line("PvP: {IsPvP:是|否}");
            line("Host: {Host}");
        }
        line("模式: {Mode}/{Intent}");
        line(
            "天数信息: 第{Days:isnull:未知|{Days}}天 {Season}({DaysElapsedInSeason:isnull:未知|{DaysElapsedInSeason}}/{TotalDaysSeason:isnull:未知|{TotalDaysSeason}})",
        );
        if detailed && !server.description.trim().is_empty() {
            line("描述: {Description}");
        }

        if let Some(players) = server.players.as_deref().filter(|p| !p.is_empty()) {
            let all: Vec<&PlayerInfo> = players.iter().collect();
            out.push_str("玩家: ");
            out.push_str(&join_players(&all));
            out.push('\n');
        }
        if detailed {
            if let Some(mods) = server.mods_info.as_deref().filter(|m| !m.is_empty()) {
                out.push_str("模组: ");
                let names: Vec<&str> = mods.iter().map(|m| m.name.as_str()).collect();
                out.push_str(&names.join(PLAYER_SEPARATOR));
                out.push('\n');
            }
        }
        out.trim_end().to_string()
    }
}

fn server_params(server: &ServerInfo) -> TemplateParams {
    let days = server.days_info;
    TemplateParams::new()
        .with("Name", TemplateValue::Str(server.name.clone()))
        .with("CurrentPlayerCount", TemplateValue::Int(server.connected))
        .with("MaxPlayerCount", TemplateValue::Int(server.max_connections))
        .with("IsPassword", TemplateValue::Bool(server.is_password))
        .with("IsPvP", TemplateValue::Bool(server.is_pvp))
        .with("Mode", TemplateValue::Str(translate::to_chinese(&server.mode).to_string()))
        .with("Intent", TemplateValue::Str(translate::to_chinese(&server.intent).to_string()))
        .with("Season", TemplateValue::Str(translate::to_chinese(&server.season).to_string()))
        .with("Days", TemplateValue::from_opt(days.map(|d| d.day)))
        .with(
            "DaysElapsedInSeason",
            TemplateValue::from_opt(days.map(|d| d.days_elapsed_in_season)),
        )
        .with(
            "DaysLeftInSeason",
            TemplateValue::from_opt(days.map(|d| d.days_left_in_season)),
        )
        .with(
            "TotalDaysSeason",
            TemplateValue::from_opt(days.map(|d| d.total_days_in_season())),
        )
        .with("IP", TemplateValue::Str(server.address.clone()))
        .with("Port", TemplateValue::Int(server.port))
        .with("Host", TemplateValue::Str(server.host.clone()))
        .with("Description", TemplateValue::Str(server.description.clone()))
}

/// `Name(角色)` pairs joined with a comma separator. An empty prefab
/// shows as 未选择.
fn join_players(players: &[&PlayerInfo]) -> String {
    players
        .iter()
        .map(|p| {
            let prefab = if p.prefab.trim().is_empty() {
                "未选择"
            } else {
                translate::to_chinese(&p.prefab)
            };
            format!("{}({prefab})", p.name)
        })
        .collect::<Vec<_>>()
        .join(PLAYER_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lobby::DayInfo;

    fn params() -> TemplateParams {
        TemplateParams::new()
            .with("Name", TemplateValue::Str("srv".to_string()))
            .with("Count", TemplateValue::Int(3))
            .with("Locked", TemplateValue::Bool(true))
            .with("Open", TemplateValue::Bool(false))
            .with("Missing", TemplateValue::Null)
    }

    #[test]
    fn plain_substitution_is_case_insensitive() {
        assert_eq!(render("{name}: {COUNT}", &params()), "srv: 3");
    }

    #[test]
    fn unresolvable_placeholder_renders_empty() {
        assert_eq!(render("[{Nope}]", &params()), "[]");
    }

    #[test]
    fn boolean_conditional_picks_branch() {
        assert_eq!(render("{Locked:yes|no}", &params()), "yes");
        assert_eq!(render("{Open:yes|no}", &params()), "no");
        // Non-boolean value cannot pick a branch.
        assert_eq!(render("{Count:yes|no}", &params()), "");
    }

    #[test]
    fn isnull_falls_back_and_nests() {
        assert_eq!(render("{Missing:isnull:未知|{Missing}}", &params()), "未知");
        assert_eq!(render("{Count:isnull:未知|{Count}}", &params()), "3");
    }

    #[test]
    fn doubled_braces_escape_literals() {
        assert_eq!(render("{{Name}} = {Name}", &params()), "{Name} = srv");
    }

    fn server(players: Option<Vec<PlayerInfo>>) -> ServerInfo {
        ServerInfo {
            name: "World".to_string(),
            row_id: "r1".to_string(),
            address: "1.2.3.4".to_string(),
            port: 11000,
            connected: 2,
            max_connections: 6,
            host: "KU_host1".to_string(),
            intent: "survival".to_string(),
            mode: "endless".to_string(),
            season: "winter".to_string(),
            is_pvp: true,
            is_password: true,
            days_info: Some(DayInfo {
                day: 42,
                days_elapsed_in_season: 3,
                days_left_in_season: 12,
            }),
            players,
            ..ServerInfo::default()
        }
    }

    #[test]
    fn brief_view_omits_address_and_host() {
        let formatter = Formatter::new(&QueryConfig::default());
        let text = formatter.render_server(&server(None), false);
        assert!(text.starts_with("World (2/6) 🔒"));
        assert!(text.contains("模式: 无尽/生存"));
        assert!(text.contains("天数信息: 第42天 冬(3/15)"));
        assert!(!text.contains("地址"));
        assert!(!text.contains("PvP"));
    }

    #[test]
    fn detailed_view_includes_address_pvp_host() {
        let formatter = Formatter::new(&QueryConfig::default());
        let text = formatter.render_server(&server(None), true);
        assert!(text.contains("地址: 1.2.3.4:11000"));
        assert!(text.contains("PvP: 是"));
        assert!(text.contains("Host: KU_host1"));
    }

    #[test]
    fn missing_day_info_renders_unknown() {
        let formatter = Formatter::new(&QueryConfig::default());
        let mut s = server(None);
        s.days_info = None;
        let text = formatter.render_server(&s, false);
        assert!(text.contains("第未知天"));
    }

    #[test]
    fn player_line_translates_prefabs() {
        let formatter = Formatter::new(&QueryConfig::default());
        let players = vec![
            PlayerInfo {
                name: "alice".to_string(),
                prefab: "wendy".to_string(),
                ..PlayerInfo::default()
            },
            PlayerInfo {
                name: "bob".to_string(),
                prefab: String::new(),
                ..PlayerInfo::default()
            },
        ];
        let text = formatter.render_server(&server(Some(players)), false);
        assert!(text.contains("玩家: alice(温蒂), bob(未选择)"));
    }

    fn snapshot() -> ListResponse {
        ListResponse {
            count: 2,
            total_count: 2,
            max_page_index: 0,
            page_index: 0,
            list: vec![
                server(Some(vec![PlayerInfo {
                    name: "alice".to_string(),
                    prefab: "wendy".to_string(),
                    ..PlayerInfo::default()
                }])),
                server(None),
            ],
        }
    }

    #[test]
    fn list_view_uses_configured_item_format() {
        let config = QueryConfig {
            list_item_format: "{ItemNumber}) {ServerName}{IsPassword: 🔒|}".to_string(),
            ..QueryConfig::default()
        };
        let formatter = Formatter::new(&config);
        let text = formatter.render_list(&snapshot(), None, false);
        assert!(text.starts_with("当前是第1页 一共1页"));
        assert!(text.contains("1) World 🔒"));
        assert!(text.contains("2) World 🔒"));
    }

    #[test]
    fn list_view_filters_target_players() {
        let formatter = Formatter::new(&QueryConfig::default());
        let filter = FilterValue::plain("ali");
        let text = formatter.render_list(&snapshot(), Some(&filter), true);
        assert!(text.contains("  玩家: alice(温蒂)"));
    }

    #[test]
    fn list_view_caps_items_at_page_size() {
        let config = QueryConfig {
            page_max_size: 1,
            ..QueryConfig::default()
        };
        let formatter = Formatter::new(&config);
        let text = formatter.render_list(&snapshot(), None, false);
        assert_eq!(text.lines().count(), 2); // header + one item
    }
}
