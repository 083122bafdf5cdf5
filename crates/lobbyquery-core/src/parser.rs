//! Filter parser: turns the trailing lines of a multi-line command
//! into query specification fields.
//!
//! Each non-blank line is matched independently against a fixed,
//! ordered set of field patterns; the first pattern that matches wins
//! for that line and unmatched lines are silently ignored. Matching a
//! field again on a later line overwrites the earlier value.

use std::sync::OnceLock;

use regex::Regex;

use crate::filter::FilterList;
use crate::query::ListQuery;
use crate::translate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Host,
    Ip,
    Days,
    Pvp,
    Port,
    Platform,
    Password,
    Season,
    RegexToggle,
    ExactToggle,
}

/// Ordered field patterns. Order matters: the first match wins per
/// line, mirroring the router's first-match-wins policy.
const RAW_PATTERNS: &[(Field, &str)] = &[
    (Field::Host, r"(?i)^Host(:?\s*|\s+)(?<Host>[a-z_\d]{3,})$"),
    (Field::Ip, r"(?i)^IP(:?\s*|\s+)(?<IP>[<>=*\d.]{3,})$"),
    (Field::Days, r"(?i)^(days?|天数?)(:?\s*|\s+)(?<Days>([<>=]{1,2})?\d+%?)$"),
    (Field::Pvp, r"(?i)^PvP((:?\s*|\s+)(?<PvP>.*))?$"),
    (Field::Port, r"(?i)^Port(:?\s*|\s+)(?<Port>([<>=]{1,2})?\d+)$"),
    (
        Field::Platform,
        r"(?i)^((平台|Platform)(:?\s*|\s+)(?<Platform>.*)|(?<PlatformBare>(Steam|WeGame|PlayStation|Xbox|Switch|QQGame|PS4Official|\|)+))$",
    ),
    (
        Field::Password,
        r"(?i)^(((Is)?Password|Lock|密码)((:?\s*|\s+)(?<IsPassword>.*))?|(?<PasswordBare>Unlock|NoPassword|Passwd))$",
    ),
    (Field::Season, r"(?i)^(Season|季节)(:?\s*|\s+)(?<Season>.*)$"),
    (Field::RegexToggle, r"(?i)^(正则|regex)$"),
    (Field::ExactToggle, r"(?i)^(精确|exact)$"),
];

static PATTERNS: OnceLock<Vec<(Field, Regex)>> = OnceLock::new();

// A broken entry in the static table must fail loudly, not drop a
// filter field; `all_field_patterns_compile` exercises every entry.
#[allow(clippy::expect_used)]
fn patterns() -> &'static [(Field, Regex)] {
    PATTERNS.get_or_init(|| {
        RAW_PATTERNS
            .iter()
            .map(|&(field, raw)| (field, Regex::new(raw).expect(raw)))
            .collect()
    })
}

/// Apply filter lines to the active query specification.
///
/// `lines` is the input after the first (command) line.
pub fn apply_filter_lines<'a>(query: &mut ListQuery, lines: impl IntoIterator<Item = &'a str>) {
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        for (field, re) in patterns() {
            if let Some(caps) = re.captures(line) {
                apply_field(query, *field, &caps);
                break;
            }
        }
    }
}

fn apply_field(query: &mut ListQuery, field: Field, caps: &regex::Captures<'_>) {
    let group = |name: &str| caps.name(name).map(|m| m.as_str().trim().to_string());
    match field {
        Field::Host => query.host = group("Host"),
        Field::Ip => query.ip = group("IP"),
        Field::Days => query.days = group("Days"),
        Field::Port => query.port = group("Port"),
        Field::Pvp => {
            // Bare `PvP` (no value captured) asserts the flag.
            let token = group("PvP").unwrap_or_default();
            if token.is_empty() {
                query.is_pvp = Some(true);
            } else if let Some(value) = parse_pvp(&token) {
                query.is_pvp = Some(value);
            }
        }
        Field::Password => {
            if let Some(token) = group("PasswordBare") {
                if let Some(value) = parse_password(&token) {
                    query.is_password = Some(value);
                }
            } else {
                // Bare `Password`/`Lock`/`密码` asserts the flag.
                let token = group("IsPassword").unwrap_or_default();
                if token.is_empty() {
                    query.is_password = Some(true);
                } else if let Some(value) = parse_password(&token) {
                    query.is_password = Some(value);
                }
            }
        }
        Field::Platform => {
            if let Some(text) = group("Platform").or_else(|| group("PlatformBare")) {
                if !text.is_empty() {
                    query.platform = Some(FilterList::from_alternatives(&text));
                }
            }
        }
        Field::Season => {
            if let Some(text) = group("Season") {
                let seasons: Vec<String> = text
                    .split('|')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(|s| translate::to_english(s).to_string())
                    .collect();
                query.season = Some(FilterList {
                    values: seasons,
                    is_exclude: false,
                });
            }
        }
        Field::RegexToggle => {
            if let Some(filter) = query.active_name_filter() {
                filter.make_regex();
            }
        }
        Field::ExactToggle => {
            if let Some(filter) = query.active_name_filter() {
                filter.make_exact();
            }
        }
    }
}

/// Bilingual affirmative/negative vocabulary for the PvP field.
/// Unrecognized tokens return `None` and leave the field untouched.
fn parse_pvp(token: &str) -> Option<bool> {
    match token {
        "是" => Some(true),
        "否" => Some(false),
        _ if token.eq_ignore_ascii_case("pvp") => Some(true),
        _ if token.eq_ignore_ascii_case("true") => Some(true),
        _ if token.eq_ignore_ascii_case("false") => Some(false),
        _ if token.eq_ignore_ascii_case("yes") => Some(true),
        _ if token.eq_ignore_ascii_case("no") => Some(false),
        _ => None,
    }
}

/// The password field accepts a wider vocabulary than PvP.
fn parse_password(token: &str) -> Option<bool> {
    match token {
        "是" => Some(true),
        "否" => Some(false),
        _ if token.eq_ignore_ascii_case("true") => Some(true),
        _ if token.eq_ignore_ascii_case("false") => Some(false),
        _ if token.eq_ignore_ascii_case("yes") => Some(true),
        _ if token.eq_ignore_ascii_case("no") => Some(false),
        _ if token.eq_ignore_ascii_case("lock") => Some(true),
        _ if token.eq_ignore_ascii_case("unlock") => Some(false),
        _ if token.eq_ignore_ascii_case("password") => Some(true),
        _ if token.eq_ignore_ascii_case("nopassword") => Some(false),
        _ if token.eq_ignore_ascii_case("passwd") => Some(true),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterValue;

    #[test]
    fn all_field_patterns_compile() {
        assert_eq!(patterns().len(), RAW_PATTERNS.len());
    }

    #[test]
    fn host_ip_days_port_capture_expressions() {
        let mut q = ListQuery::for_servers("x");
        apply_filter_lines(
            &mut q,
            ["Host KU_abc12", "IP 192.168.*.*", "day >=20", "Port >10000"],
        );
        assert_eq!(q.host.as_deref(), Some("KU_abc12"));
        assert_eq!(q.ip.as_deref(), Some("192.168.*.*"));
        assert_eq!(q.days.as_deref(), Some(">=20"));
        assert_eq!(q.port.as_deref(), Some(">10000"));
    }

    #[test]
    fn bare_pvp_line_sets_true() {
        let mut q = ListQuery::for_servers("x");
        apply_filter_lines(&mut q, ["PvP"]);
        assert_eq!(q.is_pvp, Some(true));
    }

    #[test]
    fn bare_password_tokens_carry_their_polarity() {
        for (line, expected) in [
            ("Lock", true),
            ("Password", true),
            ("Passwd", true),
            ("Unlock", false),
            ("NoPassword", false),
        ] {
            let mut q = ListQuery::for_servers("x");
            apply_filter_lines(&mut q, [line]);
            assert_eq!(q.is_password, Some(expected), "line {line:?}");
        }
    }

    #[test]
    fn bilingual_boolean_vocabulary() {
        let mut q = ListQuery::for_servers("x");
        apply_filter_lines(&mut q, ["PvP 否", "密码 是"]);
        assert_eq!(q.is_pvp, Some(false));
        assert_eq!(q.is_password, Some(true));
    }

    #[test]
    fn unrecognized_boolean_token_leaves_field_untouched() {
        let mut q = ListQuery::for_servers("x");
        q.is_pvp = Some(true);
        apply_filter_lines(&mut q, ["PvP maybe"]);
        assert_eq!(q.is_pvp, Some(true));
    }

    #[test]
    fn later_lines_overwrite_earlier_ones() {
        let mut q = ListQuery::for_servers("x");
        apply_filter_lines(&mut q, ["IP 10.0.0.1", "IP 10.0.0.2"]);
        assert_eq!(q.ip.as_deref(), Some("10.0.0.2"));
    }

    #[test]
    fn unmatched_lines_are_ignored() {
        let mut q = ListQuery::for_servers("x");
        let before = q.clone();
        apply_filter_lines(&mut q, ["this matches nothing", ""]);
        assert_eq!(q, before);
    }

    #[test]
    fn platform_accepts_bare_alternatives() {
        let mut q = ListQuery::for_servers("x");
        apply_filter_lines(&mut q, ["Steam|WeGame"]);
        let platform = q.platform.expect("platform set");
        assert_eq!(platform.values, vec!["Steam", "WeGame"]);
    }

    #[test]
    fn season_is_translated_to_english() {
        let mut q = ListQuery::for_servers("x");
        apply_filter_lines(&mut q, ["季节 冬天|春"]);
        let season = q.season.expect("season set");
        assert_eq!(season.values, vec!["winter", "spring"]);
    }

    #[test]
    fn regex_toggle_targets_active_search_filter() {
        let mut q = ListQuery::for_players("ab.*c");
        apply_filter_lines(&mut q, ["regex"]);
        assert_eq!(q.player_name, Some(FilterValue::regex("ab.*c")));
    }

    #[test]
    fn exact_then_regex_toggle_is_idempotent() {
        let mut q = ListQuery::for_servers("a.b");
        apply_filter_lines(&mut q, ["精确"]);
        let anchored = q.server_name.clone().expect("set");
        assert_eq!(anchored.value, r"^a\.b$");

        // Toggling again changes nothing: the value is no longer plain.
        apply_filter_lines(&mut q, ["exact", "regex"]);
        assert_eq!(q.server_name, Some(anchored));
    }

    #[test]
    fn combined_search_with_ip_and_pvp_lines() {
        let mut q = ListQuery::for_servers("Hello");
        apply_filter_lines(&mut q, ["IP 192.168.*.*", "PvP"]);
        assert_eq!(q.server_name, Some(FilterValue::plain("Hello")));
        assert_eq!(q.ip.as_deref(), Some("192.168.*.*"));
        assert_eq!(q.is_pvp, Some(true));
    }
}
