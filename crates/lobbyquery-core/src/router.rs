//! Command router: classifies the first line of input.
//!
//! Matching order is significant and fixed — first match wins:
//! search-servers, search-player, previous-page, next-page, show-brief,
//! show-detailed, switch-page. The three selection/paging commands only
//! match while a result snapshot exists; without one they fall through
//! to `Unrecognized`. Every pattern comes from configuration and an
//! empty pattern disables its command permanently.

use regex::Regex;

use crate::config::{enabled_pattern, QueryConfig};
use crate::{Error, Result};

/// Action recognized from one line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start a server-name search
    SearchServers(String),
    /// Start a player-name search
    SearchPlayer(String),
    /// Go to the previous page
    PreviousPage,
    /// Go to the next page
    NextPage,
    /// Show brief info for a 1-based list number
    ShowBrief(i64),
    /// Show detailed info for a 1-based list number
    ShowDetailed(i64),
    /// Switch to a 1-based page number
    SwitchPage(i64),
    /// A numeric capture matched but did not parse as an integer.
    /// Distinct from `Unrecognized` so the invalid-input policy
    /// applies instead of silent fallthrough.
    InvalidNumber,
    /// No pattern matched
    Unrecognized,
}

/// Ordered set of compiled command patterns.
#[derive(Debug)]
pub struct CommandRouter {
    search_servers: Option<Regex>,
    search_player: Option<Regex>,
    previous_page: Option<Regex>,
    next_page: Option<Regex>,
    show_brief: Option<Regex>,
    show_detailed: Option<Regex>,
    switch_page: Option<Regex>,
}

fn compile(pattern: &str, name: &'static str) -> Result<Option<Regex>> {
    enabled_pattern(pattern)
        .map(|p| Regex::new(p).map_err(|source| Error::Pattern { name, source }))
        .transpose()
}

impl CommandRouter {
    /// Compile all enabled patterns from configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::Pattern` for the first pattern that is not a
    /// valid regex.
    pub fn from_config(config: &QueryConfig) -> Result<Self> {
        Ok(Self {
            search_servers: compile(&config.search_servers_pattern, "search_servers")?,
            search_player: compile(&config.search_player_pattern, "search_player")?,
            previous_page: compile(&config.previous_page_pattern, "previous_page")?,
            next_page: compile(&config.next_page_pattern, "next_page")?,
            show_brief: compile(&config.show_brief_pattern, "show_brief")?,
            show_detailed: compile(&config.show_detailed_pattern, "show_detailed")?,
            switch_page: compile(&config.switch_page_pattern, "switch_page")?,
        })
    }

    /// Classify one line of input.
    ///
    /// `has_snapshot` gates the selection and page-switch commands,
    /// which are meaningless before a first list fetch.
    #[must_use]
    pub fn route(&self, first_line: &str, has_snapshot: bool) -> Command {
        if let Some(caps) = self.search_servers.as_ref().and_then(|re| re.captures(first_line)) {
            return Command::SearchServers(capture_text(&caps));
        }
        if let Some(caps) = self.search_player.as_ref().and_then(|re| re.captures(first_line)) {
            return Command::SearchPlayer(capture_text(&caps));
        }
        if self.previous_page.as_ref().is_some_and(|re| re.is_match(first_line)) {
            return Command::PreviousPage;
        }
        if self.next_page.as_ref().is_some_and(|re| re.is_match(first_line)) {
            return Command::NextPage;
        }
        if has_snapshot {
            if let Some((re, caps)) = captures(self.show_brief.as_ref(), first_line) {
                return capture_number(re, &caps, "Number")
                    .map_or(Command::InvalidNumber, Command::ShowBrief);
            }
            if let Some((re, caps)) = captures(self.show_detailed.as_ref(), first_line) {
                return capture_number(re, &caps, "Number")
                    .map_or(Command::InvalidNumber, Command::ShowDetailed);
            }
            if let Some((re, caps)) = captures(self.switch_page.as_ref(), first_line) {
                return capture_number(re, &caps, "Page")
                    .map_or(Command::InvalidNumber, Command::SwitchPage);
            }
        }
        Command::Unrecognized
    }
}

fn captures<'r, 't>(
    re: Option<&'r Regex>,
    line: &'t str,
) -> Option<(&'r Regex, regex::Captures<'t>)> {
    let re = re?;
    re.captures(line).map(|caps| (re, caps))
}

fn capture_text(caps: &regex::Captures<'_>) -> String {
    caps.name("Text").map(|m| m.as_str().trim().to_string()).unwrap_or_default()
}

/// Parse the numeric capture from the first participating group whose
/// name starts with `group`. Alternation branches carry distinct names
/// (`Number1`/`Number2`) since a group name cannot repeat within one
/// pattern. Absurdly long digit strings overflow `i64` and report as
/// `None`, which routes to `InvalidNumber`.
fn capture_number(re: &Regex, caps: &regex::Captures<'_>, group: &str) -> Option<i64> {
    re.capture_names()
        .flatten()
        .filter(|name| name.starts_with(group))
        .find_map(|name| caps.name(name))?
        .as_str()
        .parse::<i64>()
        .ok()
}
