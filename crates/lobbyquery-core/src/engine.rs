//! Session engine: the per-user conversational state machine.
//!
//! One `handle` call classifies the first input line, folds any
//! trailing filter lines into the active query specification, calls
//! out to the directory API, and renders the reply. Everything happens
//! under the session's lock so concurrent calls for the same user
//! serialize; different users proceed in parallel.
//!
//! The outcome is an explicit result type. The transport collaborator
//! maps `Err` to a generic "query failed" message and the silent
//! outcomes to no message at all — raw internal errors never reach the
//! user through this component.

use chrono::Utc;

use crate::api::LobbyApi;
use crate::config::QueryConfig;
use crate::format::Formatter;
use crate::lobby::ServerInfo;
use crate::page;
use crate::parser::apply_filter_lines;
use crate::query::{ListQuery, SearchKind};
use crate::resolver::resolve_details;
use crate::router::{Command, CommandRouter};
use crate::session::{SessionState, SessionStore};
use crate::Result;

/// What one `handle` call produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A reply to deliver to the user
    Rendered(String),
    /// Nothing to send: unrecognized input or a swallowed action
    Silent,
    /// A numeric capture failed to parse; deliberately no reply
    InvalidNumber,
}

/// The orchestrator tying router, parser, pagination, resolver, and
/// formatter together per call.
#[derive(Debug)]
pub struct QueryEngine<A> {
    api: A,
    config: QueryConfig,
    router: CommandRouter,
    formatter: Formatter,
    store: SessionStore,
}

impl<A: LobbyApi> QueryEngine<A> {
    /// Build an engine from its configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::Pattern` when a configured command pattern is
    /// not a valid regex.
    pub fn new(api: A, config: QueryConfig) -> Result<Self> {
        let router = CommandRouter::from_config(&config)?;
        let formatter = Formatter::new(&config);
        Ok(Self {
            api,
            config,
            router,
            formatter,
            store: SessionStore::new(),
        })
    }

    /// The directory API this engine talks to.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// The configuration this engine was built from.
    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Handle one raw input for one session.
    ///
    /// Callers bound the whole call with their own timeout; dropping
    /// the future abandons any in-flight remote call and releases the
    /// session lock.
    ///
    /// # Errors
    ///
    /// Remote list failures propagate so the transport can show its
    /// generic failure message. Detail fetches never error (retry +
    /// summary fallback).
    pub async fn handle(&self, session_id: &str, input: &str) -> Result<Outcome> {
        let session = self.store.get_or_create(session_id).await;
        let mut state = session.lock().await;

        if state.idle_longer_than(self.config.timeout_secs) {
            tracing::debug!(session_id, "session idle past timeout, resetting");
            state.reset();
        }
        state.last_trigger = Utc::now();

        let mut lines = input.lines();
        let first_line = lines.next().unwrap_or("").trim();
        let filter_lines: Vec<&str> = lines.collect();

        let command = self.router.route(first_line, state.snapshot.is_some());
        tracing::debug!(session_id, ?command, "routed input");

        match command {
            Command::Unrecognized => {
                if self.config.reset_on_invalid || state.query.is_none() {
                    state.reset();
                }
                Ok(Outcome::Silent)
            }
            Command::InvalidNumber => {
                if self.config.reset_on_invalid {
                    state.reset();
                }
                Ok(Outcome::InvalidNumber)
            }
            Command::SearchServers(text) => {
                tracing::info!(session_id, %text, "server search");
                state.query = Some(ListQuery::for_servers(&text));
                state.show_target_players = false;
                state.page_index = 0;
                apply_filter_lines_if_any(&mut state, &filter_lines);
                self.run_list_query(&mut state).await
            }
            Command::SearchPlayer(text) => {
                tracing::info!(session_id, %text, "player search");
                state.query = Some(ListQuery::for_players(&text));
                state.show_target_players = true;
                state.page_index = 0;
                apply_filter_lines_if_any(&mut state, &filter_lines);
                self.run_list_query(&mut state).await
            }
            Command::PreviousPage => {
                if state.query.is_none() {
                    return Ok(Outcome::Silent);
                }
                state.page_index = page::previous(state.page_index);
                apply_filter_lines_if_any(&mut state, &filter_lines);
                self.run_list_query(&mut state).await
            }
            Command::NextPage => {
                let Some(max) = state.snapshot.as_ref().map(|s| s.max_page_index) else {
                    return Ok(Outcome::Silent);
                };
                if state.query.is_none() {
                    return Ok(Outcome::Silent);
                }
                state.page_index = page::next(state.page_index, max);
                apply_filter_lines_if_any(&mut state, &filter_lines);
                self.run_list_query(&mut state).await
            }
            Command::SwitchPage(number) => {
                let Some(max) = state.snapshot.as_ref().map(|s| s.max_page_index) else {
                    return Ok(Outcome::Silent);
                };
                state.page_index = page::switch_to(number, max);
                apply_filter_lines_if_any(&mut state, &filter_lines);
                self.run_list_query(&mut state).await
            }
            Command::ShowBrief(number) => self.show_selected(&mut state, number, false).await,
            Command::ShowDetailed(number) => self.show_selected(&mut state, number, true).await,
        }
    }

    /// Fetch a list page for the active specification and render it.
    async fn run_list_query(&self, state: &mut SessionState) -> Result<Outcome> {
        let page_index = state.page_index;
        let Some(active) = state.query.as_mut() else {
            return Ok(Outcome::Silent);
        };
        active.page_index = page_index;
        active.page_count = self.config.page_max_size;
        let query = active.clone();

        let snapshot = self.api.list(&query).await?;
        let reply = if snapshot.count == 0 {
            match query.search_kind() {
                SearchKind::Players => self.config.not_found_player_text.clone(),
                SearchKind::Servers => self.config.not_found_server_text.clone(),
            }
        } else {
            self.formatter.render_list(
                &snapshot,
                query.player_name.as_ref(),
                state.show_target_players,
            )
        };
        state.snapshot = Some(snapshot);
        Ok(Outcome::Rendered(reply))
    }

    /// Resolve the selected item and render its brief/detailed view.
    async fn show_selected(
        &self,
        state: &mut SessionState,
        number: i64,
        detailed: bool,
    ) -> Result<Outcome> {
        let summary: ServerInfo = {
            let Some(snapshot) = state.snapshot.as_ref() else {
                return Ok(Outcome::Silent);
            };
            if snapshot.list.is_empty() {
                return Ok(Outcome::Silent);
            }
            let count = i64::try_from(snapshot.list.len()).unwrap_or(1);
            let index = page::clamp_selection(number, count) - 1;
            match snapshot.list.get(usize::try_from(index).unwrap_or(0)) {
                Some(item) => item.clone(),
                None => return Ok(Outcome::Silent),
            }
        };

        let details = resolve_details(&self.api, &summary).await;
        Ok(Outcome::Rendered(self.formatter.render_server(&details, detailed)))
    }
}

/// Multi-line input feeds the filter parser, provided a specification
/// is active.
fn apply_filter_lines_if_any(state: &mut SessionState, filter_lines: &[&str]) {
    if filter_lines.is_empty() {
        return;
    }
    if let Some(query) = state.query.as_mut() {
        apply_filter_lines(query, filter_lines.iter().copied());
    }
}
