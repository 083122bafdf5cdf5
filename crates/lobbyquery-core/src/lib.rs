//! Lobbyquery core - conversational query sessions over a remote
//! game-server directory.
//!
//! This crate provides:
//! - Command routing and multi-line filter parsing
//! - Per-user session state with serialized handling
//! - Pagination and selection clamping
//! - Template-driven reply formatting
//! - A `reqwest` client for the directory API
//!
//! The chat transport lives outside this crate: it feeds raw text into
//! [`QueryEngine::handle`] and delivers the rendered reply (or
//! nothing) back to the user.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod filter;
pub mod format;
pub mod lobby;
pub mod page;
pub mod parser;
pub mod query;
pub mod resolver;
pub mod router;
pub mod session;
pub mod translate;

pub use api::{LobbyApi, LobbyClient};
pub use config::QueryConfig;
pub use engine::{Outcome, QueryEngine};
pub use error::{Error, Result};
pub use filter::{FilterList, FilterValue};
pub use format::Formatter;
pub use lobby::{DayInfo, ListResponse, ModInfo, PlayerInfo, ServerInfo};
pub use query::{ListQuery, SearchKind};
pub use router::{Command, CommandRouter};
pub use session::{Session, SessionState, SessionStore};
