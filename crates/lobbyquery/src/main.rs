//! Line-oriented REPL over the query engine.
//!
//! Stands in for the chat transport: each message is typed as one or
//! more lines and a blank line sends it. The engine's outcome maps to
//! terminal output the same way a bot would map it to chat messages —
//! rendered text is printed, silent outcomes print nothing, and
//! failures become a generic message instead of leaking error details.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use lobbyquery_core::{LobbyApi, LobbyClient, Outcome, QueryConfig, QueryEngine};
use tokio::io::{AsyncBufReadExt, BufReader};

const SESSION_ID: &str = "local";
const HANDLE_TIMEOUT: Duration = Duration::from_secs(8);
const VERSION_TIMEOUT: Duration = Duration::from_secs(6);

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = QueryConfig::load_or_default(Path::new("lobbyquery.toml"))?;
    let version_pattern = compile_version_pattern(&config);
    let client = LobbyClient::new(config.api_base_url.clone());
    let engine = QueryEngine::new(client, config)?;

    run_repl(&engine, version_pattern.as_ref()).await
}

fn compile_version_pattern(config: &QueryConfig) -> Option<regex::Regex> {
    let pattern = config.get_version_pattern.trim();
    if pattern.is_empty() {
        return None;
    }
    match regex::Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!("ignoring invalid version pattern: {e}");
            None
        }
    }
}

async fn run_repl(
    engine: &QueryEngine<LobbyClient>,
    version_pattern: Option<&regex::Regex>,
) -> Result<()> {
    println!("lobbyquery — 输入命令, 空行发送");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending: Vec<String> = Vec::new();

    while let Some(line) = lines.next_line().await? {
        if !line.trim().is_empty() {
            pending.push(line);
            continue;
        }
        if pending.is_empty() {
            continue;
        }
        let message = pending.join("\n");
        pending.clear();
        dispatch(engine, version_pattern, &message).await;
    }
    if !pending.is_empty() {
        dispatch(engine, version_pattern, &pending.join("\n")).await;
    }
    Ok(())
}

async fn dispatch(
    engine: &QueryEngine<LobbyClient>,
    version_pattern: Option<&regex::Regex>,
    message: &str,
) {
    let first_line = message.lines().next().unwrap_or("").trim();
    if version_pattern.is_some_and(|re| re.is_match(first_line)) {
        match tokio::time::timeout(VERSION_TIMEOUT, engine.api().version()).await {
            Ok(Some(version)) if version > 0 => println!("饥荒最新版本是 {version}"),
            _ => println!("获取饥荒最新版本失败"),
        }
        return;
    }

    match tokio::time::timeout(HANDLE_TIMEOUT, engine.handle(SESSION_ID, message)).await {
        Ok(Ok(Outcome::Rendered(text))) => println!("{text}"),
        Ok(Ok(Outcome::Silent | Outcome::InvalidNumber)) => {}
        Ok(Err(e)) => {
            tracing::error!("query failed: {e}");
            println!("获取失败");
        }
        Err(_elapsed) => {
            tracing::warn!("query timed out");
            println!("获取失败");
        }
    }
}
