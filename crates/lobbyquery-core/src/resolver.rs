//! Detail resolver: fetch one enriched record with bounded retry.
//!
//! The only component with built-in retry. One failure triggers a
//! single retry; a second failure falls back to the summary record the
//! list already returned, so a flaky details endpoint degrades the
//! reply instead of erroring it.

use crate::api::LobbyApi;
use crate::lobby::ServerInfo;

/// Resolve the detailed record for a selected list item.
pub async fn resolve_details<A: LobbyApi + ?Sized>(api: &A, summary: &ServerInfo) -> ServerInfo {
    match api.details(&summary.row_id).await {
        Ok(details) => details,
        Err(first) => {
            tracing::warn!(row_id = %summary.row_id, "details fetch failed, retrying: {first}");
            match api.details(&summary.row_id).await {
                Ok(details) => details,
                Err(second) => {
                    tracing::warn!(
                        row_id = %summary.row_id,
                        "details retry failed, using summary: {second}"
                    );
                    summary.clone()
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::lobby::ListResponse;
    use crate::query::ListQuery;
    use crate::{Error, Result};

    struct FlakyApi {
        calls: AtomicUsize,
        succeed_on: usize,
    }

    #[async_trait]
    impl LobbyApi for FlakyApi {
        async fn list(&self, _query: &ListQuery) -> Result<ListResponse> {
            Err(Error::Api("not under test".to_string()))
        }

        async fn details(&self, row_id: &str) -> Result<ServerInfo> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call >= self.succeed_on {
                Ok(ServerInfo {
                    row_id: row_id.to_string(),
                    name: "detailed".to_string(),
                    ..ServerInfo::default()
                })
            } else {
                Err(Error::Api(format!("failure #{call}")))
            }
        }

        async fn version(&self) -> Option<i64> {
            None
        }
    }

    fn summary() -> ServerInfo {
        ServerInfo {
            row_id: "r1".to_string(),
            name: "summary".to_string(),
            ..ServerInfo::default()
        }
    }

    #[tokio::test]
    async fn first_success_needs_one_call() {
        let api = FlakyApi {
            calls: AtomicUsize::new(0),
            succeed_on: 1,
        };
        let resolved = resolve_details(&api, &summary()).await;
        assert_eq!(resolved.name, "detailed");
        assert_eq!(api.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn one_failure_triggers_one_retry() {
        let api = FlakyApi {
            calls: AtomicUsize::new(0),
            succeed_on: 2,
        };
        let resolved = resolve_details(&api, &summary()).await;
        assert_eq!(resolved.name, "detailed");
        assert_eq!(api.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn double_failure_falls_back_to_summary() {
        let api = FlakyApi {
            calls: AtomicUsize::new(0),
            succeed_on: 99,
        };
        let resolved = resolve_details(&api, &summary()).await;
        assert_eq!(resolved.name, "summary");
        // Exactly two attempts, never more.
        assert_eq!(api.calls.load(Ordering::SeqCst), 2);
    }
}
