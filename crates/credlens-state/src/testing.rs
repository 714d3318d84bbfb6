//! Test doubles for [`SearchClient`].

use std::collections::{BTreeMap, VecDeque};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use credlens_core::{CredentialRecord, CredlensError, SearchClient, SearchQuery, SearchResponse};
use parking_lot::Mutex;
use tokio::sync::oneshot;

type Reply = Result<SearchResponse, CredlensError>;

/// 2026-01-15T12:00:00Z
pub(crate) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()
}

pub(crate) fn record(n: usize) -> CredentialRecord {
    CredentialRecord {
        vc_id: format!("vc-{n}"),
        execution_id: format!("exec-{n}"),
        workflow_id: format!("wf-{}", n % 3),
        session_id: None,
        reasoner_name: Some("summarize".into()),
        agent_name: None,
        status: if n % 2 == 0 { "succeeded".into() } else { "failed".into() },
        duration_ms: Some(1500),
        verified: n % 5 != 0,
        created_at: "2026-01-15T11:00:00Z".into(),
        issuer_did: None,
        target_did: None,
        caller_did: None,
        extra: BTreeMap::new(),
    }
}

/// `n` consecutive records starting at `start`.
pub(crate) fn records(start: usize, n: usize) -> Vec<CredentialRecord> {
    (start..start + n).map(record).collect()
}

pub(crate) fn page(start: usize, n: usize, total: usize) -> SearchResponse {
    SearchResponse {
        credentials: records(start, n),
        total,
    }
}

/// Replies immediately with queued responses, recording every query.
#[derive(Default)]
pub(crate) struct ScriptedClient {
    replies: Mutex<VecDeque<Reply>>,
    queries: Mutex<Vec<SearchQuery>>,
}

impl ScriptedClient {
    pub(crate) fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn queries(&self) -> Vec<SearchQuery> {
        self.queries.lock().clone()
    }
}

#[async_trait]
impl SearchClient for ScriptedClient {
    async fn search(&self, query: &SearchQuery) -> Reply {
        self.queries.lock().push(query.clone());
        self.replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(CredlensError::network("no scripted response")))
    }
}

/// Holds every request open until the test releases it, so responses can
/// be delivered out of order.
#[derive(Default)]
pub(crate) struct GatedClient {
    pending: Mutex<Vec<Option<oneshot::Sender<Reply>>>>,
    queries: Mutex<Vec<SearchQuery>>,
}

impl GatedClient {
    pub(crate) fn queries(&self) -> Vec<SearchQuery> {
        self.queries.lock().clone()
    }

    pub(crate) fn request_count(&self) -> usize {
        self.pending.lock().len()
    }

    pub(crate) async fn wait_for_requests(&self, n: usize) {
        while self.request_count() < n {
            tokio::task::yield_now().await;
        }
    }

    /// Complete request `index` (in issue order).
    pub(crate) fn release(&self, index: usize, reply: Reply) {
        let sender = self.pending.lock()[index].take().expect("request already released");
        let _ = sender.send(reply);
    }
}

#[async_trait]
impl SearchClient for GatedClient {
    async fn search(&self, query: &SearchQuery) -> Reply {
        let (tx, rx) = oneshot::channel();
        self.queries.lock().push(query.clone());
        self.pending.lock().push(Some(tx));
        rx.await
            .unwrap_or_else(|_| Err(CredlensError::network("request abandoned")))
    }
}
