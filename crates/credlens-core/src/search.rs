//! # Client-Side Search
//!
//! Narrows the already-loaded credentials by a free-text query. This runs
//! strictly after pagination: it never issues a request and never changes
//! the pagination offset or `has_more`.
//!
//! A record matches when the lower-cased query is a substring of the
//! lower-cased execution id, workflow id, session id, reasoner name, or
//! agent name. The empty query is the identity.

use std::borrow::Cow;

use crate::record::CredentialRecord;

/// Filter `items` by `query`, preserving the original order.
///
/// Returns the input slice untouched (borrowed) when `query` is empty.
pub fn filter<'a>(items: &'a [CredentialRecord], query: &str) -> Cow<'a, [CredentialRecord]> {
    if query.is_empty() {
        return Cow::Borrowed(items);
    }
    let needle = query.to_lowercase();
    Cow::Owned(
        items
            .iter()
            .filter(|record| matches(record, &needle))
            .cloned()
            .collect(),
    )
}

/// Whether `record` matches an already lower-cased needle.
pub fn matches(record: &CredentialRecord, needle: &str) -> bool {
    record
        .searchable_fields()
        .any(|field| field.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    fn record(vc_id: &str, workflow_id: &str) -> CredentialRecord {
        CredentialRecord {
            vc_id: vc_id.into(),
            execution_id: format!("exec-{vc_id}"),
            workflow_id: workflow_id.into(),
            session_id: None,
            reasoner_name: None,
            agent_name: None,
            status: "succeeded".into(),
            duration_ms: None,
            verified: true,
            created_at: "2026-01-15T12:00:00Z".into(),
            issuer_did: None,
            target_did: None,
            caller_did: None,
            extra: BTreeMap::new(),
        }
    }

    #[test]
    fn empty_query_borrows_input() {
        let items = vec![record("a", "wf-1"), record("b", "wf-2")];
        let out = filter(&items, "");
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(out.as_ref(), items.as_slice());
    }

    #[test]
    fn workflow_match_keeps_exactly_one() {
        let items = vec![
            record("a", "ws-41"),
            record("b", "ws-42"),
            record("c", "ws-43"),
        ];
        let out = filter(&items, "ws-42");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].vc_id, "b");
    }

    #[test]
    fn match_is_case_insensitive() {
        let mut r = record("a", "wf-1");
        r.reasoner_name = Some("SummarizeReport".into());
        let items = vec![r];
        assert_eq!(filter(&items, "summarize").len(), 1);
        assert_eq!(filter(&items, "REPORT").len(), 1);
    }

    #[test]
    fn optional_fields_are_searched() {
        let mut with_session = record("a", "wf-1");
        with_session.session_id = Some("sess-xyz".into());
        let mut with_agent = record("b", "wf-2");
        with_agent.agent_name = Some("billing-agent".into());
        let items = vec![with_session, with_agent, record("c", "wf-3")];

        assert_eq!(filter(&items, "xyz")[0].vc_id, "a");
        assert_eq!(filter(&items, "billing")[0].vc_id, "b");
        assert_eq!(filter(&items, "exec-c")[0].vc_id, "c");
    }

    #[test]
    fn did_fields_are_not_searched() {
        let mut r = record("a", "wf-1");
        r.issuer_did = Some("did:key:zSecret".into());
        let items = vec![r];
        assert!(filter(&items, "zsecret").is_empty());
    }

    #[test]
    fn preserves_original_order() {
        let items = vec![
            record("3", "shared-wf"),
            record("1", "other"),
            record("2", "shared-wf"),
        ];
        let ids: Vec<_> = filter(&items, "shared")
            .iter()
            .map(|r| r.vc_id.clone())
            .collect();
        assert_eq!(ids, vec!["3", "2"]);
    }

    proptest! {
        #[test]
        fn result_is_ordered_subsequence(
            workflows in proptest::collection::vec("[a-c]{1,4}", 0..20),
            query in "[a-c]{0,2}",
        ) {
            let items: Vec<_> = workflows
                .iter()
                .enumerate()
                .map(|(i, wf)| record(&i.to_string(), wf))
                .collect();
            let out = filter(&items, &query);

            let mut cursor = items.iter();
            for kept in out.iter() {
                prop_assert!(cursor.any(|candidate| candidate == kept));
            }
            if query.is_empty() {
                prop_assert_eq!(out.len(), items.len());
            }
        }
    }
}
