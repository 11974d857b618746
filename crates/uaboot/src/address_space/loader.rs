// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Bulk address-space loader with deferred retry.
//!
//! Entries are staged in the order they are added. One insert pass hands
//! each run of consecutive nodes (or references) to the sink in a single
//! call; anything the sink rejects goes to the pending set instead of
//! aborting the pass. The pending set is then retried according to the
//! [`RetryPolicy`]: once by default, or until it stops shrinking.
//!
//! ```text
//! Collecting -> Inserting -> Retrying -> Done
//!                                     \-> Failed (every leftover entry reported)
//! ```

use super::{AddNodesItem, AddReferencesItem, InsertFailure, NodeSink};
use crate::config::RetryPolicy;
use crate::error::LoadError;
use crate::types::NodeId;
use std::collections::BTreeSet;
use std::fmt;

/// One staged insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkEntry {
    Node(AddNodesItem),
    Reference(AddReferencesItem),
}

impl BulkEntry {
    fn is_node(&self) -> bool {
        matches!(self, Self::Node(_))
    }
}

/// Loader state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Collecting,
    Inserting,
    Retrying,
    Done,
    Failed,
}

/// A node still missing after the last pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedNode {
    pub node_id: NodeId,
    pub browse_name: String,
    pub reason: InsertFailure,
}

/// A reference still missing after the last pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedReference {
    pub reference: AddReferencesItem,
    pub reason: InsertFailure,
}

/// Everything the loader could not insert, in staging order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UnresolvedEntries {
    pub nodes: Vec<UnresolvedNode>,
    pub references: Vec<UnresolvedReference>,
}

impl UnresolvedEntries {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.references.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len() + self.references.len()
    }

    /// Ids of the nodes that were never inserted.
    pub fn node_ids(&self) -> Vec<&NodeId> {
        self.nodes.iter().map(|n| &n.node_id).collect()
    }

    /// Absent nodes the leftover entries were waiting for.
    pub fn missing_dependencies(&self) -> BTreeSet<NodeId> {
        self.nodes
            .iter()
            .map(|n| &n.reason)
            .chain(self.references.iter().map(|r| &r.reason))
            .filter_map(InsertFailure::missing_dependency)
            .cloned()
            .collect()
    }

    fn from_pending(pending: Vec<(BulkEntry, InsertFailure)>) -> Self {
        let mut out = Self::default();
        for (entry, reason) in pending {
            match entry {
                BulkEntry::Node(item) => out.nodes.push(UnresolvedNode {
                    node_id: item.requested_new_node_id,
                    browse_name: item.browse_name,
                    reason,
                }),
                BulkEntry::Reference(reference) => out
                    .references
                    .push(UnresolvedReference { reference, reason }),
            }
        }
        out
    }
}

impl fmt::Display for UnresolvedEntries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} node(s), {} reference(s) unresolved",
            self.nodes.len(),
            self.references.len()
        )?;
        for node in &self.nodes {
            write!(f, "; node {} '{}' ({})", node.node_id, node.browse_name, node.reason)?;
        }
        for r in &self.references {
            write!(f, "; reference {} ({})", r.reference, r.reason)?;
        }
        Ok(())
    }
}

/// Outcome of a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadReport {
    pub nodes_added: usize,
    pub references_added: usize,
    /// Entries rejected by the first pass and inserted later.
    pub deferred: usize,
    /// Insert pass plus retry passes actually run.
    pub passes: u32,
}

/// Stages and inserts a node/reference batch.
pub struct BulkLoader<'a, S: NodeSink> {
    sink: &'a S,
    policy: RetryPolicy,
    state: LoadState,
    entries: Vec<BulkEntry>,
}

impl<'a, S: NodeSink> BulkLoader<'a, S> {
    pub fn new(sink: &'a S, policy: RetryPolicy) -> Self {
        Self {
            sink,
            policy,
            state: LoadState::Collecting,
            entries: Vec::new(),
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn staged(&self) -> usize {
        self.entries.len()
    }

    pub fn add_node(&mut self, item: AddNodesItem) -> &mut Self {
        self.stage(BulkEntry::Node(item))
    }

    pub fn add_nodes(&mut self, items: impl IntoIterator<Item = AddNodesItem>) -> &mut Self {
        for item in items {
            self.stage(BulkEntry::Node(item));
        }
        self
    }

    pub fn add_reference(&mut self, item: AddReferencesItem) -> &mut Self {
        self.stage(BulkEntry::Reference(item))
    }

    pub fn add_references(
        &mut self,
        items: impl IntoIterator<Item = AddReferencesItem>,
    ) -> &mut Self {
        for item in items {
            self.stage(BulkEntry::Reference(item));
        }
        self
    }

    fn stage(&mut self, entry: BulkEntry) -> &mut Self {
        self.state = LoadState::Collecting;
        self.entries.push(entry);
        self
    }

    /// Insert everything staged.
    ///
    /// # Errors
    ///
    /// [`LoadError::AddressSpaceIncomplete`] if any entry is still pending
    /// after the last retry pass; it lists every one of them.
    pub async fn run(&mut self) -> Result<LoadReport, LoadError> {
        let entries = std::mem::take(&mut self.entries);
        let total_nodes = entries.iter().filter(|e| e.is_node()).count();
        let total_refs = entries.len() - total_nodes;

        self.state = LoadState::Inserting;
        log::info!(
            "[BulkLoader] inserting {} node(s), {} reference(s)",
            total_nodes,
            total_refs
        );
        let mut pending = self.pass(entries).await;
        let deferred = pending.len();
        let mut passes = 1;

        let max_retries = self.policy.max_retries();
        let mut retries = 0;
        while !pending.is_empty() && retries < max_retries {
            self.state = LoadState::Retrying;
            let before = pending.len();
            log::debug!(
                "[BulkLoader] retry pass {} over {} pending entr(ies)",
                retries + 1,
                before
            );
            pending = self
                .pass(pending.into_iter().map(|(entry, _)| entry).collect())
                .await;
            retries += 1;
            passes += 1;
            if pending.len() == before {
                break;
            }
        }

        if !pending.is_empty() {
            self.state = LoadState::Failed;
            let unresolved = UnresolvedEntries::from_pending(pending);
            log::error!("[BulkLoader] {}", unresolved);
            return Err(LoadError::AddressSpaceIncomplete(unresolved));
        }

        self.state = LoadState::Done;
        let report = LoadReport {
            nodes_added: total_nodes,
            references_added: total_refs,
            deferred,
            passes,
        };
        log::info!(
            "[BulkLoader] done: {} node(s), {} reference(s), {} deferred, {} pass(es)",
            report.nodes_added,
            report.references_added,
            report.deferred,
            report.passes
        );
        Ok(report)
    }

    /// One pass over `entries`, one sink call per run of same-kind entries.
    async fn pass(&self, entries: Vec<BulkEntry>) -> Vec<(BulkEntry, InsertFailure)> {
        let mut failed = Vec::new();
        let mut nodes = Vec::new();
        let mut refs = Vec::new();

        for entry in entries {
            match entry {
                BulkEntry::Node(item) => {
                    if !refs.is_empty() {
                        self.flush_references(&mut refs, &mut failed).await;
                    }
                    nodes.push(item);
                }
                BulkEntry::Reference(item) => {
                    if !nodes.is_empty() {
                        self.flush_nodes(&mut nodes, &mut failed).await;
                    }
                    refs.push(item);
                }
            }
        }
        if !nodes.is_empty() {
            self.flush_nodes(&mut nodes, &mut failed).await;
        }
        if !refs.is_empty() {
            self.flush_references(&mut refs, &mut failed).await;
        }
        failed
    }

    async fn flush_nodes(
        &self,
        nodes: &mut Vec<AddNodesItem>,
        failed: &mut Vec<(BulkEntry, InsertFailure)>,
    ) {
        for (item, reason) in self.sink.try_add_nodes(std::mem::take(nodes)).await {
            log::trace!(
                "[BulkLoader] deferred node {} ({})",
                item.requested_new_node_id,
                reason
            );
            failed.push((BulkEntry::Node(item), reason));
        }
    }

    async fn flush_references(
        &self,
        refs: &mut Vec<AddReferencesItem>,
        failed: &mut Vec<(BulkEntry, InsertFailure)>,
    ) {
        for (item, reason) in self.sink.try_add_references(std::mem::take(refs)).await {
            log::trace!("[BulkLoader] deferred reference {} ({})", item, reason);
            failed.push((BulkEntry::Reference(item), reason));
        }
    }
}

/// Insert `nodes`, then `references`, with deferred retry.
pub async fn bulk_load_address_space<S: NodeSink>(
    sink: &S,
    nodes: Vec<AddNodesItem>,
    references: Vec<AddReferencesItem>,
    policy: RetryPolicy,
) -> Result<LoadReport, LoadError> {
    let mut loader = BulkLoader::new(sink, policy);
    loader.add_nodes(nodes).add_references(references);
    loader.run().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address_space::{MemoryAddressSpace, NodeClass};
    use crate::types::ids;
    use parking_lot::Mutex;

    fn n(id: u32) -> NodeId {
        NodeId::numeric(1, id)
    }

    fn object(id: u32, name: &str) -> AddNodesItem {
        AddNodesItem::new(n(id), name, NodeClass::Object)
    }

    /// Records the size of every sink call.
    #[derive(Default)]
    struct RecordingSink {
        space: MemoryAddressSpace,
        calls: Mutex<Vec<(&'static str, usize)>>,
    }

    impl NodeSink for RecordingSink {
        async fn try_add_nodes(
            &self,
            items: Vec<AddNodesItem>,
        ) -> Vec<(AddNodesItem, InsertFailure)> {
            self.calls.lock().push(("nodes", items.len()));
            self.space.try_add_nodes(items).await
        }

        async fn try_add_references(
            &self,
            items: Vec<AddReferencesItem>,
        ) -> Vec<(AddReferencesItem, InsertFailure)> {
            self.calls.lock().push(("refs", items.len()));
            self.space.try_add_references(items).await
        }
    }

    #[tokio::test]
    async fn test_forward_reference_resolved_on_retry() {
        let space = MemoryAddressSpace::new();
        let mut loader = BulkLoader::new(&space, RetryPolicy::SinglePass);
        assert_eq!(loader.state(), LoadState::Collecting);

        loader
            .add_node(object(1, "A"))
            .add_reference(AddReferencesItem::new(n(1), ids::ORGANIZES, n(2)))
            .add_node(object(2, "B"));
        assert_eq!(loader.staged(), 3);

        let report = loader.run().await.expect("load");
        assert_eq!(loader.state(), LoadState::Done);
        assert_eq!(report.deferred, 1);
        assert_eq!(report.passes, 2);
        assert_eq!(report.nodes_added, 2);
        assert_eq!(report.references_added, 1);
        assert!(space.has_reference(&n(1), &ids::ORGANIZES, &n(2)));
    }

    #[tokio::test]
    async fn test_missing_target_fails_and_names_everything() {
        let space = MemoryAddressSpace::new();
        let mut loader = BulkLoader::new(&space, RetryPolicy::SinglePass);
        loader
            .add_node(object(1, "A"))
            .add_reference(AddReferencesItem::new(n(1), ids::ORGANIZES, n(2)))
            .add_node(object(3, "C").under(n(9), ids::ORGANIZES));

        let err = loader.run().await.unwrap_err();
        assert_eq!(loader.state(), LoadState::Failed);

        let LoadError::AddressSpaceIncomplete(unresolved) = err;
        assert_eq!(unresolved.len(), 2);
        assert_eq!(unresolved.node_ids(), vec![&n(3)]);
        assert_eq!(unresolved.references[0].reference.target_node_id, n(2));
        assert_eq!(
            unresolved.missing_dependencies().into_iter().collect::<Vec<_>>(),
            vec![n(2), n(9)]
        );
        let text = unresolved.to_string();
        assert!(text.contains("ns=1;i=3"));
        assert!(text.contains("target ns=1;i=2 missing"));
    }

    #[tokio::test]
    async fn test_consecutive_entries_share_one_call() {
        let sink = RecordingSink::default();
        let mut loader = BulkLoader::new(&sink, RetryPolicy::SinglePass);
        loader
            .add_nodes([object(1, "A"), object(2, "B")])
            .add_references([
                AddReferencesItem::new(n(1), ids::ORGANIZES, n(2)),
                AddReferencesItem::new(n(2), ids::ORGANIZES, n(1)),
            ])
            .add_node(object(3, "C"));
        loader.run().await.expect("load");

        assert_eq!(
            *sink.calls.lock(),
            vec![("nodes", 2), ("refs", 2), ("nodes", 1)]
        );
    }

    #[tokio::test]
    async fn test_single_pass_retries_exactly_once() {
        // C -> B -> A parent chain staged child-first: depth 3
        let chain = || {
            vec![
                object(3, "C").under(n(2), ids::ORGANIZES),
                object(2, "B").under(n(1), ids::ORGANIZES),
                object(1, "A"),
            ]
        };

        let sink = RecordingSink::default();
        let err = bulk_load_address_space(&sink, chain(), vec![], RetryPolicy::SinglePass)
            .await
            .unwrap_err();
        let LoadError::AddressSpaceIncomplete(unresolved) = err;
        assert_eq!(unresolved.node_ids(), vec![&n(3)]);
        assert_eq!(sink.calls.lock().len(), 2);

        let space = MemoryAddressSpace::new();
        let report = bulk_load_address_space(
            &space,
            chain(),
            vec![],
            RetryPolicy::UntilFixedPoint { max_passes: 8 },
        )
        .await
        .expect("fixed point");
        assert_eq!(report.passes, 3);
        assert!(space.contains(&n(3)));
    }

    #[tokio::test]
    async fn test_fixed_point_stops_without_progress() {
        let sink = RecordingSink::default();
        let nodes = vec![object(1, "A").under(n(50), ids::ORGANIZES)];
        let result = bulk_load_address_space(
            &sink,
            nodes,
            vec![],
            RetryPolicy::UntilFixedPoint { max_passes: 10 },
        )
        .await;
        assert!(result.is_err());
        // insert pass + one retry that made no progress
        assert_eq!(sink.calls.lock().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_batch_is_done() {
        let space = MemoryAddressSpace::new();
        let report = bulk_load_address_space(&space, vec![], vec![], RetryPolicy::SinglePass)
            .await
            .expect("load");
        assert_eq!(report, LoadReport { passes: 1, ..Default::default() });
    }
}
