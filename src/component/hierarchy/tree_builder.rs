//! Tree assembly
//!
//! Rebuilds the nested folder/album tree from the flat node list the store
//! returns. Nothing about the tree shape is stored besides `parent_id`.

use crate::model::HierarchyNode;
use log::warn;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct HierarchyTreeBuilder;

impl HierarchyTreeBuilder {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Turn a flat node list into a forest of root nodes.
    ///
    /// Children keep the input order, so callers pass nodes sorted the way
    /// they want them displayed. A node whose parent is missing from the
    /// input becomes a root. Nodes caught in a parent cycle are not
    /// reachable from any root; each such node is promoted to a root the
    /// first time it is met, which breaks the cycle. Every input node ends up
    /// in the output exactly once.
    #[must_use]
    pub fn build(&self, nodes: Vec<HierarchyNode>) -> Vec<HierarchyNode> {
        let index_by_id: HashMap<i64, usize> = nodes
            .iter()
            .enumerate()
            .map(|(slot, node)| (node.id, slot))
            .collect();

        let mut child_slots: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
        let mut root_slots = Vec::new();

        for (slot, node) in nodes.iter().enumerate() {
            match node.parent_id {
                None => root_slots.push(slot),
                Some(parent_id) => match index_by_id.get(&parent_id) {
                    Some(&parent_slot) if parent_slot != slot => child_slots[parent_slot].push(slot),
                    Some(_) => {
                        warn!("Node {} is its own parent, treating it as a root", node.id);
                        root_slots.push(slot);
                    }
                    None => {
                        warn!(
                            "Parent {parent_id} of node {} not found, treating it as a root",
                            node.id
                        );
                        root_slots.push(slot);
                    }
                },
            }
        }

        let mut slots: Vec<Option<HierarchyNode>> = nodes.into_iter().map(Some).collect();

        let mut roots: Vec<HierarchyNode> = root_slots
            .into_iter()
            .filter_map(|slot| assemble(slot, &mut slots, &child_slots))
            .collect();

        // anything left was only reachable through a cycle
        for slot in 0..slots.len() {
            if let Some(node) = assemble(slot, &mut slots, &child_slots) {
                warn!("Node {} is part of a parent cycle, treating it as a root", node.id);
                roots.push(node);
            }
        }

        roots
    }
}

struct Frame {
    node: HierarchyNode,
    slot: usize,
    next_child: usize,
}

/// Take the node at `slot` out of `slots` and attach its descendants.
/// Already-taken slots yield `None`.
///
/// Walks the subtree with an explicit stack so nesting depth is bounded
/// by the heap, not the thread stack.
fn assemble(
    slot: usize,
    slots: &mut [Option<HierarchyNode>],
    child_slots: &[Vec<usize>],
) -> Option<HierarchyNode> {
    let mut node = slots[slot].take()?;
    node.children.clear();
    let mut stack = vec![Frame {
        node,
        slot,
        next_child: 0,
    }];

    while let Some(frame) = stack.last_mut() {
        if let Some(&child_slot) = child_slots[frame.slot].get(frame.next_child) {
            frame.next_child += 1;
            if let Some(mut child) = slots[child_slot].take() {
                child.children.clear();
                stack.push(Frame {
                    node: child,
                    slot: child_slot,
                    next_child: 0,
                });
            }
            continue;
        }

        let finished = stack.pop()?;
        match stack.last_mut() {
            Some(parent) => parent.node.children.push(finished.node),
            None => return Some(finished.node),
        }
    }

    None
}
