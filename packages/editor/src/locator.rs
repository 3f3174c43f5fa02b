//! # Tree Locator
//!
//! Find, mutate and remove nodes by id anywhere in a document. Nodes nest in
//! two ways (ordinary stack children and per-slot children of a `columns`
//! node); every operation here reaches into both, so callers never care which
//! representation holds a node.
//!
//! Searches are depth-first, pre-order, and stop at the first match: ids are
//! unique within a document, slot ids included.

use crate::id_generator::IdGenerator;
use crate::node::{ContentNode, Layout, NodeId, Slot};
use std::collections::HashSet;

/// Container id that addresses the document root
pub const ROOT_ID: &str = "root";

/// Root id used by older canvas documents
pub const LEGACY_ROOT_ID: &str = "canvas";

pub fn is_root(id: &str) -> bool {
    id == ROOT_ID || id == LEGACY_ROOT_ID
}

/// Which child list a node sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parent<'a> {
    Root,
    Node(&'a str),
    Slot { node_id: &'a str, slot_id: &'a str },
}

impl<'a> Parent<'a> {
    /// Id that addresses this child list as an insertion target
    pub fn container_id(&self) -> &'a str {
        match self {
            Parent::Root => ROOT_ID,
            Parent::Node(id) => id,
            Parent::Slot { slot_id, .. } => slot_id,
        }
    }
}

/// Position of a node: its child list plus its index in that list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location<'a> {
    pub parent: Parent<'a>,
    pub index: usize,
}

/// Mutable pre-order walk. The visitor returns `true` to stop; the return
/// value reports whether it did.
pub fn traverse<F>(nodes: &mut [ContentNode], mut visitor: F) -> bool
where
    F: FnMut(&mut ContentNode, Location<'_>) -> bool,
{
    walk_mut(nodes, Parent::Root, &mut visitor)
}

fn walk_mut<F>(nodes: &mut [ContentNode], parent: Parent<'_>, visitor: &mut F) -> bool
where
    F: FnMut(&mut ContentNode, Location<'_>) -> bool,
{
    for (index, node) in nodes.iter_mut().enumerate() {
        if visitor(node, Location { parent, index }) {
            return true;
        }

        let ContentNode { id, layout, .. } = node;
        match layout {
            Layout::Leaf => {}
            Layout::Stack(children) => {
                if walk_mut(children, Parent::Node(id.as_str()), visitor) {
                    return true;
                }
            }
            Layout::Slots(slots) => {
                for slot in slots.iter_mut() {
                    let Slot {
                        id: slot_id,
                        children,
                    } = slot;
                    let parent = Parent::Slot {
                        node_id: id.as_str(),
                        slot_id: slot_id.as_str(),
                    };
                    if walk_mut(children, parent, visitor) {
                        return true;
                    }
                }
            }
        }
    }
    false
}

/// Immutable pre-order walk with the same stop semantics as [`traverse`]
pub fn visit<'a, F>(nodes: &'a [ContentNode], mut visitor: F) -> bool
where
    F: FnMut(&'a ContentNode, Location<'a>) -> bool,
{
    walk(nodes, Parent::Root, &mut visitor)
}

fn walk<'a, F>(nodes: &'a [ContentNode], parent: Parent<'a>, visitor: &mut F) -> bool
where
    F: FnMut(&'a ContentNode, Location<'a>) -> bool,
{
    for (index, node) in nodes.iter().enumerate() {
        if visitor(node, Location { parent, index }) {
            return true;
        }

        match &node.layout {
            Layout::Leaf => {}
            Layout::Stack(children) => {
                if walk(children, Parent::Node(&node.id), visitor) {
                    return true;
                }
            }
            Layout::Slots(slots) => {
                for slot in slots {
                    let parent = Parent::Slot {
                        node_id: &node.id,
                        slot_id: &slot.id,
                    };
                    if walk(&slot.children, parent, visitor) {
                        return true;
                    }
                }
            }
        }
    }
    false
}

pub fn find<'a>(nodes: &'a [ContentNode], id: &str) -> Option<&'a ContentNode> {
    let mut found = None;
    visit(nodes, |node, _| {
        if node.id == id {
            found = Some(node);
            true
        } else {
            false
        }
    });
    found
}

pub fn find_mut<'a>(nodes: &'a mut [ContentNode], id: &str) -> Option<&'a mut ContentNode> {
    for node in nodes.iter_mut() {
        if node.id == id {
            return Some(node);
        }
        match &mut node.layout {
            Layout::Leaf => {}
            Layout::Stack(children) => {
                if let Some(found) = find_mut(children, id) {
                    return Some(found);
                }
            }
            Layout::Slots(slots) => {
                for slot in slots.iter_mut() {
                    if let Some(found) = find_mut(&mut slot.children, id) {
                        return Some(found);
                    }
                }
            }
        }
    }
    None
}

/// Where the node with `id` sits
pub fn locate<'a>(nodes: &'a [ContentNode], id: &str) -> Option<Location<'a>> {
    let mut found = None;
    visit(nodes, |node, location| {
        if node.id == id {
            found = Some(location);
            true
        } else {
            false
        }
    });
    found
}

/// Whether `id` names a node or a slot anywhere in the document
pub fn contains(nodes: &[ContentNode], id: &str) -> bool {
    let mut hit = false;
    visit(nodes, |node, _| {
        hit = node.id == id || node.slots().iter().any(|slot| slot.id == id);
        hit
    });
    hit
}

/// Whether `id` names `node` itself or anything beneath it
pub fn subtree_contains(node: &ContentNode, id: &str) -> bool {
    contains(std::slice::from_ref(node), id)
}

/// Child list addressed by `container_id`: the root sentinel, a stack node,
/// or a slot. Leaves and slot containers themselves resolve to `None`.
pub fn container_mut<'a>(
    nodes: &'a mut Vec<ContentNode>,
    container_id: &str,
) -> Option<&'a mut Vec<ContentNode>> {
    if is_root(container_id) {
        return Some(nodes);
    }
    container_in(nodes, container_id)
}

fn container_in<'a>(nodes: &'a mut [ContentNode], id: &str) -> Option<&'a mut Vec<ContentNode>> {
    for node in nodes.iter_mut() {
        if node.id == id {
            return node.children_mut();
        }
        match &mut node.layout {
            Layout::Leaf => {}
            Layout::Stack(children) => {
                if let Some(found) = container_in(children, id) {
                    return Some(found);
                }
            }
            Layout::Slots(slots) => {
                for slot in slots.iter_mut() {
                    if slot.id == id {
                        return Some(&mut slot.children);
                    }
                    if let Some(found) = container_in(&mut slot.children, id) {
                        return Some(found);
                    }
                }
            }
        }
    }
    None
}

/// Detach the node with `id` in place and hand it back
pub fn take(nodes: &mut Vec<ContentNode>, id: &str) -> Option<ContentNode> {
    if let Some(pos) = nodes.iter().position(|node| node.id == id) {
        return Some(nodes.remove(pos));
    }
    for node in nodes.iter_mut() {
        match &mut node.layout {
            Layout::Leaf => {}
            Layout::Stack(children) => {
                if let Some(taken) = take(children, id) {
                    return Some(taken);
                }
            }
            Layout::Slots(slots) => {
                for slot in slots.iter_mut() {
                    if let Some(taken) = take(&mut slot.children, id) {
                        return Some(taken);
                    }
                }
            }
        }
    }
    None
}

/// Copy of `nodes` without the subtree rooted at `id`. The input is left
/// untouched.
pub fn remove(nodes: &[ContentNode], id: &str) -> Vec<ContentNode> {
    let mut copy = nodes.to_vec();
    take(&mut copy, id);
    copy
}

/// Deep copy of `node` with a fresh id on every node and slot
pub fn deep_clone(node: &ContentNode, ids: &mut IdGenerator) -> ContentNode {
    let mut copy = node.clone();
    rekey(&mut copy, ids);
    copy
}

fn rekey(node: &mut ContentNode, ids: &mut IdGenerator) {
    node.id = ids.new_id(node.kind.as_str());
    match &mut node.layout {
        Layout::Leaf => {}
        Layout::Stack(children) => {
            for child in children.iter_mut() {
                rekey(child, ids);
            }
        }
        Layout::Slots(slots) => {
            for slot in slots.iter_mut() {
                slot.id = ids.new_slot_id();
                for child in slot.children.iter_mut() {
                    rekey(child, ids);
                }
            }
        }
    }
}

/// Every node and slot id, in pre-order
pub fn collect_ids(nodes: &[ContentNode]) -> Vec<&str> {
    let mut out = Vec::new();
    visit(nodes, |node, _| {
        out.push(node.id.as_str());
        out.extend(node.slots().iter().map(|slot| slot.id.as_str()));
        false
    });
    out
}

/// Ids that occur more than once, sorted
pub fn duplicate_ids(nodes: &[ContentNode]) -> Vec<NodeId> {
    let mut seen = HashSet::new();
    let mut dupes: Vec<NodeId> = collect_ids(nodes)
        .into_iter()
        .filter(|id| !seen.insert(*id))
        .map(str::to_string)
        .collect();
    dupes.sort();
    dupes.dedup();
    dupes
}

/// Give a fresh id to every node or slot whose id was already seen earlier in
/// pre-order. Returns how many were re-keyed.
pub fn repair_duplicate_ids(nodes: &mut [ContentNode], ids: &mut IdGenerator) -> usize {
    let mut seen: HashSet<NodeId> = HashSet::new();
    let mut repaired = 0;
    traverse(nodes, |node, _| {
        if !seen.insert(node.id.clone()) {
            node.id = ids.new_id(node.kind.as_str());
            seen.insert(node.id.clone());
            repaired += 1;
        }
        if let Some(slots) = node.slots_mut() {
            for slot in slots.iter_mut() {
                if !seen.insert(slot.id.clone()) {
                    slot.id = ids.new_slot_id();
                    seen.insert(slot.id.clone());
                    repaired += 1;
                }
            }
        }
        false
    });
    repaired
}

/// Total number of nodes in the document
pub fn count(nodes: &[ContentNode]) -> usize {
    nodes.iter().map(ContentNode::subtree_len).sum()
}
