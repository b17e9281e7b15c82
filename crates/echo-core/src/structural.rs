//! Structural matching.
//!
//! The second tier of pattern matching: where the literal matcher answers
//! "does this content match", the structural matcher answers "which
//! connected regions of the graph have this shape", producing variable
//! bindings.
//!
//! A pattern is a sequence of elements. A `?var` element binds to the
//! node at its position (consistently: a re-occurring variable must
//! re-match the node it already bound); any other element must be
//! compatible with that node's content (equal, or the wildcard). The walk
//! anchors at every store node, matches the first element against the
//! anchor, and advances the cursor by one element per hop through
//! `get_connected`. Every walk that consumes the whole pattern yields its
//! binding map.

use std::collections::BTreeMap;

use crate::content::{content_matches, Pattern};
use crate::error::{MemoryError, Result};
use crate::ident::NodeId;
use crate::store::HypergraphStore;

/// A mapping from pattern variable (`?x`) to the node it bound.
pub type Binding = BTreeMap<String, NodeId>;

/// Match a structural pattern against every connected region of the store.
///
/// Returns the set of binding maps produced by all successful walks, with
/// duplicates removed. Anchors are tried in creation order. An empty
/// result is not an error.
///
/// # Errors
///
/// [`MemoryError::InvalidPattern`] on an empty pattern, or when a
/// variable occurs inside a sequence element (variables bind whole nodes,
/// not list positions).
pub fn match_structural(store: &HypergraphStore, pattern: &[Pattern]) -> Result<Vec<Binding>> {
	if pattern.is_empty() {
		return Err(MemoryError::InvalidPattern(
			"structural pattern must have at least one element".to_owned(),
		));
	}
	for element in pattern {
		if !matches!(element, Pattern::Var(_)) {
			element.expect_literal()?;
		}
	}

	let mut results = Vec::new();
	for anchor in store.node_ids() {
		walk(store, pattern, 0, anchor, &Binding::new(), &mut results);
	}
	results.sort();
	results.dedup();
	Ok(results)
}

fn walk(
	store: &HypergraphStore,
	pattern: &[Pattern],
	index: usize,
	node_id: &NodeId,
	bindings: &Binding,
	out: &mut Vec<Binding>,
) {
	let mut bindings = bindings.clone();
	match &pattern[index] {
		Pattern::Var(name) => match bindings.get(name) {
			Some(bound) if bound != node_id => return,
			Some(_) => {}
			None => {
				let _ = bindings.insert(name.clone(), node_id.clone());
			}
		},
		element => {
			let Some(node) = store.get_node(node_id) else {
				return;
			};
			if !content_matches(&node.content, element) {
				return;
			}
		}
	}

	if index + 1 == pattern.len() {
		out.push(bindings);
		return;
	}
	for neighbor in store.get_connected(node_id) {
		walk(store, pattern, index + 1, neighbor, &bindings, out);
	}
}
