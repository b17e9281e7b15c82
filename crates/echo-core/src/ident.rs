//! Identifier allocation.
//!
//! Nodes and links share one lookup table but draw their ids from
//! disjoint namespaces, distinguishable by prefix: `node-<n>` and
//! `link-<n>`. The allocator hands out monotonically increasing
//! per-kind counters; counters reset only when the owning store is
//! re-initialized.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix for node identifiers.
pub const NODE_ID_PREFIX: &str = "node-";

/// Prefix for link identifiers.
pub const LINK_ID_PREFIX: &str = "link-";

/// Identifier of a node in the hypergraph.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(String);

/// Identifier of a link in the hypergraph.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LinkId(String);

impl NodeId {
	/// View the identifier as a string slice.
	#[must_use]
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Check whether a raw identifier string belongs to the node namespace.
	#[must_use]
	pub fn is_node_id(raw: &str) -> bool {
		raw.starts_with(NODE_ID_PREFIX)
	}
}

impl LinkId {
	/// View the identifier as a string slice.
	#[must_use]
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Check whether a raw identifier string belongs to the link namespace.
	#[must_use]
	pub fn is_link_id(raw: &str) -> bool {
		raw.starts_with(LINK_ID_PREFIX)
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl fmt::Display for LinkId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Issues unique, type-tagged identifiers for nodes and links.
///
/// Two counters, one per kind. No two calls of the same kind return
/// the same value within the allocator's lifetime.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct IdentityAllocator {
	node_counter: u64,
	link_counter: u64,
}

impl IdentityAllocator {
	/// Create a fresh allocator with both counters at zero.
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Allocate the next node identifier.
	pub fn next_node_id(&mut self) -> NodeId {
		self.node_counter += 1;
		NodeId(format!("{NODE_ID_PREFIX}{}", self.node_counter))
	}

	/// Allocate the next link identifier.
	pub fn next_link_id(&mut self) -> LinkId {
		self.link_counter += 1;
		LinkId(format!("{LINK_ID_PREFIX}{}", self.link_counter))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_ids_are_unique_and_monotonic() {
		let mut alloc = IdentityAllocator::new();
		let a = alloc.next_node_id();
		let b = alloc.next_node_id();
		assert_ne!(a, b);
		assert_eq!(a.as_str(), "node-1");
		assert_eq!(b.as_str(), "node-2");
	}

	#[test]
	fn test_namespaces_are_disjoint() {
		let mut alloc = IdentityAllocator::new();
		let node = alloc.next_node_id();
		let link = alloc.next_link_id();
		assert!(NodeId::is_node_id(node.as_str()));
		assert!(LinkId::is_link_id(link.as_str()));
		assert!(!NodeId::is_node_id(link.as_str()));
		assert!(!LinkId::is_link_id(node.as_str()));
	}

	#[test]
	fn test_counters_are_independent_per_kind() {
		let mut alloc = IdentityAllocator::new();
		let _ = alloc.next_node_id();
		let link = alloc.next_link_id();
		// Link counter starts from its own sequence, not the node counter.
		assert_eq!(link.as_str(), "link-1");
	}
}
