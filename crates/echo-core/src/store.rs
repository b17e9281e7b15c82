//! The hypergraph store.
//!
//! One keyed table holds both nodes and links, tagged by entry kind;
//! node and link ids come from disjoint namespaces, so an identifier
//! is a valid key in at most one role. Links are internally directed
//! but registered on **both** endpoint nodes, which makes traversal
//! direction-agnostic.
//!
//! Everything else in the crate bottoms out here: `recall` drives the
//! literal matcher, propagation walks `get_connected` + `link_strength`,
//! and the learning adapter is store mutations plus a propagation run.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::{HashMap, HashSet};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

use crate::content::{content_matches, Content, Pattern, PropertyValue};
use crate::error::{MemoryError, Result};
use crate::ident::{IdentityAllocator, LinkId, NodeId};

// ============================================================================
// Constants
// ============================================================================

/// Default node kind for `remember`.
pub const DEFAULT_NODE_KIND: &str = "concept";

/// Link kind used when `remember` attaches a node to its context.
pub const CONTEXTUAL_LINK_KIND: &str = "contextual";

/// Strength of the context link created by `remember`.
pub const CONTEXT_LINK_STRENGTH: f64 = 0.8;

/// Strength reported by `link_strength` for two unlinked existing nodes.
pub const WEAK_CONNECTION_STRENGTH: f64 = 0.1;

/// Property key holding a node's current activation.
pub const ACTIVATION_PROPERTY: &str = "activation";

/// Property key holding a node's echo state.
pub const ECHO_STATE_PROPERTY: &str = "echo-state";

// Rough per-entry footprints for the status estimate.
const NODE_FOOTPRINT_BYTES: usize = 100;
const LINK_FOOTPRINT_BYTES: usize = 60;

fn now_ms() -> f64 {
	SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.map_or(0.0, |elapsed| elapsed.as_secs_f64() * 1000.0)
}

// ============================================================================
// Entries
// ============================================================================

/// A typed, content-bearing vertex.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Node {
	/// Identifier (`node-<n>`)
	pub id: NodeId,
	/// Symbolic category (`concept`, `echo`, `input`, ...)
	pub kind: String,
	/// Opaque content value
	pub content: Content,
	/// Open-ended property map (`activation`, `echo-state`, ...)
	pub properties: HashMap<String, PropertyValue>,
	/// Ids of incident links (insertion order irrelevant)
	pub links: SmallVec<[LinkId; 4]>,
	/// Creation timestamp (ms since epoch)
	pub created_at_ms: f64,
	/// Last access timestamp, refreshed by [`HypergraphStore::touch`]
	pub touched_at_ms: f64,
}

impl Node {
	/// Current activation, 0.0 if never written.
	#[must_use]
	pub fn activation(&self) -> f64 {
		self.properties
			.get(ACTIVATION_PROPERTY)
			.and_then(PropertyValue::as_number)
			.unwrap_or(0.0)
	}
}

/// A typed, weighted, directed edge between two nodes.
///
/// Strength is read as a decay multiplier during propagation and never
/// re-normalized.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Link {
	/// Identifier (`link-<n>`)
	pub id: LinkId,
	/// Symbolic category (`contextual`, `maps-to`, `produces`, ...)
	pub kind: String,
	/// Source node
	pub source: NodeId,
	/// Target node
	pub target: NodeId,
	/// Decay multiplier in [0, 1]
	pub strength: f64,
	/// Open-ended property map
	pub properties: HashMap<String, PropertyValue>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
enum Entry {
	Node(Node),
	Link(Link),
}

/// Store status snapshot.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MemoryStatus {
	/// Number of nodes
	pub node_count: usize,
	/// Number of links
	pub link_count: usize,
	/// Rough memory footprint estimate
	pub estimated_memory_bytes: usize,
}

// ============================================================================
// Constraints
// ============================================================================

/// A predicate over a candidate node's properties, applied by `recall`
/// in addition to the content pattern.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Constraint {
	/// The property map contains the given key.
	HasProperty(String),
	/// The property map maps the key to exactly this value.
	PropertyEquals(String, PropertyValue),
	/// The node's activation exceeds the given floor.
	ActivationAbove(f64),
	/// The node's kind tag equals the given category.
	KindIs(String),
}

/// Check every constraint against a candidate node.
#[must_use]
pub fn constraints_satisfied(node: &Node, constraints: &[Constraint]) -> bool {
	constraints.iter().all(|constraint| match constraint {
		Constraint::HasProperty(key) => node.properties.contains_key(key),
		Constraint::PropertyEquals(key, value) => node.properties.get(key) == Some(value),
		Constraint::ActivationAbove(floor) => node.activation() > *floor,
		Constraint::KindIs(kind) => node.kind == *kind,
	})
}

// ============================================================================
// Store
// ============================================================================

/// Single keyed collection holding both nodes and links.
///
/// Creation order of nodes is tracked explicitly; `recall` and structural
/// matching walk nodes in that order.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct HypergraphStore {
	entries: HashMap<String, Entry>,
	node_order: Vec<NodeId>,
	allocator: IdentityAllocator,
}

impl HypergraphStore {
	/// Create an empty store with fresh identifier counters.
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	// ------------------------------------------------------------------
	// Lookup
	// ------------------------------------------------------------------

	/// Look up a node by id.
	#[must_use]
	pub fn get_node(&self, id: &NodeId) -> Option<&Node> {
		match self.entries.get(id.as_str()) {
			Some(Entry::Node(node)) => Some(node),
			_ => None,
		}
	}

	fn get_node_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
		match self.entries.get_mut(id.as_str()) {
			Some(Entry::Node(node)) => Some(node),
			_ => None,
		}
	}

	/// Look up a link by id.
	#[must_use]
	pub fn get_link(&self, id: &LinkId) -> Option<&Link> {
		match self.entries.get(id.as_str()) {
			Some(Entry::Link(link)) => Some(link),
			_ => None,
		}
	}

	/// Check whether a node id resolves.
	#[must_use]
	pub fn contains_node(&self, id: &NodeId) -> bool {
		self.get_node(id).is_some()
	}

	/// Number of nodes in the store.
	#[must_use]
	pub fn node_count(&self) -> usize {
		self.node_order.len()
	}

	/// Number of links in the store.
	#[must_use]
	pub fn link_count(&self) -> usize {
		self.entries.len() - self.node_order.len()
	}

	/// Node ids in creation order.
	pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> + '_ {
		self.node_order.iter()
	}

	/// Nodes in creation order.
	pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
		self.node_order.iter().filter_map(|id| self.get_node(id))
	}

	/// Status snapshot: node/link counts and a rough footprint estimate.
	#[must_use]
	pub fn status(&self) -> MemoryStatus {
		let node_count = self.node_count();
		let link_count = self.link_count();
		MemoryStatus {
			node_count,
			link_count,
			estimated_memory_bytes: node_count * NODE_FOOTPRINT_BYTES
				+ link_count * LINK_FOOTPRINT_BYTES,
		}
	}

	// ------------------------------------------------------------------
	// Creation
	// ------------------------------------------------------------------

	/// Create a node with empty properties and no incident links.
	pub fn create_node(&mut self, kind: &str, content: Content) -> NodeId {
		let id = self.allocator.next_node_id();
		let created_at_ms = now_ms();
		let node = Node {
			id: id.clone(),
			kind: kind.to_owned(),
			content,
			properties: HashMap::new(),
			links: SmallVec::new(),
			created_at_ms,
			touched_at_ms: created_at_ms,
		};
		let _ = self.entries.insert(id.as_str().to_owned(), Entry::Node(node));
		self.node_order.push(id.clone());
		id
	}

	/// Create a directed link and register it on **both** endpoints.
	///
	/// The link's direction tag does not affect registration: traversal
	/// through `get_connected` is direction-agnostic.
	///
	/// # Errors
	///
	/// [`MemoryError::NotFound`] if either endpoint is absent;
	/// [`MemoryError::InvalidArgument`] if strength is outside [0, 1].
	pub fn create_link(
		&mut self,
		source: &NodeId,
		target: &NodeId,
		kind: &str,
		strength: f64,
	) -> Result<LinkId> {
		if !(0.0..=1.0).contains(&strength) {
			return Err(MemoryError::InvalidArgument(format!(
				"link strength must be in [0, 1], got {strength}"
			)));
		}
		if !self.contains_node(source) {
			return Err(MemoryError::not_found(source.as_str()));
		}
		if !self.contains_node(target) {
			return Err(MemoryError::not_found(target.as_str()));
		}

		let id = self.allocator.next_link_id();
		let link = Link {
			id: id.clone(),
			kind: kind.to_owned(),
			source: source.clone(),
			target: target.clone(),
			strength,
			properties: HashMap::new(),
		};
		let _ = self.entries.insert(id.as_str().to_owned(), Entry::Link(link));

		if let Some(node) = self.get_node_mut(source) {
			node.links.push(id.clone());
		}
		// Self-links register once; anything else registers on both ends.
		if source != target {
			if let Some(node) = self.get_node_mut(target) {
				node.links.push(id.clone());
			}
		}

		debug!(link = %id, %source, %target, kind, strength, "link created");
		Ok(id)
	}

	// ------------------------------------------------------------------
	// Remember / recall / forget
	// ------------------------------------------------------------------

	/// Store a concept node, optionally attached to an existing context
	/// node by a `contextual` link of strength 0.8.
	///
	/// # Errors
	///
	/// [`MemoryError::NotFound`] if a context id is supplied but does not
	/// resolve to a node.
	pub fn remember(&mut self, content: Content, context: Option<&NodeId>) -> Result<NodeId> {
		self.remember_as(content, context, DEFAULT_NODE_KIND)
	}

	/// `remember` with an explicit kind tag.
	///
	/// # Errors
	///
	/// [`MemoryError::NotFound`] if a context id is supplied but does not
	/// resolve to a node.
	pub fn remember_as(
		&mut self,
		content: Content,
		context: Option<&NodeId>,
		kind: &str,
	) -> Result<NodeId> {
		if let Some(context_id) = context {
			if !self.contains_node(context_id) {
				return Err(MemoryError::not_found(context_id.as_str()));
			}
		}

		let id = self.create_node(kind, content);
		if let Some(context_id) = context {
			let _ = self.create_link(
				&id,
				context_id,
				CONTEXTUAL_LINK_KIND,
				CONTEXT_LINK_STRENGTH,
			)?;
		}

		debug!(node = %id, kind, context = ?context.map(NodeId::as_str), "remembered");
		Ok(id)
	}

	/// Nodes whose content matches the pattern and whose properties satisfy
	/// every constraint, in creation order.
	///
	/// The sequence is lazy and recomputed per call; no state is cached.
	/// The pattern and constraints are captured by value, so the yielded
	/// ids borrow the store alone and outlive temporary arguments.
	///
	/// # Errors
	///
	/// [`MemoryError::InvalidPattern`] if the pattern contains structural
	/// variables.
	pub fn recall<'s>(
		&'s self,
		pattern: &Pattern,
		constraints: &[Constraint],
	) -> Result<impl Iterator<Item = &'s NodeId> + 's> {
		pattern.expect_literal()?;
		let pattern = pattern.clone();
		let constraints = constraints.to_vec();
		Ok(self.node_order.iter().filter(move |id| {
			self.get_node(id).is_some_and(|node| {
				content_matches(&node.content, &pattern)
					&& constraints_satisfied(node, &constraints)
			})
		}))
	}

	/// Remove every node matching the pattern, immediately.
	///
	/// Incident links are removed with the node and their ids pruned from
	/// the surviving endpoints' link lists, so no dangling references
	/// remain. `decay_rate` is accepted for interface symmetry with
	/// `remember`; forgetting is a hard delete, not a gradual weakening.
	///
	/// Returns the removed node ids.
	///
	/// # Errors
	///
	/// [`MemoryError::InvalidPattern`] if the pattern contains structural
	/// variables.
	pub fn forget(&mut self, pattern: &Pattern, _decay_rate: f64) -> Result<Vec<NodeId>> {
		let doomed: Vec<NodeId> = self.recall(pattern, &[])?.cloned().collect();
		let doomed_set: HashSet<&NodeId> = doomed.iter().collect();

		for id in &doomed {
			let node = match self.entries.remove(id.as_str()) {
				Some(Entry::Node(node)) => node,
				_ => continue,
			};
			for link_id in node.links {
				// A link between two doomed nodes is removed on the first pass.
				if let Some(Entry::Link(link)) = self.entries.remove(link_id.as_str()) {
					let other = if link.source == *id {
						link.target
					} else {
						link.source
					};
					if let Some(other_node) = self.get_node_mut(&other) {
						other_node.links.retain(|incident| *incident != link_id);
					}
				}
			}
		}
		self.node_order.retain(|id| !doomed_set.contains(id));

		debug!(removed = doomed.len(), "forgot");
		Ok(doomed)
	}

	// ------------------------------------------------------------------
	// Traversal
	// ------------------------------------------------------------------

	/// Opposite endpoint of every link incident to the node.
	///
	/// Yields the target when the node is the source and vice versa;
	/// traversal is direction-agnostic even though links are directed.
	/// An unknown id yields an empty sequence.
	pub fn get_connected<'a>(&'a self, id: &'a NodeId) -> impl Iterator<Item = &'a NodeId> + 'a {
		self.get_node(id).into_iter().flat_map(move |node| {
			node.links.iter().filter_map(move |link_id| {
				self.get_link(link_id).map(|link| {
					if link.source == *id {
						&link.target
					} else {
						&link.source
					}
				})
			})
		})
	}

	/// Strength of a link connecting `a` and `b` in either direction.
	///
	/// Falls back to the weak-connection constant (0.1) when `a` exists
	/// but no such link does, and to 0.0 when `a` is absent.
	#[must_use]
	pub fn link_strength(&self, a: &NodeId, b: &NodeId) -> f64 {
		let Some(node) = self.get_node(a) else {
			return 0.0;
		};
		node.links
			.iter()
			.filter_map(|link_id| self.get_link(link_id))
			.find(|link| {
				(link.source == *a && link.target == *b)
					|| (link.source == *b && link.target == *a)
			})
			.map_or(WEAK_CONNECTION_STRENGTH, |link| link.strength)
	}

	// ------------------------------------------------------------------
	// Mutation
	// ------------------------------------------------------------------

	/// Set the node's `activation` property, overwriting any prior value.
	///
	/// # Errors
	///
	/// [`MemoryError::NotFound`] on an unknown id. A silent no-op would
	/// mask propagation bugs, so unknown ids fail loudly.
	pub fn update_activation(&mut self, id: &NodeId, value: f64) -> Result<()> {
		let node = self
			.get_node_mut(id)
			.ok_or_else(|| MemoryError::not_found(id.as_str()))?;
		let _ = node
			.properties
			.insert(ACTIVATION_PROPERTY.to_owned(), PropertyValue::Number(value));
		Ok(())
	}

	/// Refresh the node's access timestamp.
	///
	/// # Errors
	///
	/// [`MemoryError::NotFound`] on an unknown id.
	pub fn touch(&mut self, id: &NodeId) -> Result<()> {
		let node = self
			.get_node_mut(id)
			.ok_or_else(|| MemoryError::not_found(id.as_str()))?;
		node.touched_at_ms = now_ms();
		Ok(())
	}

	/// Set or replace an arbitrary node property.
	///
	/// # Errors
	///
	/// [`MemoryError::NotFound`] on an unknown id.
	pub fn set_property(&mut self, id: &NodeId, key: &str, value: PropertyValue) -> Result<()> {
		let node = self
			.get_node_mut(id)
			.ok_or_else(|| MemoryError::not_found(id.as_str()))?;
		let _ = node.properties.insert(key.to_owned(), value);
		Ok(())
	}
}
