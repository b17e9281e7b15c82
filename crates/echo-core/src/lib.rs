//! # Echo Core
//!
//! A hypergraph associative memory with echo (spreading activation)
//! propagation and a two-tier pattern matcher.
//!
//! ## Why a hypergraph memory?
//!
//! Associative memory is not a key-value lookup. What a concept means is
//! mostly *where it sits*: which other concepts it touches, how strongly,
//! and what lights up when it does. This crate stores typed,
//! content-bearing nodes and typed, weighted links in one keyed table and
//! gives callers four primitives that everything else is built from:
//!
//! - **store** (`remember`, `create_link`) — grow the graph
//! - **recall** — literal/wildcard content matching over nodes
//! - **propagate** — decay a seed signal across connected nodes
//! - **match** (`match_structural`) — variable-binding matching over
//!   connected regions, for inference-style queries
//!
//! ## Echo propagation
//!
//! Activation spreads outward from a source, decaying per hop:
//!
//! ```text
//! next = current × link_strength × damping   (damping = 0.9)
//! ```
//!
//! A branch dies when the signal reaches the threshold; a visited set
//! guarantees every node is written at most once per run, so cycles
//! terminate trivially.
//!
//! ## Example
//!
//! ```rust
//! use echo_core::{propagate, Content, HypergraphStore, Pattern, PropagationConfig};
//!
//! let mut store = HypergraphStore::new();
//! let cat = store.remember(Content::text("cat"), None)?;
//! let feline = store.remember(Content::text("feline"), None)?;
//! let _link = store.create_link(&cat, &feline, "maps-to", 0.9)?;
//!
//! // Echo from "cat": feline receives 1.0 × 0.9 × 0.9 = 0.81.
//! let outcome = propagate(&mut store, &cat, &PropagationConfig::with_threshold(0.1))?;
//! assert_eq!(outcome.visited_count(), 2);
//! assert!((outcome.activation_of(&feline).unwrap() - 0.81).abs() < 1e-9);
//!
//! // Literal recall.
//! let found: Vec<_> = store.recall(&Pattern::exact("cat"), &[])?.cloned().collect();
//! assert_eq!(found, vec![cat]);
//! # Ok::<(), echo_core::MemoryError>(())
//! ```
//!
//! ## Concurrency
//!
//! The store is single-writer by design (`create_link` touches two node
//! records non-atomically). [`SharedMemory`] wraps a store in a
//! read-write lock for callers that need a thread-safe handle.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::needless_return)]

pub mod content;
pub mod error;
pub mod ident;
pub mod learning;
pub mod propagation;
pub mod shared;
pub mod store;
pub mod structural;

pub use content::{
	content_matches, Content, EchoState, Pattern, PropertyValue, DEFAULT_ECHO_DECAY_RATE,
	DEFAULT_ECHO_THRESHOLD,
};
pub use error::{MemoryError, Result};
pub use ident::{IdentityAllocator, LinkId, NodeId, LINK_ID_PREFIX, NODE_ID_PREFIX};
pub use learning::{learn, LearningMethod, LEARN_PROPAGATION_THRESHOLD, SUPERVISED_PAIR_STRENGTH};
pub use propagation::{
	propagate, resonate, PropagationConfig, PropagationOutcome, PropagationStep, DEFAULT_DAMPING,
	RESONANCE_THRESHOLD_FACTOR,
};
pub use shared::SharedMemory;
pub use store::{
	constraints_satisfied, Constraint, HypergraphStore, Link, MemoryStatus, Node,
	ACTIVATION_PROPERTY, CONTEXTUAL_LINK_KIND, CONTEXT_LINK_STRENGTH, DEFAULT_NODE_KIND,
	ECHO_STATE_PROPERTY, WEAK_CONNECTION_STRENGTH,
};
pub use structural::{match_structural, Binding};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
	use super::*;

	// The end-to-end scenario: store, link, propagate, recall, forget.
	#[test]
	fn test_store_propagate_recall_forget() {
		let mut store = HypergraphStore::new();
		let a = store.remember(Content::text("cat"), None).unwrap();
		let b = store.remember(Content::text("feline"), None).unwrap();
		let _ = store.create_link(&a, &b, "maps-to", 0.9).unwrap();

		let outcome = propagate(&mut store, &a, &PropagationConfig::with_threshold(0.1)).unwrap();
		assert_eq!(outcome.visited_count(), 2);
		assert!((outcome.activation_of(&b).unwrap() - 0.81).abs() < 1e-9);

		let found: Vec<NodeId> = store
			.recall(&Pattern::exact("cat"), &[])
			.unwrap()
			.cloned()
			.collect();
		assert_eq!(found, vec![a.clone()]);

		let removed = store.forget(&Pattern::exact("cat"), 0.1).unwrap();
		assert_eq!(removed, vec![a]);
		assert!(store
			.recall(&Pattern::exact("cat"), &[])
			.unwrap()
			.next()
			.is_none());
		// B's link list no longer references the removed node.
		assert!(store.get_connected(&b).next().is_none());
	}
}
