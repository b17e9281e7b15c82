//! Shared ownership of a store.
//!
//! The core itself is single-threaded and synchronous. `create_link`
//! mutates two node records non-atomically, so concurrent use needs a
//! single-writer discipline: this wrapper serializes every mutation
//! behind one `RwLock` at store granularity, while read-side queries may
//! run concurrently with each other.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::content::{Content, Pattern};
use crate::error::Result;
use crate::ident::{LinkId, NodeId};
use crate::learning::{learn, LearningMethod};
use crate::propagation::{propagate, resonate, PropagationConfig, PropagationOutcome};
use crate::store::{Constraint, HypergraphStore, MemoryStatus};
use crate::structural::{match_structural, Binding};

/// A clonable, thread-safe handle to one hypergraph store.
#[derive(Clone, Debug, Default)]
pub struct SharedMemory {
	inner: Arc<RwLock<HypergraphStore>>,
}

impl SharedMemory {
	/// Create a handle to a fresh, empty store.
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Wrap an existing store.
	#[must_use]
	pub fn from_store(store: HypergraphStore) -> Self {
		Self {
			inner: Arc::new(RwLock::new(store)),
		}
	}

	/// Run a read-side closure against the store.
	pub fn with_store<R>(&self, f: impl FnOnce(&HypergraphStore) -> R) -> R {
		f(&self.inner.read())
	}

	/// See [`HypergraphStore::remember`].
	///
	/// # Errors
	///
	/// Same as the underlying operation.
	pub fn remember(&self, content: Content, context: Option<&NodeId>) -> Result<NodeId> {
		self.inner.write().remember(content, context)
	}

	/// See [`HypergraphStore::remember_as`].
	///
	/// # Errors
	///
	/// Same as the underlying operation.
	pub fn remember_as(
		&self,
		content: Content,
		context: Option<&NodeId>,
		kind: &str,
	) -> Result<NodeId> {
		self.inner.write().remember_as(content, context, kind)
	}

	/// See [`HypergraphStore::create_link`].
	///
	/// # Errors
	///
	/// Same as the underlying operation.
	pub fn create_link(
		&self,
		source: &NodeId,
		target: &NodeId,
		kind: &str,
		strength: f64,
	) -> Result<LinkId> {
		self.inner.write().create_link(source, target, kind, strength)
	}

	/// Snapshot of [`HypergraphStore::recall`] matches.
	///
	/// # Errors
	///
	/// Same as the underlying operation.
	pub fn recall(&self, pattern: &Pattern, constraints: &[Constraint]) -> Result<Vec<NodeId>> {
		let store = self.inner.read();
		let matches = store.recall(pattern, constraints)?.cloned().collect();
		Ok(matches)
	}

	/// See [`HypergraphStore::forget`].
	///
	/// # Errors
	///
	/// Same as the underlying operation.
	pub fn forget(&self, pattern: &Pattern, decay_rate: f64) -> Result<Vec<NodeId>> {
		self.inner.write().forget(pattern, decay_rate)
	}

	/// See [`propagate`]. Takes the write lock for the whole run, since
	/// activation is mutated in place.
	///
	/// # Errors
	///
	/// Same as the underlying operation.
	pub fn propagate(&self, source: &NodeId, config: &PropagationConfig) -> Result<PropagationOutcome> {
		propagate(&mut self.inner.write(), source, config)
	}

	/// See [`resonate`].
	///
	/// # Errors
	///
	/// Same as the underlying operation.
	pub fn resonate(&self, pattern: &Pattern, frequency: f64) -> Result<Vec<PropagationOutcome>> {
		resonate(&mut self.inner.write(), pattern, frequency)
	}

	/// See [`match_structural`].
	///
	/// # Errors
	///
	/// Same as the underlying operation.
	pub fn match_structural(&self, pattern: &[Pattern]) -> Result<Vec<Binding>> {
		match_structural(&self.inner.read(), pattern)
	}

	/// See [`learn`].
	///
	/// # Errors
	///
	/// Same as the underlying operation.
	pub fn learn(&self, experience: Content, method: LearningMethod) -> Result<NodeId> {
		learn(&mut self.inner.write(), experience, method)
	}

	/// See [`HypergraphStore::status`].
	#[must_use]
	pub fn status(&self) -> MemoryStatus {
		self.inner.read().status()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::thread;

	#[test]
	fn test_shared_handles_see_one_store() {
		let memory = SharedMemory::new();
		let reader = memory.clone();

		let id = memory.remember(Content::text("cat"), None).unwrap();
		let recalled = reader.recall(&Pattern::exact("cat"), &[]).unwrap();
		assert_eq!(recalled, vec![id]);
	}

	#[test]
	fn test_writes_from_threads_serialize() {
		let memory = SharedMemory::new();

		let handles: Vec<_> = (0..4)
			.map(|worker| {
				let memory = memory.clone();
				thread::spawn(move || {
					for _ in 0..25 {
						let _ = memory
							.remember(Content::Number(f64::from(worker)), None)
							.unwrap();
					}
				})
			})
			.collect();
		for handle in handles {
			handle.join().unwrap();
		}

		let status = memory.status();
		assert_eq!(status.node_count, 100);
		// Every id unique despite the racing writers.
		memory.with_store(|store| {
			let mut ids: Vec<&str> = store.node_ids().map(NodeId::as_str).collect();
			ids.sort_unstable();
			ids.dedup();
			assert_eq!(ids.len(), 100);
		});
	}

	#[test]
	fn test_propagation_through_the_handle() {
		let memory = SharedMemory::new();
		let a = memory.remember(Content::text("cat"), None).unwrap();
		let b = memory.remember(Content::text("feline"), None).unwrap();
		let _ = memory.create_link(&a, &b, "maps-to", 0.9).unwrap();

		let outcome = memory
			.propagate(&a, &PropagationConfig::with_threshold(0.1))
			.unwrap();
		assert_eq!(outcome.visited_count(), 2);
		memory.with_store(|store| {
			assert!((store.get_node(&b).unwrap().activation() - 0.81).abs() < 1e-9);
		});
	}
}
