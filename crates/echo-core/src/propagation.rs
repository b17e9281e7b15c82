//! Echo propagation.
//!
//! Spreading activation over the hypergraph: a seed signal decays as it
//! crosses each link,
//!
//! `next = current × strength × damping`
//!
//! where `strength` is the link's own decay multiplier and `damping` is a
//! fixed per-hop factor (0.9). A branch terminates when the signal falls
//! to the threshold or below; a run-wide visited set guarantees each node
//! is written at most once, which also makes termination immediate on
//! cyclic graphs.
//!
//! One engine serves both echo propagation and generic activation spread;
//! callers vary only the configuration.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, trace};

use crate::content::{Pattern, DEFAULT_ECHO_THRESHOLD};
use crate::error::{MemoryError, Result};
use crate::ident::NodeId;
use crate::store::HypergraphStore;

/// Fixed per-hop damping factor, applied on top of link strength.
pub const DEFAULT_DAMPING: f64 = 0.9;

/// `resonate` derives its cutoff as `frequency × 0.1`.
pub const RESONANCE_THRESHOLD_FACTOR: f64 = 0.1;

/// Configuration for one propagation run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PropagationConfig {
	/// Per-hop damping factor (0-1)
	pub damping: f64,
	/// Lower cutoff: a branch stops once the signal is at or below this
	pub threshold: f64,
	/// Activation written to the source node
	pub initial_activation: f64,
	/// Visit budget for the runaway-graph guard
	pub max_visits: usize,
}

impl Default for PropagationConfig {
	fn default() -> Self {
		Self {
			damping: DEFAULT_DAMPING,
			threshold: DEFAULT_ECHO_THRESHOLD,
			initial_activation: 1.0,
			max_visits: 10_000,
		}
	}
}

impl PropagationConfig {
	/// Default configuration with an explicit cutoff threshold.
	#[must_use]
	pub fn with_threshold(threshold: f64) -> Self {
		Self {
			threshold,
			..Self::default()
		}
	}
}

/// One node visit during a propagation run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PropagationStep {
	/// The visited node
	pub node: NodeId,
	/// The activation written to it
	pub activation: f64,
}

/// Result of a propagation run: visits in order, with written activations.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PropagationOutcome {
	/// Visits in the order they happened
	pub steps: Vec<PropagationStep>,
}

impl PropagationOutcome {
	/// Number of nodes visited.
	#[must_use]
	pub fn visited_count(&self) -> usize {
		self.steps.len()
	}

	/// Activation written to a node during this run, if it was visited.
	#[must_use]
	pub fn activation_of(&self, node: &NodeId) -> Option<f64> {
		self.steps
			.iter()
			.find(|step| step.node == *node)
			.map(|step| step.activation)
	}
}

/// Propagate activation from a source node through connected nodes.
///
/// The source is always visited and written with the configured initial
/// activation; from there the signal descends into each unvisited
/// neighbor whose damped strength keeps it above the threshold.
///
/// Activation is mutated in place via the store's `activation` property.
///
/// # Errors
///
/// [`MemoryError::NotFound`] if the source id does not resolve;
/// [`MemoryError::CycleGuardExhausted`] if the run exceeds the visit
/// budget (unreachable on a well-formed store).
pub fn propagate(
	store: &mut HypergraphStore,
	source: &NodeId,
	config: &PropagationConfig,
) -> Result<PropagationOutcome> {
	if !store.contains_node(source) {
		return Err(MemoryError::not_found(source.as_str()));
	}

	let mut outcome = PropagationOutcome::default();
	let mut visited: HashSet<NodeId> = HashSet::new();
	let mut frontier: Vec<(NodeId, f64)> = vec![(source.clone(), config.initial_activation)];
	let _ = visited.insert(source.clone());

	while let Some((id, activation)) = frontier.pop() {
		if outcome.steps.len() >= config.max_visits {
			return Err(MemoryError::CycleGuardExhausted {
				visited: outcome.steps.len(),
				budget: config.max_visits,
			});
		}

		store.update_activation(&id, activation)?;
		trace!(node = %id, activation, "visited");

		let neighbors: Vec<NodeId> = store.get_connected(&id).cloned().collect();
		for neighbor in neighbors {
			if visited.contains(&neighbor) {
				continue;
			}
			let next = activation * store.link_strength(&id, &neighbor) * config.damping;
			if next > config.threshold {
				let _ = visited.insert(neighbor.clone());
				frontier.push((neighbor, next));
			}
		}

		outcome.steps.push(PropagationStep {
			node: id,
			activation,
		});
	}

	debug!(source = %source, visited = outcome.steps.len(), threshold = config.threshold, "propagation finished");
	Ok(outcome)
}

/// Recall nodes by pattern and propagate from each at a frequency-derived
/// cutoff (`threshold = frequency × 0.1`).
///
/// # Errors
///
/// [`MemoryError::InvalidPattern`] if the pattern contains structural
/// variables; otherwise any error from the underlying runs.
pub fn resonate(
	store: &mut HypergraphStore,
	pattern: &Pattern,
	frequency: f64,
) -> Result<Vec<PropagationOutcome>> {
	let sources: Vec<NodeId> = store.recall(pattern, &[])?.cloned().collect();
	let config = PropagationConfig::with_threshold(frequency * RESONANCE_THRESHOLD_FACTOR);

	sources
		.iter()
		.map(|source| propagate(store, source, &config))
		.collect()
}
