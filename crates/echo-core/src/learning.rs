//! Learning adapter.
//!
//! The one sanctioned write-side consumer of the core: each `learn` call
//! wraps an experience record into store mutations plus a seeded
//! propagation run. Reasoning heuristics (deduction, abduction,
//! reflection) are read-side layers above `recall` and live with external
//! callers, not here.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::content::Content;
use crate::error::Result;
use crate::ident::NodeId;
use crate::propagation::{propagate, PropagationConfig};
use crate::store::{HypergraphStore, CONTEXTUAL_LINK_KIND, CONTEXT_LINK_STRENGTH};

/// Strength of the input↔output pair links created by supervised learning.
pub const SUPERVISED_PAIR_STRENGTH: f64 = 0.9;

/// Cutoff for the propagation run `learn` triggers.
///
/// The strongest hop out of a record node is a 0.8 contextual link, so
/// the default echo threshold (0.75) can never be crossed from a seed in
/// [0, 1] (`seed × 0.8 × 0.9 ≤ 0.72`). 0.1 lets even the weakest seed
/// (0.2) reach the record's neighborhood.
pub const LEARN_PROPAGATION_THRESHOLD: f64 = 0.1;

/// How an experience is learned.
///
/// A closed set: adding a method is a compile-time event, not a string
/// comparison at the dispatch site.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum LearningMethod {
	/// Learn from a reward signal. Positive rewards seed strongly (0.8),
	/// negative ones weakly (0.2).
	Reinforcement {
		/// The observed reward
		reward: f64,
	},
	/// Learn an input→output pair, linked in both directions.
	Supervised {
		/// The observed input
		input: Content,
		/// The paired output
		output: Content,
	},
	/// Learn from structure alone.
	Unsupervised,
	/// Learn about learning itself.
	Meta,
}

impl LearningMethod {
	/// The kind tag written on the experience record node.
	#[must_use]
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Reinforcement { .. } => "reinforcement",
			Self::Supervised { .. } => "supervised",
			Self::Unsupervised => "unsupervised",
			Self::Meta => "meta",
		}
	}

	/// Seed activation for the propagation run this method triggers.
	#[must_use]
	pub fn seed_activation(&self) -> f64 {
		match self {
			Self::Reinforcement { reward } => {
				if *reward >= 0.0 {
					0.8
				} else {
					0.2
				}
			}
			Self::Supervised { .. } => 0.9,
			Self::Unsupervised => 0.6,
			Self::Meta => 0.7,
		}
	}
}

/// Learn an experience: store it, wire method-specific structure, and
/// propagate a method-specific seed activation from the record node.
///
/// Returns the record node's id.
///
/// # Errors
///
/// Propagates any store or propagation error; on a healthy store none
/// occur, since all ids involved are freshly created.
pub fn learn(
	store: &mut HypergraphStore,
	experience: Content,
	method: LearningMethod,
) -> Result<NodeId> {
	let seed = method.seed_activation();
	let kind = method.kind();
	let record = store.remember_as(experience, None, kind)?;

	if let LearningMethod::Supervised { input, output } = method {
		let input_id = store.create_node("input", input);
		let output_id = store.create_node("output", output);
		let _ = store.create_link(&input_id, &output_id, "maps-to", SUPERVISED_PAIR_STRENGTH)?;
		let _ = store.create_link(&output_id, &input_id, "produces", SUPERVISED_PAIR_STRENGTH)?;
		let _ = store.create_link(&record, &input_id, CONTEXTUAL_LINK_KIND, CONTEXT_LINK_STRENGTH)?;
		let _ = store.create_link(&record, &output_id, CONTEXTUAL_LINK_KIND, CONTEXT_LINK_STRENGTH)?;
	}

	let config = PropagationConfig {
		initial_activation: seed,
		threshold: LEARN_PROPAGATION_THRESHOLD,
		..PropagationConfig::default()
	};
	let outcome = propagate(store, &record, &config)?;
	debug!(record = %record, kind, seed, visited = outcome.visited_count(), "learned");

	Ok(record)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::store::Constraint;

	#[test]
	fn test_reinforcement_seed_depends_on_reward_sign() {
		let mut store = HypergraphStore::new();
		let rewarded = learn(
			&mut store,
			Content::text("pressed the lever"),
			LearningMethod::Reinforcement { reward: 1.0 },
		)
		.unwrap();
		let punished = learn(
			&mut store,
			Content::text("touched the fence"),
			LearningMethod::Reinforcement { reward: -1.0 },
		)
		.unwrap();

		assert!((store.get_node(&rewarded).unwrap().activation() - 0.8).abs() < f64::EPSILON);
		assert!((store.get_node(&punished).unwrap().activation() - 0.2).abs() < f64::EPSILON);
	}

	#[test]
	fn test_record_is_tagged_with_method_kind() {
		let mut store = HypergraphStore::new();
		let record = learn(&mut store, Content::text("clusters"), LearningMethod::Unsupervised)
			.unwrap();
		assert_eq!(store.get_node(&record).unwrap().kind, "unsupervised");

		let by_kind: Vec<&NodeId> = store
			.recall(
				&crate::content::Pattern::Any,
				&[Constraint::KindIs("unsupervised".into())],
			)
			.unwrap()
			.collect();
		assert_eq!(by_kind, vec![&record]);
	}

	#[test]
	fn test_supervised_links_pair_both_directions() {
		let mut store = HypergraphStore::new();
		let record = learn(
			&mut store,
			Content::text("greeting exchange"),
			LearningMethod::Supervised {
				input: Content::text("hello"),
				output: Content::text("bonjour"),
			},
		)
		.unwrap();

		// Record plus the input/output pair.
		assert_eq!(store.node_count(), 3);

		let input = store
			.nodes()
			.find(|node| node.kind == "input")
			.map(|node| node.id.clone())
			.unwrap();
		let output = store
			.nodes()
			.find(|node| node.kind == "output")
			.map(|node| node.id.clone())
			.unwrap();

		// Pair is linked both ways at 0.9.
		assert!((store.link_strength(&input, &output) - 0.9).abs() < f64::EPSILON);
		assert!((store.link_strength(&output, &input) - 0.9).abs() < f64::EPSILON);

		// The record reaches both halves of the pair.
		let connected: Vec<&NodeId> = store.get_connected(&record).collect();
		assert!(connected.contains(&&input));
		assert!(connected.contains(&&output));
	}

	#[test]
	fn test_supervised_propagation_activates_the_pair() {
		let mut store = HypergraphStore::new();
		let record = learn(
			&mut store,
			Content::text("greeting exchange"),
			LearningMethod::Supervised {
				input: Content::text("hello"),
				output: Content::text("bonjour"),
			},
		)
		.unwrap();

		let input = store
			.nodes()
			.find(|node| node.kind == "input")
			.map(|node| node.id.clone())
			.unwrap();
		let output = store
			.nodes()
			.find(|node| node.kind == "output")
			.map(|node| node.id.clone())
			.unwrap();

		// Record holds the seed; the pair sits one contextual hop away:
		// 0.9 × 0.8 × 0.9 = 0.648, above the learn cutoff.
		let expected = 0.9 * CONTEXT_LINK_STRENGTH * 0.9;
		assert!((store.get_node(&record).unwrap().activation() - 0.9).abs() < 1e-9);
		assert!((store.get_node(&input).unwrap().activation() - expected).abs() < 1e-9);
		assert!((store.get_node(&output).unwrap().activation() - expected).abs() < 1e-9);
	}

	#[test]
	fn test_seed_constants() {
		assert!((LearningMethod::Unsupervised.seed_activation() - 0.6).abs() < f64::EPSILON);
		assert!((LearningMethod::Meta.seed_activation() - 0.7).abs() < f64::EPSILON);
		assert!(
			(LearningMethod::Supervised {
				input: Content::text("x"),
				output: Content::text("y"),
			}
			.seed_activation()
				- 0.9)
				.abs() < f64::EPSILON
		);
	}
}
