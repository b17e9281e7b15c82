//! Echo Propagation Example
//!
//! Builds a small concept graph, sends an echo through it, and shows how
//! activation decays per hop before recall and forget round out the
//! lifecycle.
//!
//! Run with: `cargo run --example echo_propagation`

#![allow(clippy::unwrap_used)] // Fine in examples

use echo_core::{
	propagate, resonate, Content, HypergraphStore, Pattern, PropagationConfig,
};

fn main() {
	println!("=== Echo Propagation ===\n");

	// A small concept neighbourhood:
	//
	//   cat ──0.9── feline ──0.8── lion
	//    │
	//   0.6
	//    │
	//   pet ──0.7── dog
	//
	// An echo seeded at "cat" decays across each link (strength × 0.9
	// damping per hop) until it falls below the cutoff.

	let mut store = HypergraphStore::new();
	let cat = store.remember(Content::text("cat"), None).unwrap();
	let feline = store.remember(Content::text("feline"), None).unwrap();
	let lion = store.remember(Content::text("lion"), None).unwrap();
	let pet = store.remember(Content::text("pet"), None).unwrap();
	let dog = store.remember(Content::text("dog"), None).unwrap();

	let _ = store.create_link(&cat, &feline, "maps-to", 0.9).unwrap();
	let _ = store.create_link(&feline, &lion, "maps-to", 0.8).unwrap();
	let _ = store.create_link(&cat, &pet, "contextual", 0.6).unwrap();
	let _ = store.create_link(&pet, &dog, "maps-to", 0.7).unwrap();

	let labels = [
		(&cat, "cat"),
		(&feline, "feline"),
		(&lion, "lion"),
		(&pet, "pet"),
		(&dog, "dog"),
	];

	println!("--- propagate(cat, threshold = 0.1) ---\n");
	let outcome = propagate(&mut store, &cat, &PropagationConfig::with_threshold(0.1)).unwrap();
	for (id, label) in &labels {
		match outcome.activation_of(id) {
			Some(activation) => println!("  {label:8} activation {activation:.4}"),
			None => println!("  {label:8} (echo died out before reaching it)"),
		}
	}

	println!("\n--- recall(\"cat\") ---\n");
	let found: Vec<_> = store
		.recall(&Pattern::exact("cat"), &[])
		.unwrap()
		.cloned()
		.collect();
	println!("  matches: {found:?}");

	println!("\n--- resonate(\"feline\", frequency = 2.0) ---\n");
	let outcomes = resonate(&mut store, &Pattern::exact("feline"), 2.0).unwrap();
	println!(
		"  {} run(s), first visited {} node(s) at cutoff 0.2",
		outcomes.len(),
		outcomes[0].visited_count()
	);

	println!("\n--- forget(\"cat\") ---\n");
	let removed = store.forget(&Pattern::exact("cat"), 0.1).unwrap();
	println!("  removed: {removed:?}");
	println!(
		"  feline now connects to {} node(s) (dangling links pruned)",
		store.get_connected(&feline).count()
	);

	let status = store.status();
	println!(
		"\nstatus: {} nodes, {} links, ~{} bytes",
		status.node_count, status.link_count, status.estimated_memory_bytes
	);
}
