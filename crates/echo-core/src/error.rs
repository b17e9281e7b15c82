//! Error types for memory operations.

/// Errors that can occur during hypergraph memory operations.
#[derive(Debug, thiserror::Error)]
pub enum MemoryError {
	/// An operation referenced a node or link id absent from the store.
	#[error("no node or link with id: {id}")]
	NotFound {
		/// The identifier that failed to resolve
		id: String,
	},

	/// A malformed pattern was passed to a matcher.
	#[error("invalid pattern: {0}")]
	InvalidPattern(String),

	/// An argument was outside its valid domain.
	#[error("invalid argument: {0}")]
	InvalidArgument(String),

	/// Propagation exceeded its visit budget without converging.
	///
	/// The visited-set invariant makes this unreachable on a well-formed
	/// store; it exists as a runaway-graph guard.
	#[error("propagation visited {visited} nodes without converging (budget {budget})")]
	CycleGuardExhausted {
		/// Nodes visited before the guard tripped
		visited: usize,
		/// The configured visit budget
		budget: usize,
	},
}

impl MemoryError {
	/// Build a `NotFound` error for the given identifier.
	#[must_use]
	pub fn not_found(id: impl Into<String>) -> Self {
		Self::NotFound { id: id.into() }
	}

	/// Check if this error means an id failed to resolve.
	#[must_use]
	pub fn is_not_found(&self) -> bool {
		matches!(self, Self::NotFound { .. })
	}

	/// Check if this error indicates a caller-side pattern or argument problem.
	#[must_use]
	pub fn is_invalid_input(&self) -> bool {
		matches!(self, Self::InvalidPattern(_) | Self::InvalidArgument(_))
	}
}

/// Result type alias for memory operations.
pub type Result<T> = std::result::Result<T, MemoryError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_not_found_helper() {
		let err = MemoryError::not_found("node-7");
		assert!(err.is_not_found());
		assert!(!err.is_invalid_input());
		assert_eq!(err.to_string(), "no node or link with id: node-7");
	}

	#[test]
	fn test_invalid_input_classification() {
		assert!(MemoryError::InvalidPattern("empty".into()).is_invalid_input());
		assert!(MemoryError::InvalidArgument("strength 1.5".into()).is_invalid_input());
		assert!(!MemoryError::CycleGuardExhausted {
			visited: 10,
			budget: 10
		}
		.is_invalid_input());
	}
}
