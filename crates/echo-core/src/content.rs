//! Content values, patterns, and the literal matcher.
//!
//! Node content is an opaque value: a symbol, a piece of text, a number,
//! or a nested list of values. Patterns mirror that shape and add two
//! operators:
//!
//! - the wildcard, which matches any content, and
//! - variables (`?x`), which bind during structural matching and are
//!   rejected by the literal matcher.
//!
//! The literal matcher is a pure boolean predicate: no partial matches,
//! no bindings. It drives `recall` and constraint checks.

use serde::{Deserialize, Serialize};

use crate::error::{MemoryError, Result};

// ============================================================================
// Content
// ============================================================================

/// An opaque content value carried by a node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Content {
	/// A symbolic tag (`concept`, `cat`, ...)
	Symbol(String),
	/// Free text
	Text(String),
	/// A numeric scalar
	Number(f64),
	/// A nested list of values
	List(Vec<Content>),
}

impl Content {
	/// Build a symbol value.
	#[must_use]
	pub fn symbol(name: impl Into<String>) -> Self {
		Self::Symbol(name.into())
	}

	/// Build a text value.
	#[must_use]
	pub fn text(value: impl Into<String>) -> Self {
		Self::Text(value.into())
	}

	/// Build a list value.
	#[must_use]
	pub fn list(items: impl Into<Vec<Content>>) -> Self {
		Self::List(items.into())
	}
}

impl From<&str> for Content {
	fn from(value: &str) -> Self {
		Self::Text(value.to_owned())
	}
}

impl From<String> for Content {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}

impl From<f64> for Content {
	fn from(value: f64) -> Self {
		Self::Number(value)
	}
}

impl From<Vec<Content>> for Content {
	fn from(items: Vec<Content>) -> Self {
		Self::List(items)
	}
}

// ============================================================================
// Patterns
// ============================================================================

/// A pattern over content values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Pattern {
	/// Matches any content.
	Any,
	/// Matches content equal to the given value.
	Exact(Content),
	/// Matches a list of equal length, element-wise.
	Seq(Vec<Pattern>),
	/// A structural variable (`?x`). Binds to a node during structural
	/// matching; invalid in literal content matching.
	Var(String),
}

impl Pattern {
	/// Build an exact-match pattern from a content value.
	#[must_use]
	pub fn exact(value: impl Into<Content>) -> Self {
		Self::Exact(value.into())
	}

	/// Build a variable pattern. The `?` sigil is added if missing, so
	/// `Pattern::var("x")` and `Pattern::var("?x")` name the same variable.
	#[must_use]
	pub fn var(name: impl Into<String>) -> Self {
		let name = name.into();
		if name.starts_with('?') {
			Self::Var(name)
		} else {
			Self::Var(format!("?{name}"))
		}
	}

	/// Validate that this pattern contains no structural variables.
	///
	/// The literal matcher produces no bindings, so a variable inside a
	/// content pattern is malformed.
	///
	/// # Errors
	///
	/// Returns [`MemoryError::InvalidPattern`] if a variable occurs anywhere
	/// in the pattern.
	pub fn expect_literal(&self) -> Result<()> {
		match self {
			Self::Any | Self::Exact(_) => Ok(()),
			Self::Var(name) => Err(MemoryError::InvalidPattern(format!(
				"variable {name} is not allowed in a content pattern"
			))),
			Self::Seq(elements) => {
				for element in elements {
					element.expect_literal()?;
				}
				Ok(())
			}
		}
	}
}

impl From<Content> for Pattern {
	fn from(value: Content) -> Self {
		Self::Exact(value)
	}
}

/// Literal content match: a pure boolean predicate.
///
/// - the wildcard matches any content;
/// - an exact pattern matches by structural equality;
/// - a sequence pattern matches a list of equal length, element-wise;
/// - variables never match here (validate with [`Pattern::expect_literal`]
///   before calling if variables should be an error instead).
#[must_use]
pub fn content_matches(content: &Content, pattern: &Pattern) -> bool {
	match pattern {
		Pattern::Any => true,
		Pattern::Var(_) => false,
		Pattern::Exact(value) => content == value,
		Pattern::Seq(elements) => match content {
			Content::List(items) => {
				items.len() == elements.len()
					&& items
						.iter()
						.zip(elements.iter())
						.all(|(item, element)| content_matches(item, element))
			}
			_ => false,
		},
	}
}

// ============================================================================
// Echo State
// ============================================================================

/// Per-node echo state, stored as a node property.
///
/// `decay_rate` is reserved for temporal decay; no operation in this
/// crate applies it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EchoState {
	/// Current propagated signal strength
	pub activation: f64,
	/// Minimum activation for this node to re-emit
	pub threshold: f64,
	/// Reserved temporal decay rate
	pub decay_rate: f64,
	/// Opaque spatial context
	pub spatial_position: Option<Content>,
	/// Opaque emotional context
	pub emotional_resonance: Option<Content>,
}

/// Default echo threshold: a node re-emits only above this activation.
pub const DEFAULT_ECHO_THRESHOLD: f64 = 0.75;

/// Default reserved decay rate.
pub const DEFAULT_ECHO_DECAY_RATE: f64 = 0.05;

impl Default for EchoState {
	fn default() -> Self {
		Self {
			activation: 0.0,
			threshold: DEFAULT_ECHO_THRESHOLD,
			decay_rate: DEFAULT_ECHO_DECAY_RATE,
			spatial_position: None,
			emotional_resonance: None,
		}
	}
}

// ============================================================================
// Properties
// ============================================================================

/// A value in a node's or link's open-ended property map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
	/// A numeric property (`activation`, ...)
	Number(f64),
	/// A text property
	Text(String),
	/// A boolean property
	Flag(bool),
	/// Echo state (`echo-state`)
	Echo(EchoState),
	/// An arbitrary content value
	Value(Content),
}

impl PropertyValue {
	/// Read this property as a number, if it is one.
	#[must_use]
	pub fn as_number(&self) -> Option<f64> {
		match self {
			Self::Number(value) => Some(*value),
			_ => None,
		}
	}
}
