use crate::{
	analysis::Symbol,
	grammar::ConstructKind,
	Ident
};
use source_span::Loc;
use std::fmt;

/// Model construction fault.
///
/// Model construction is deterministic: none of these errors can be
/// recovered from by retrying on the same input.
#[derive(Debug)]
pub enum Error {
	/// The analysis has no lookahead for this decision.
	UnknownDecision(u32),

	/// A multi-alternative or EBNF construct carries no decision index.
	MissingDecision(ConstructKind),

	/// The number of lookahead sets does not match the number of alternatives.
	LookaheadArity {
		decision: u32,
		alts: usize,
		sets: usize
	},

	/// Two alternatives of a decision classified as disjoint claim the same symbol.
	OverlappingAlternatives {
		decision: u32,
		symbol: Symbol,
		first: usize,
		second: usize
	},

	/// Rewrite reference to an element never matched by the alternative.
	UnresolvedReference(Ident),

	/// Rewrite clause found outside of a rule alternative.
	RewriteOutsideAlternative,

	/// Rewrite tree whose root is not a single element.
	InvalidTreeRoot
}

/// Fault category.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Fault {
	/// Internal consistency fault of the upstream analysis or classifier.
	Invariant,

	/// Reference that upstream validation should have rejected.
	Unresolved,

	/// Construct whose shape the builder cannot handle.
	Malformed
}

impl Error {
	pub fn fault(&self) -> Fault {
		match self {
			Error::OverlappingAlternatives { .. } => Fault::Invariant,
			Error::UnresolvedReference(_) => Fault::Unresolved,
			Error::UnknownDecision(_)
			| Error::MissingDecision(_)
			| Error::LookaheadArity { .. }
			| Error::RewriteOutsideAlternative
			| Error::InvalidTreeRoot => Fault::Malformed
		}
	}

	pub fn title(&self) -> &'static str {
		match self.fault() {
			Fault::Invariant => "internal consistency fault",
			Fault::Unresolved => "unresolved reference",
			Fault::Malformed => "malformed construct"
		}
	}
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Error::UnknownDecision(d) => write!(f, "no lookahead for decision {}", d),
			Error::MissingDecision(kind) => write!(f, "{:?} construct has no decision index", kind),
			Error::LookaheadArity {
				decision,
				alts,
				sets
			} => write!(
				f,
				"decision {} has {} alternatives but {} lookahead sets",
				decision, alts, sets
			),
			Error::OverlappingAlternatives {
				decision,
				symbol,
				first,
				second
			} => write!(
				f,
				"alternatives {} and {} of disjoint decision {} both predict {}",
				first + 1,
				second + 1,
				decision,
				symbol
			),
			Error::UnresolvedReference(id) => write!(f, "`{}` is never matched by the alternative", id),
			Error::RewriteOutsideAlternative => write!(f, "tree rewrite outside of an alternative"),
			Error::InvalidTreeRoot => write!(f, "tree root must be a single element")
		}
	}
}

pub type Result<T> = std::result::Result<T, Loc<Error>>;
