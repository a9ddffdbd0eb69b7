//! Lookahead data produced by the grammar analysis, and the decision classifier.
use itertools::Itertools;
use std::collections::{
	btree_set,
	BTreeSet,
	HashMap
};
use std::fmt;
use std::iter::FromIterator;

/// Lookahead symbol.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum Symbol {
	/// Token type.
	Token(u32),

	/// End of stream.
	Eof,

	/// Empty lookahead (the alternative may match nothing).
	Epsilon
}

impl fmt::Display for Symbol {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Token(t) => write!(f, "#{}", t),
			Self::Eof => write!(f, "EOF"),
			Self::Epsilon => write!(f, "<epsilon>")
		}
	}
}

/// Set of lookahead symbols.
#[derive(Clone, Default, PartialEq, Eq, Hash, Debug)]
pub struct TokenSet {
	symbols: BTreeSet<Symbol>
}

impl TokenSet {
	pub fn new() -> Self {
		Self::default()
	}

	/// Set of the given token types.
	pub fn of<I: IntoIterator<Item = u32>>(tokens: I) -> Self {
		tokens.into_iter().map(Symbol::Token).collect()
	}

	pub fn insert(&mut self, symbol: Symbol) -> bool {
		self.symbols.insert(symbol)
	}

	pub fn contains(&self, symbol: Symbol) -> bool {
		self.symbols.contains(&symbol)
	}

	pub fn len(&self) -> usize {
		self.symbols.len()
	}

	pub fn is_empty(&self) -> bool {
		self.symbols.is_empty()
	}

	pub fn is_disjoint(&self, other: &TokenSet) -> bool {
		self.symbols.is_disjoint(&other.symbols)
	}

	pub fn iter(&self) -> btree_set::Iter<'_, Symbol> {
		self.symbols.iter()
	}

	/// Token types in this set, in increasing order.
	pub fn tokens(&self) -> impl '_ + Iterator<Item = u32> {
		self.symbols.iter().filter_map(|s| match s {
			Symbol::Token(t) => Some(*t),
			_ => None
		})
	}
}

impl FromIterator<Symbol> for TokenSet {
	fn from_iter<I: IntoIterator<Item = Symbol>>(iter: I) -> Self {
		Self {
			symbols: iter.into_iter().collect()
		}
	}
}

impl<'a> IntoIterator for &'a TokenSet {
	type Item = &'a Symbol;
	type IntoIter = btree_set::Iter<'a, Symbol>;

	fn into_iter(self) -> Self::IntoIter {
		self.symbols.iter()
	}
}

impl fmt::Display for TokenSet {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{{{}}}", self.symbols.iter().join(", "))
	}
}

/// Returns `true` iff no two alternatives' lookahead sets intersect.
///
/// A decision with zero or one alternative is trivially disjoint.
pub fn is_disjoint<'a, I>(sets: I) -> bool
where
	I: IntoIterator<Item = &'a TokenSet>,
	I::IntoIter: Clone,
{
	sets.into_iter()
		.tuple_combinations()
		.all(|(a, b): (&TokenSet, &TokenSet)| a.is_disjoint(b))
}

/// Lookahead computed for one decision.
#[derive(Clone, Default, Debug)]
pub struct DecisionLook {
	/// One set per alternative, in alternative order.
	pub alts: Vec<TokenSet>,

	/// Lookahead of the exit branch of an optional or repeated block, if known.
	pub exit: Option<TokenSet>
}

impl DecisionLook {
	pub fn new(alts: Vec<TokenSet>) -> Self {
		Self { alts, exit: None }
	}

	pub fn with_exit(mut self, exit: TokenSet) -> Self {
		self.exit = Some(exit);
		self
	}
}

/// Access to per-decision lookahead by decision index.
pub trait LookaheadSource {
	fn lookahead(&self, decision: u32) -> Option<&DecisionLook>;
}

/// Per-decision lookahead table.
///
/// Read-only once built; it can be shared between threads generating
/// distinct rules.
#[derive(Clone, Default, Debug)]
pub struct Decisions {
	map: HashMap<u32, DecisionLook>
}

impl Decisions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&mut self, decision: u32, look: DecisionLook) {
		self.map.insert(decision, look);
	}

	/// Builder-style insertion of a decision without exit branch lookahead.
	pub fn with(mut self, decision: u32, alts: Vec<TokenSet>) -> Self {
		self.insert(decision, DecisionLook::new(alts));
		self
	}

	pub fn len(&self) -> usize {
		self.map.len()
	}

	pub fn is_empty(&self) -> bool {
		self.map.is_empty()
	}
}

impl LookaheadSource for Decisions {
	fn lookahead(&self, decision: u32) -> Option<&DecisionLook> {
		self.map.get(&decision)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn trivially_disjoint() {
		assert!(is_disjoint(&Vec::<TokenSet>::new()));
		assert!(is_disjoint(&[TokenSet::of(vec![1, 2])]));
	}

	#[test]
	fn overlapping_sets() {
		let sets = [TokenSet::of(vec![1, 2]), TokenSet::of(vec![3]), TokenSet::of(vec![2])];
		assert!(!is_disjoint(&sets));
		assert!(is_disjoint(&sets[..2]));
	}

	#[test]
	fn epsilon_collides() {
		let a: TokenSet = vec![Symbol::Token(1), Symbol::Epsilon].into_iter().collect();
		let b: TokenSet = vec![Symbol::Epsilon].into_iter().collect();
		assert!(!is_disjoint(&[a, b]));
	}

	#[test]
	fn display() {
		let set: TokenSet = vec![Symbol::Eof, Symbol::Token(4)].into_iter().collect();
		assert_eq!(set.to_string(), "{#4, EOF}");
	}

	#[test]
	fn ordered_iteration() {
		let set = TokenSet::of(vec![7, 3, 5]);
		let symbols: Vec<Symbol> = set.iter().cloned().collect();
		assert_eq!(symbols, vec![Symbol::Token(3), Symbol::Token(5), Symbol::Token(7)]);
		assert_eq!(set.tokens().collect::<Vec<_>>(), vec![3, 5, 7]);
	}
}
