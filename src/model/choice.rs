use super::CodeBlock;
use crate::{
	analysis::{
		Symbol,
		TokenSet
	},
	grammar::ConstructKind
};
use itertools::Itertools;
use source_span::Span;

/// Choice or repetition model of one decision.
pub struct Choice {
	/// Decision index in the analysis data.
	pub decision: u32,

	pub kind: ConstructKind,
	pub shape: Shape,
	pub span: Span
}

/// Dispatch strategy and alternative layout of a choice.
pub enum Shape {
	/// Single-token dispatch between several alternatives.
	Ll1 {
		alts: Vec<Ll1Alt>,
		exit: Option<InlineTest>
	},

	/// Single-token dispatch of an optional or repeated single alternative.
	Ll1SingleAlt {
		alt: Ll1Alt,
		exit: Option<InlineTest>
	},

	/// Full predictive dispatch, resolved at runtime through the decision index.
	Predictive { alts: Vec<CodeBlock> }
}

/// Alternative selected by a single-token test.
pub struct Ll1Alt {
	pub test: InlineTest,
	pub block: CodeBlock
}

/// Template selection tag of a choice.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Variant {
	Ll1AltBlock,
	Ll1OptionalBlock,
	Ll1OptionalBlockSingleAlt,
	Ll1StarBlock,
	Ll1StarBlockSingleAlt,
	Ll1PlusBlock,
	Ll1PlusBlockSingleAlt,
	AltBlock,
	OptionalBlock,
	StarBlock,
	PlusBlock
}

impl Choice {
	pub fn variant(&self) -> Variant {
		use ConstructKind::*;
		match (&self.shape, self.kind) {
			(Shape::Ll1 { .. }, Block) | (Shape::Ll1SingleAlt { .. }, Block) => Variant::Ll1AltBlock,
			(Shape::Ll1 { .. }, Optional) => Variant::Ll1OptionalBlock,
			(Shape::Ll1SingleAlt { .. }, Optional) => Variant::Ll1OptionalBlockSingleAlt,
			(Shape::Ll1 { .. }, Closure) => Variant::Ll1StarBlock,
			(Shape::Ll1SingleAlt { .. }, Closure) => Variant::Ll1StarBlockSingleAlt,
			(Shape::Ll1 { .. }, PositiveClosure) => Variant::Ll1PlusBlock,
			(Shape::Ll1SingleAlt { .. }, PositiveClosure) => Variant::Ll1PlusBlockSingleAlt,
			(Shape::Predictive { .. }, Block) => Variant::AltBlock,
			(Shape::Predictive { .. }, Optional) => Variant::OptionalBlock,
			(Shape::Predictive { .. }, Closure) => Variant::StarBlock,
			(Shape::Predictive { .. }, PositiveClosure) => Variant::PlusBlock
		}
	}

	pub fn is_predictive(&self) -> bool {
		matches!(self.shape, Shape::Predictive { .. })
	}

	pub fn alts(&self) -> Vec<&CodeBlock> {
		match &self.shape {
			Shape::Ll1 { alts, .. } => alts.iter().map(|a| &a.block).collect(),
			Shape::Ll1SingleAlt { alt, .. } => vec![&alt.block],
			Shape::Predictive { alts } => alts.iter().collect()
		}
	}

	/// Inline tests selecting each alternative (empty for predictive dispatch).
	pub fn tests(&self) -> Vec<&InlineTest> {
		match &self.shape {
			Shape::Ll1 { alts, .. } => alts.iter().map(|a| &a.test).collect(),
			Shape::Ll1SingleAlt { alt, .. } => vec![&alt.test],
			Shape::Predictive { .. } => Vec::new()
		}
	}

	pub fn exit_test(&self) -> Option<&InlineTest> {
		match &self.shape {
			Shape::Ll1 { exit, .. } | Shape::Ll1SingleAlt { exit, .. } => exit.as_ref(),
			Shape::Predictive { .. } => None
		}
	}
}

/// Inline lookahead test.
#[derive(Clone, Debug)]
pub struct InlineTest {
	/// Alternative selected by this test (`None` for an exit branch).
	pub alt: Option<usize>,

	pub look: TokenSet,

	/// Token types grouped by 64-bit word, in increasing order.
	pub words: Vec<BitsetWord>,

	/// The test accepts the end of stream.
	pub eof: bool
}

/// Token types `shift..shift + 64` of a test.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BitsetWord {
	pub shift: u32,
	pub mask: u64,
	pub tokens: Vec<u32>
}

impl InlineTest {
	pub fn new(alt: Option<usize>, look: TokenSet) -> Self {
		let words = {
			let groups = look.tokens().group_by(|t| t / 64);
			let words: Vec<BitsetWord> = groups
				.into_iter()
				.map(|(word, tokens)| {
					let tokens: Vec<u32> = tokens.collect();
					BitsetWord {
						shift: word * 64,
						mask: tokens.iter().fold(0, |mask, t| mask | 1u64 << (t % 64)),
						tokens
					}
				})
				.collect();
			words
		};

		let eof = look.contains(Symbol::Eof);
		InlineTest {
			alt,
			look,
			words,
			eof
		}
	}
}
