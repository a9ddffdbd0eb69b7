use super::Choice;
use crate::{
	decl::DeclId,
	Ident
};
use source_span::Span;

/// Source operation.
///
/// Operations of an alternative are kept in source order: it is the order
/// of actions and list appends in the generated parser.
pub enum SrcOp {
	MatchToken(MatchToken),
	InvokeRule(InvokeRule),
	Action(Action),
	ForcedAction(ForcedAction),
	SemPred(SemPred),
	AddToLabelList(AddToLabelList),

	/// Nested alternation or repetition block.
	Choice(Box<Choice>)
}

impl SrcOp {
	/// Labels bound by this operation.
	pub fn labels(&self) -> &[DeclId] {
		match self {
			SrcOp::MatchToken(op) => &op.labels,
			SrcOp::InvokeRule(op) => &op.labels,
			_ => &[]
		}
	}

	/// Calls `f` on this operation then on every operation nested in it.
	pub fn visit<F: FnMut(&SrcOp)>(&self, f: &mut F) {
		f(self);

		if let SrcOp::Choice(choice) = self {
			for block in choice.alts() {
				block.visit_ops(f)
			}
		}
	}
}

/// Operation that may bind labels.
pub trait LabeledOp {
	fn labels(&self) -> &[DeclId];

	fn labels_mut(&mut self) -> &mut Vec<DeclId>;
}

pub struct MatchToken {
	pub name: Ident,
	pub labels: Vec<DeclId>,
	pub span: Span
}

impl LabeledOp for MatchToken {
	fn labels(&self) -> &[DeclId] {
		&self.labels
	}

	fn labels_mut(&mut self) -> &mut Vec<DeclId> {
		&mut self.labels
	}
}

impl From<MatchToken> for SrcOp {
	fn from(op: MatchToken) -> SrcOp {
		SrcOp::MatchToken(op)
	}
}

pub struct InvokeRule {
	pub name: Ident,

	/// Context type returned by the invoked rule.
	pub ctx_type: String,

	pub args: Option<String>,
	pub labels: Vec<DeclId>,
	pub span: Span
}

impl LabeledOp for InvokeRule {
	fn labels(&self) -> &[DeclId] {
		&self.labels
	}

	fn labels_mut(&mut self) -> &mut Vec<DeclId> {
		&mut self.labels
	}
}

impl From<InvokeRule> for SrcOp {
	fn from(op: InvokeRule) -> SrcOp {
		SrcOp::InvokeRule(op)
	}
}

/// Embedded action.
pub struct Action {
	pub code: String,
	pub span: Span
}

/// Action executed even while guessing.
pub struct ForcedAction {
	pub code: String,
	pub span: Span
}

/// Semantic predicate.
pub struct SemPred {
	pub code: String,
	pub span: Span
}

/// Appends the value bound to `label` to the `list` accumulator.
pub struct AddToLabelList {
	pub list: DeclId,
	pub label: DeclId
}
