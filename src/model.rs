//! Render-ready output model.
//!
//! Each rule produces a [`RuleFunction`] that owns every operation and
//! declaration created for it. Nothing is shared between rules.
use crate::{
	decl::{
		Decl,
		Decls
	},
	Ident
};

pub mod choice;
pub mod op;
pub mod rewrite;

pub use choice::*;
pub use op::*;
pub use rewrite::*;

/// Output model of a whole grammar.
pub struct ParserModel {
	pub grammar: Ident,
	pub rules: Vec<RuleFunction>
}

impl ParserModel {
	pub fn rule(&self, name: &str) -> Option<&RuleFunction> {
		self.rules.iter().find(|r| r.name == *name)
	}
}

/// Parsing function of a rule.
pub struct RuleFunction {
	pub name: Ident,

	/// Context type returned by the function.
	pub ctx_type: String,

	pub body: Body,

	/// Every declaration created for this rule.
	pub decls: Decls
}

impl RuleFunction {
	/// Declaration of this rule.
	///
	/// Panics if `id` belongs to another rule.
	pub fn decl(&self, id: crate::decl::DeclId) -> &Decl {
		self.decls.get(id)
	}

	/// Rule-level local variables, in declaration order.
	pub fn locals(&self) -> impl '_ + Iterator<Item = &Decl> {
		self.decls.locals().iter().map(move |id| self.decls.get(*id))
	}

	/// Code blocks of the outer alternatives.
	pub fn alts(&self) -> Vec<&CodeBlock> {
		match &self.body {
			Body::Alt(block) => vec![block],
			Body::Choice(choice) => choice.alts()
		}
	}

	/// Visits every operation of the rule, depth first, in source order.
	pub fn visit_ops<F: FnMut(&SrcOp)>(&self, mut f: F) {
		for block in self.alts() {
			block.visit_ops(&mut f)
		}
	}

	/// Visits every choice of the rule, the outer one first.
	pub fn visit_choices<F: FnMut(&Choice)>(&self, mut f: F) {
		if let Body::Choice(choice) = &self.body {
			f(choice)
		}

		self.visit_ops(|op| {
			if let SrcOp::Choice(choice) = op {
				f(&**choice)
			}
		})
	}
}

pub enum Body {
	/// Single outer alternative.
	Alt(CodeBlock),

	/// Choice between the outer alternatives.
	Choice(Choice)
}

/// Operations of one alternative, in source order.
#[derive(Default)]
pub struct CodeBlock {
	pub ops: Vec<SrcOp>,

	/// Tree construction, for outer alternatives with a rewrite clause.
	pub rewrite: Option<TreeRewrite>
}

impl CodeBlock {
	pub fn new(ops: Vec<SrcOp>) -> Self {
		Self { ops, rewrite: None }
	}

	pub fn visit_ops<F: FnMut(&SrcOp)>(&self, f: &mut F) {
		for op in &self.ops {
			op.visit(f)
		}
	}
}
