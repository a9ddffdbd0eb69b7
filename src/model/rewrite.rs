//! Tree-construction model of a rewrite clause.
use crate::{
	decl::{
		DeclId,
		ScopeId
	},
	Ident
};
use source_span::Span;

/// Top-level tree rewrite of an alternative.
pub struct TreeRewrite {
	/// Scope of the iterators declared by the rewrite.
	pub scope: ScopeId,

	pub tree_level: u32,
	pub code_level: u32,

	/// Root of the output tree (level `0`).
	pub root: DeclId,

	/// Local declarations of the rewrite: the root then the iterators.
	pub decls: Vec<DeclId>,

	/// Iterator initializations, run before `ops`.
	pub preamble: Vec<IteratorInit>,

	pub ops: Vec<RewriteOp>,
	pub span: Span
}

/// `( ... )?` rewrite subtree.
pub struct RewriteOptional {
	pub scope: ScopeId,
	pub tree_level: u32,
	pub code_level: u32,

	/// Iterators of the elements directly under the subtree.
	pub decls: Vec<DeclId>,

	/// Iterators of the elements only reachable through a nested optional
	/// or closure subtree.
	pub nested_decls: Vec<DeclId>,

	pub preamble: Vec<IteratorInit>,
	pub ops: Vec<RewriteOp>
}

/// `( ... )*` rewrite subtree.
pub struct RewriteClosure {
	pub scope: ScopeId,
	pub tree_level: u32,
	pub code_level: u32,

	/// Iterators consumed once per iteration.
	pub iterator_decls: Vec<DeclId>,

	pub preamble: Vec<IteratorInit>,
	pub ops: Vec<RewriteOp>
}

/// `^(root children...)` rewrite subtree.
pub struct RewriteTreeStructure {
	pub tree_level: u32,
	pub code_level: u32,

	/// Root of this subtree.
	pub root: DeclId,

	pub ops: Vec<RewriteOp>,
	pub span: Span
}

pub enum RewriteOp {
	Element(RewriteElement),
	Tree(RewriteTreeStructure),
	Optional(RewriteOptional),
	Closure(RewriteClosure)
}

impl RewriteOp {
	/// Calls `f` on every element reachable from this operation, in clause order.
	pub fn visit_elements<'a, F: FnMut(&'a RewriteElement)>(&'a self, f: &mut F) {
		let ops = match self {
			RewriteOp::Element(e) => return f(e),
			RewriteOp::Tree(t) => &t.ops,
			RewriteOp::Optional(o) => &o.ops,
			RewriteOp::Closure(c) => &c.ops
		};

		for op in ops {
			op.visit_elements(f)
		}
	}
}

impl TreeRewrite {
	pub fn visit_elements<'a, F: FnMut(&'a RewriteElement)>(&'a self, mut f: F) {
		for op in &self.ops {
			op.visit_elements(&mut f)
		}
	}
}

/// Initializes an iterator from the tracked matches of its element.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct IteratorInit {
	pub iterator: DeclId
}

/// Position of an element in the tree being built.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Attach {
	/// Becomes the root of the current tree level.
	Root,

	/// Becomes a child of the current root.
	Child
}

/// Element of a rewrite clause.
pub struct RewriteElement {
	pub target: RewriteTarget,
	pub attach: Attach,

	/// Root variable of the current tree level.
	pub root: String,

	pub span: Span
}

/// What a rewrite element puts in the tree.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum RewriteTarget {
	/// New token node, not read from the input.
	Imaginary { token: Ident, arg: Option<String> },

	/// Token matched by the alternative.
	Token { name: Ident, iterator: DeclId },

	/// Result of a rule invoked by the alternative.
	Rule { name: Ident, iterator: DeclId },

	/// Value bound to a label of the alternative.
	Label { name: Ident, iterator: DeclId },

	/// The tree accumulated so far by the enclosing rule itself.
	SelfRoot { rule: Ident },

	/// Value of an action.
	Action { code: String }
}
