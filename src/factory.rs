//! Output model factory.
//!
//! [`OutputModelFactory`] is the capability interface the generator drives
//! while walking a rule. Every hook has a default implementation, found in
//! the [`ops`], [`choice`] and [`rewrite`] modules; a concrete factory only
//! has to provide the naming service and the lookahead data, and may
//! override any hook to change how part of the model is built.
use crate::{
	analysis::{
		self,
		DecisionLook,
		LookaheadSource,
		TokenSet
	},
	decl::{
		DeclId,
		Decls,
		ScopeId
	},
	grammar::{
		Alternative,
		ConstructKind,
		ElementRef,
		Label,
		RewriteClause,
		RewriteItem,
		Rule
	},
	model::{
		AddToLabelList,
		Attach,
		Choice,
		CodeBlock,
		InlineTest,
		LabeledOp,
		RewriteClosure,
		RewriteElement,
		RewriteOptional,
		RewriteTreeStructure,
		SrcOp,
		TreeRewrite
	},
	naming::{
		DefaultNaming,
		Naming
	},
	Ident,
	Result
};
use source_span::{
	Loc,
	Span
};

pub mod choice;
pub mod ops;
pub mod rewrite;

pub use ops::RefKind;

/// Mutable state of the rule being built.
///
/// A scope is created per rule and never shared between rules.
pub struct RuleScope<'g> {
	rule: &'g Rule,

	/// Outer alternative being built.
	alt: Option<&'g Alternative>,

	decls: Decls,

	/// Nesting depth of `^(...)` rewrite trees.
	tree_level: u32,

	/// Nesting depth of optional and closure rewrite subtrees.
	code_level: u32,

	/// Enclosing rewrite subtrees declaring iterators, innermost last.
	iterations: Vec<ScopeId>
}

impl<'g> RuleScope<'g> {
	pub fn new(rule: &'g Rule) -> Self {
		Self {
			rule,
			alt: None,
			decls: Decls::new(),
			tree_level: 0,
			code_level: 0,
			iterations: Vec::new()
		}
	}

	pub fn rule(&self) -> &'g Rule {
		self.rule
	}

	pub fn alt(&self) -> Option<&'g Alternative> {
		self.alt
	}

	pub fn set_alt(&mut self, alt: &'g Alternative) {
		self.alt = Some(alt)
	}

	pub fn decls(&self) -> &Decls {
		&self.decls
	}

	pub fn decls_mut(&mut self) -> &mut Decls {
		&mut self.decls
	}

	pub fn into_decls(self) -> Decls {
		self.decls
	}

	pub fn tree_level(&self) -> u32 {
		self.tree_level
	}

	pub fn code_level(&self) -> u32 {
		self.code_level
	}

	pub fn enter_tree(&mut self) {
		self.tree_level += 1
	}

	pub fn exit_tree(&mut self) {
		self.tree_level -= 1
	}

	pub fn enter_code_block(&mut self) {
		self.code_level += 1
	}

	pub fn exit_code_block(&mut self) {
		self.code_level -= 1
	}

	pub fn enter_iteration(&mut self, scope: ScopeId) {
		self.iterations.push(scope)
	}

	pub fn exit_iteration(&mut self) {
		self.iterations.pop();
	}

	/// Innermost rewrite subtree declaring iterators.
	pub fn iteration(&self) -> Option<ScopeId> {
		self.iterations.last().cloned()
	}

	/// Current outer alternative, required while building rewrites.
	pub fn require_alt(&self, span: Span) -> Result<&'g Alternative> {
		self.alt
			.ok_or_else(|| Loc::new(crate::Error::RewriteOutsideAlternative, span))
	}
}

/// Builds the output model nodes.
pub trait OutputModelFactory {
	fn naming(&self) -> &dyn Naming;

	fn lookahead(&self, decision: u32) -> Option<&DecisionLook>;

	/// Token match, its implicit label and list append.
	fn token_ref(&self, scope: &mut RuleScope, r: &ElementRef) -> Vec<SrcOp> {
		ops::token_ref(self, scope, r)
	}

	/// Rule invocation, its implicit label and list append.
	fn rule_ref(&self, scope: &mut RuleScope, r: &ElementRef) -> Vec<SrcOp> {
		ops::rule_ref(self, scope, r)
	}

	fn action(&self, code: &Loc<String>) -> Vec<SrcOp> {
		ops::action(code)
	}

	fn forced_action(&self, code: &Loc<String>) -> Vec<SrcOp> {
		ops::forced_action(code)
	}

	fn sempred(&self, code: &Loc<String>) -> Vec<SrcOp> {
		ops::sempred(code)
	}

	/// Checks if an unlabeled element must be bound to an implicit label.
	fn needs_implicit_label(&self, scope: &RuleScope, name: &Ident, op: &dyn LabeledOp) -> bool {
		ops::needs_implicit_label(scope, name, op)
	}

	fn define_implicit_label(&self, scope: &mut RuleScope, r: &ElementRef, kind: RefKind) -> DeclId {
		ops::define_implicit_label(self, scope, r, kind)
	}

	/// List accumulator of the label, if it uses the `+=` form.
	fn list_label_for(&self, scope: &mut RuleScope, label: &Label, element: &ElementRef, kind: RefKind) -> Option<DeclId> {
		ops::list_label_for(self, scope, label, element, kind)
	}

	fn add_to_label_list(&self, list: DeclId, label: DeclId) -> SrcOp {
		SrcOp::AddToLabelList(AddToLabelList { list, label })
	}

	/// Decision classifier.
	fn is_disjoint(&self, look: &[TokenSet]) -> bool {
		analysis::is_disjoint(look)
	}

	/// Choice or repetition model of a decision.
	fn build_choice(&self, kind: ConstructKind, decision: u32, span: Span, alts: Vec<CodeBlock>) -> Result<Choice> {
		choice::build_choice(self, kind, decision, span, alts)
	}

	fn ll1_test(&self, alt: Option<usize>, look: &TokenSet) -> InlineTest {
		InlineTest::new(alt, look.clone())
	}

	/// Top-level tree rewrite, with its root and iterators declared.
	fn tree_rewrite(&self, scope: &mut RuleScope, clause: &RewriteClause) -> Result<TreeRewrite> {
		rewrite::tree_rewrite(self, scope, clause)
	}

	fn rewrite_optional(&self, scope: &mut RuleScope, items: &[RewriteItem]) -> Result<RewriteOptional> {
		rewrite::rewrite_optional(self, scope, items)
	}

	fn rewrite_closure(&self, scope: &mut RuleScope, items: &[RewriteItem]) -> Result<RewriteClosure> {
		rewrite::rewrite_closure(self, scope, items)
	}

	fn rewrite_tree(&self, scope: &mut RuleScope, span: Span) -> RewriteTreeStructure {
		rewrite::rewrite_tree(self, scope, span)
	}

	fn rewrite_token_ref(
		&self,
		scope: &mut RuleScope,
		name: &Loc<Ident>,
		arg: Option<&Loc<String>>,
		attach: Attach
	) -> Result<RewriteElement> {
		rewrite::rewrite_token_ref(self, scope, name, arg, attach)
	}

	fn rewrite_rule_ref(&self, scope: &mut RuleScope, name: &Loc<Ident>, attach: Attach) -> Result<RewriteElement> {
		rewrite::rewrite_rule_ref(self, scope, name, attach)
	}

	fn rewrite_label_ref(&self, scope: &mut RuleScope, name: &Loc<Ident>, attach: Attach) -> Result<RewriteElement> {
		rewrite::rewrite_label_ref(self, scope, name, attach)
	}

	fn rewrite_action(&self, scope: &mut RuleScope, code: &Loc<String>, attach: Attach) -> RewriteElement {
		rewrite::rewrite_action(self, scope, code, attach)
	}
}

/// Parser output model factory.
pub struct ParserFactory<'a, L, N = DefaultNaming> {
	look: &'a L,
	naming: N
}

impl<'a, L: LookaheadSource> ParserFactory<'a, L, DefaultNaming> {
	pub fn new(look: &'a L) -> Self {
		Self {
			look,
			naming: DefaultNaming
		}
	}
}

impl<'a, L: LookaheadSource, N: Naming> ParserFactory<'a, L, N> {
	pub fn with_naming(look: &'a L, naming: N) -> Self {
		Self { look, naming }
	}
}

impl<'a, L: LookaheadSource, N: Naming> OutputModelFactory for ParserFactory<'a, L, N> {
	fn naming(&self) -> &dyn Naming {
		&self.naming
	}

	fn lookahead(&self, decision: u32) -> Option<&DecisionLook> {
		self.look.lookahead(decision)
	}
}
