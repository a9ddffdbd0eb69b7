//! Leaf operations and the labels they bind.
use super::{
	OutputModelFactory,
	RuleScope
};
use crate::{
	decl::{
		Decl,
		DeclId,
		DeclKey,
		DeclKind,
		ScopeId
	},
	grammar::{
		ElementRef,
		Label,
		LabelForm
	},
	model::{
		Action,
		ForcedAction,
		InvokeRule,
		LabeledOp,
		MatchToken,
		SemPred,
		SrcOp
	},
	Ident
};
use source_span::Loc;

/// Kind of a labeled element reference.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RefKind {
	Token,
	Rule
}

pub fn token_ref<F>(factory: &F, scope: &mut RuleScope, r: &ElementRef) -> Vec<SrcOp>
where
	F: OutputModelFactory + ?Sized,
{
	let mut op = MatchToken {
		name: r.name.as_ref().clone(),
		labels: Vec::new(),
		span: r.span()
	};

	let list_op = bind(factory, scope, r, RefKind::Token, &mut op);
	std::iter::once(SrcOp::from(op)).chain(list_op).collect()
}

pub fn rule_ref<F>(factory: &F, scope: &mut RuleScope, r: &ElementRef) -> Vec<SrcOp>
where
	F: OutputModelFactory + ?Sized,
{
	let mut op = InvokeRule {
		name: r.name.as_ref().clone(),
		ctx_type: factory.naming().rule_context_type(r.name.as_ref()),
		args: r.args.as_ref().map(|a| a.as_ref().clone()),
		labels: Vec::new(),
		span: r.span()
	};

	let list_op = bind(factory, scope, r, RefKind::Rule, &mut op);
	std::iter::once(SrcOp::from(op)).chain(list_op).collect()
}

pub fn action(code: &Loc<String>) -> Vec<SrcOp> {
	vec![SrcOp::Action(Action {
		code: code.as_ref().clone(),
		span: code.span()
	})]
}

pub fn forced_action(code: &Loc<String>) -> Vec<SrcOp> {
	vec![SrcOp::ForcedAction(ForcedAction {
		code: code.as_ref().clone(),
		span: code.span()
	})]
}

pub fn sempred(code: &Loc<String>) -> Vec<SrcOp> {
	vec![SrcOp::SemPred(SemPred {
		code: code.as_ref().clone(),
		span: code.span()
	})]
}

/// Binds the labels of a match or invocation.
///
/// The explicit label comes first, then the implicit label if the element
/// is unlabeled but referenced from an action. Returns the list append
/// operation of a `+=` label.
fn bind<F, O>(factory: &F, scope: &mut RuleScope, r: &ElementRef, kind: RefKind, op: &mut O) -> Option<SrcOp>
where
	F: OutputModelFactory + ?Sized,
	O: LabeledOp,
{
	if let Some(label) = &r.label {
		let id = label_decl(factory, scope, label, r, kind);
		op.labels_mut().push(id);
	}

	if factory.needs_implicit_label(scope, r.name.as_ref(), &*op) {
		let id = factory.define_implicit_label(scope, r, kind);
		op.labels_mut().push(id);
	}

	let label = r.label.as_ref()?;
	let list = factory.list_label_for(scope, label, r, kind)?;
	let bound = op.labels().first().cloned()?;
	Some(factory.add_to_label_list(list, bound))
}

fn label_decl<F>(factory: &F, scope: &mut RuleScope, label: &Label, r: &ElementRef, kind: RefKind) -> DeclId
where
	F: OutputModelFactory + ?Sized,
{
	let name = label.name.as_ref();
	let decl_kind = match kind {
		RefKind::Token => DeclKind::Token { implicit: false },
		RefKind::Rule => DeclKind::RuleContext {
			ctx_type: factory.naming().rule_context_type(r.name.as_ref()),
			implicit: false
		}
	};

	let decls = scope.decls_mut();
	let (id, _) = decls.define(ScopeId::RULE, DeclKey::Label(name.clone()), || {
		Decl::new(name.to_string(), decl_kind)
	});
	decls.add_local(id);
	id
}

pub fn needs_implicit_label(scope: &RuleScope, name: &Ident, op: &dyn LabeledOp) -> bool {
	op.labels().is_empty()
		&& scope
			.alt()
			.map(|alt| alt.is_referenced_from_action(name))
			.unwrap_or(false)
}

/// Implicit label of an unlabeled element.
///
/// Every unlabeled reference to the same name within a rule shares the
/// same declaration.
pub fn define_implicit_label<F>(factory: &F, scope: &mut RuleScope, r: &ElementRef, kind: RefKind) -> DeclId
where
	F: OutputModelFactory + ?Sized,
{
	let name = r.name.as_ref();
	let naming = factory.naming();
	let (key, decl) = match kind {
		RefKind::Token => (
			DeclKey::ImplicitToken(name.clone()),
			Decl::new(naming.implicit_token_label(name), DeclKind::Token { implicit: true })
		),
		RefKind::Rule => (
			DeclKey::ImplicitRule(name.clone()),
			Decl::new(
				naming.implicit_rule_label(name),
				DeclKind::RuleContext {
					ctx_type: naming.rule_context_type(name),
					implicit: true
				}
			)
		)
	};

	let decls = scope.decls_mut();
	let (id, _) = decls.define(ScopeId::RULE, key, || decl);
	decls.add_local(id);
	id
}

/// List accumulator declaration of a `+=` label.
pub fn list_label_for<F>(factory: &F, scope: &mut RuleScope, label: &Label, r: &ElementRef, kind: RefKind) -> Option<DeclId>
where
	F: OutputModelFactory + ?Sized,
{
	if label.form != LabelForm::Append {
		return None;
	}

	let name = label.name.as_ref();
	let naming = factory.naming();
	let decl_kind = match kind {
		RefKind::Token => DeclKind::TokenList,
		RefKind::Rule => DeclKind::RuleContextList {
			ctx_type: naming.rule_context_type(r.name.as_ref())
		}
	};

	let decls = scope.decls_mut();
	let (id, _) = decls.define(ScopeId::RULE, DeclKey::ListLabel(name.clone()), || {
		Decl::new(naming.list_label(name), decl_kind)
	});
	decls.add_local(id);
	Some(id)
}
