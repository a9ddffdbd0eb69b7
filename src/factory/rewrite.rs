//! Tree rewrite models.
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
		IteratorMode,
		ScopeId
	},
	grammar::{
		Alternative,
		RewriteClause,
		RewriteItem,
		Rule
	},
	model::{
		Attach,
		IteratorInit,
		RewriteClosure,
		RewriteElement,
		RewriteOptional,
		RewriteTarget,
		RewriteTreeStructure,
		TreeRewrite
	},
	Error,
	Ident,
	Result
};
use source_span::{
	Loc,
	Span
};

pub fn tree_rewrite<F>(factory: &F, scope: &mut RuleScope, clause: &RewriteClause) -> Result<TreeRewrite>
where
	F: OutputModelFactory + ?Sized,
{
	let alt = scope.require_alt(clause.span)?;
	let id = scope.decls_mut().new_scope();
	let tree_level = scope.tree_level();
	let root = define_root(factory, scope, id, tree_level);

	let mut refs = Vec::new();
	RewriteItem::collect_refs(&clause.items, false, &mut refs);
	let (iterators, preamble) = declare_iterators(factory, scope, alt, id, &refs, IteratorMode::Single)?;

	let mut decls = vec![root];
	decls.extend(iterators);

	log::debug!(
		"rule `{}`: tree rewrite with {} iterator(s)",
		scope.rule().name.as_ref(),
		preamble.len()
	);

	Ok(TreeRewrite {
		scope: id,
		tree_level,
		code_level: scope.code_level(),
		root,
		decls,
		preamble,
		ops: Vec::new(),
		span: clause.span
	})
}

pub fn rewrite_optional<F>(factory: &F, scope: &mut RuleScope, items: &[RewriteItem]) -> Result<RewriteOptional>
where
	F: OutputModelFactory + ?Sized,
{
	let alt = scope.require_alt(items_span(items))?;
	let id = scope.decls_mut().new_scope();

	let mut shallow = Vec::new();
	RewriteItem::collect_refs(items, false, &mut shallow);
	let (decls, mut preamble) = declare_iterators(factory, scope, alt, id, &shallow, IteratorMode::Conditional)?;

	let mut deep = Vec::new();
	RewriteItem::collect_refs(items, true, &mut deep);
	let (nested_decls, nested) = declare_iterators(factory, scope, alt, id, &deep, IteratorMode::Conditional)?;
	preamble.extend(nested);

	Ok(RewriteOptional {
		scope: id,
		tree_level: scope.tree_level(),
		code_level: scope.code_level(),
		decls,
		nested_decls,
		preamble,
		ops: Vec::new()
	})
}

pub fn rewrite_closure<F>(factory: &F, scope: &mut RuleScope, items: &[RewriteItem]) -> Result<RewriteClosure>
where
	F: OutputModelFactory + ?Sized,
{
	let alt = scope.require_alt(items_span(items))?;
	let id = scope.decls_mut().new_scope();

	let mut refs = Vec::new();
	RewriteItem::collect_refs(items, false, &mut refs);
	let (iterator_decls, preamble) = declare_iterators(factory, scope, alt, id, &refs, IteratorMode::Repeat)?;

	Ok(RewriteClosure {
		scope: id,
		tree_level: scope.tree_level(),
		code_level: scope.code_level(),
		iterator_decls,
		preamble,
		ops: Vec::new()
	})
}

/// `^(...)` subtree at the current tree level, with its root declared in the
/// innermost iteration scope.
pub fn rewrite_tree<F>(factory: &F, scope: &mut RuleScope, span: Span) -> RewriteTreeStructure
where
	F: OutputModelFactory + ?Sized,
{
	let tree_level = scope.tree_level();
	let in_scope = scope.iteration().unwrap_or(ScopeId::RULE);
	let root = define_root(factory, scope, in_scope, tree_level);

	RewriteTreeStructure {
		tree_level,
		code_level: scope.code_level(),
		root,
		ops: Vec::new(),
		span
	}
}

/// Token of a rewrite.
///
/// A token with a construction argument, or that the alternative never
/// matched, is a new imaginary node. Otherwise the matched token is read
/// through its iterator.
pub fn rewrite_token_ref<F>(
	factory: &F,
	scope: &mut RuleScope,
	name: &Loc<Ident>,
	arg: Option<&Loc<String>>,
	attach: Attach
) -> Result<RewriteElement>
where
	F: OutputModelFactory + ?Sized,
{
	let alt = scope.require_alt(name.span())?;
	let target = if arg.is_some() || !alt.matches_token(name.as_ref()) {
		RewriteTarget::Imaginary {
			token: name.as_ref().clone(),
			arg: arg.map(|a| a.as_ref().clone())
		}
	} else {
		RewriteTarget::Token {
			name: name.as_ref().clone(),
			iterator: iterator(scope, name)?
		}
	};

	Ok(element(factory, scope, target, attach, name.span()))
}

pub fn rewrite_rule_ref<F>(factory: &F, scope: &mut RuleScope, name: &Loc<Ident>, attach: Attach) -> Result<RewriteElement>
where
	F: OutputModelFactory + ?Sized,
{
	let alt = scope.require_alt(name.span())?;
	if !alt.invokes_rule(name.as_ref()) {
		return Err(unresolved(name));
	}

	let target = RewriteTarget::Rule {
		name: name.as_ref().clone(),
		iterator: iterator(scope, name)?
	};

	Ok(element(factory, scope, target, attach, name.span()))
}

/// Label of a rewrite.
///
/// A label named after the enclosing rule denotes the tree built so far by
/// the rule itself.
pub fn rewrite_label_ref<F>(factory: &F, scope: &mut RuleScope, name: &Loc<Ident>, attach: Attach) -> Result<RewriteElement>
where
	F: OutputModelFactory + ?Sized,
{
	let rule = scope.rule();
	let target = if is_self_reference(rule, name.as_ref()) {
		RewriteTarget::SelfRoot {
			rule: rule.name.as_ref().clone()
		}
	} else {
		let alt = scope.require_alt(name.span())?;
		if alt.label(name.as_ref()).is_none() {
			return Err(unresolved(name));
		}

		RewriteTarget::Label {
			name: name.as_ref().clone(),
			iterator: iterator(scope, name)?
		}
	};

	Ok(element(factory, scope, target, attach, name.span()))
}

pub fn rewrite_action<F>(factory: &F, scope: &mut RuleScope, code: &Loc<String>, attach: Attach) -> RewriteElement
where
	F: OutputModelFactory + ?Sized,
{
	let target = RewriteTarget::Action {
		code: code.as_ref().clone()
	};

	element(factory, scope, target, attach, code.span())
}

fn element<F>(factory: &F, scope: &RuleScope, target: RewriteTarget, attach: Attach, span: Span) -> RewriteElement
where
	F: OutputModelFactory + ?Sized,
{
	RewriteElement {
		target,
		attach,
		root: factory.naming().root(scope.tree_level()),
		span
	}
}

fn is_self_reference(rule: &Rule, name: &Ident) -> bool {
	rule.name.as_ref() == name
}

fn unresolved(name: &Loc<Ident>) -> Loc<Error> {
	Loc::new(Error::UnresolvedReference(name.as_ref().clone()), name.span())
}

fn items_span(items: &[RewriteItem]) -> Span {
	items.first().map(RewriteItem::span).unwrap_or_default()
}

/// Iterator of an element in the innermost iteration scope.
fn iterator(scope: &RuleScope, name: &Loc<Ident>) -> Result<DeclId> {
	let key = DeclKey::Iterator(name.as_ref().clone(), scope.code_level());
	scope
		.iteration()
		.and_then(|it| scope.decls().lookup(it, &key))
		.ok_or_else(|| unresolved(name))
}

fn define_root<F>(factory: &F, scope: &mut RuleScope, in_scope: ScopeId, level: u32) -> DeclId
where
	F: OutputModelFactory + ?Sized,
{
	let naming = factory.naming();
	let (id, _) = scope.decls_mut().define(in_scope, DeclKey::Root(level), || {
		Decl::new(naming.root(level), DeclKind::Root { level })
	});
	id
}

/// Element whose matches an iterator must track, if any.
///
/// Imaginary tokens and self references need no iterator. Rule and label
/// references the alternative never resolves are fatal.
fn tracked_element<'i>(rule: &Rule, alt: &Alternative, item: &'i RewriteItem) -> Result<Option<&'i Loc<Ident>>> {
	match item {
		RewriteItem::Token { name, arg } => {
			if arg.is_none() && alt.matches_token(name.as_ref()) {
				Ok(Some(name))
			} else {
				Ok(None)
			}
		}
		RewriteItem::Rule(name) => {
			if alt.invokes_rule(name.as_ref()) {
				Ok(Some(name))
			} else {
				Err(unresolved(name))
			}
		}
		RewriteItem::Label(name) => {
			if is_self_reference(rule, name.as_ref()) {
				Ok(None)
			} else if alt.label(name.as_ref()).is_some() {
				Ok(Some(name))
			} else {
				Err(unresolved(name))
			}
		}
		_ => Ok(None)
	}
}

/// Declares one iterator per distinct element of `refs` in the given scope.
///
/// Returns the newly declared iterators and their initializations.
fn declare_iterators<F>(
	factory: &F,
	scope: &mut RuleScope,
	alt: &Alternative,
	in_scope: ScopeId,
	refs: &[&RewriteItem],
	mode: IteratorMode
) -> Result<(Vec<DeclId>, Vec<IteratorInit>)>
where
	F: OutputModelFactory + ?Sized,
{
	let naming = factory.naming();
	let rule = scope.rule();
	let level = scope.code_level();

	let mut decls = Vec::new();
	let mut preamble = Vec::new();
	for item in refs {
		let name = match tracked_element(rule, alt, item)? {
			Some(name) => name.as_ref(),
			None => continue
		};

		let (id, created) = scope
			.decls_mut()
			.define(in_scope, DeclKey::Iterator(name.clone(), level), || {
				Decl::new(
					naming.rewrite_iterator(name, level),
					DeclKind::RewriteIterator {
						element: name.clone(),
						list_name: naming.element_list_name(name),
						level,
						mode
					}
				)
			});

		if created {
			decls.push(id);
			preamble.push(IteratorInit { iterator: id });
		}
	}

	Ok((decls, preamble))
}
