use crate::{
	factory::{
		OutputModelFactory,
		RuleScope
	},
	grammar::{
		RewriteClause,
		RewriteItem
	},
	model::{
		Attach,
		RewriteClosure,
		RewriteOp,
		RewriteOptional,
		RewriteTreeStructure,
		TreeRewrite
	},
	Error,
	Result
};
use source_span::{
	Loc,
	Span
};

/// Builds the tree rewrite of the current alternative.
pub fn build<F>(factory: &F, scope: &mut RuleScope, clause: &RewriteClause) -> Result<TreeRewrite>
where
	F: OutputModelFactory + ?Sized,
{
	let mut rewrite = factory.tree_rewrite(scope, clause)?;
	scope.enter_iteration(rewrite.scope);
	let ops = items(factory, scope, &clause.items);
	scope.exit_iteration();
	rewrite.ops = ops?;
	Ok(rewrite)
}

fn items<F>(factory: &F, scope: &mut RuleScope, items: &[RewriteItem]) -> Result<Vec<RewriteOp>>
where
	F: OutputModelFactory + ?Sized,
{
	items.iter().map(|i| item(factory, scope, i, Attach::Child)).collect()
}

fn item<F>(factory: &F, scope: &mut RuleScope, item: &RewriteItem, attach: Attach) -> Result<RewriteOp>
where
	F: OutputModelFactory + ?Sized,
{
	match item {
		RewriteItem::Token { name, arg } => factory
			.rewrite_token_ref(scope, name, arg.as_ref(), attach)
			.map(RewriteOp::Element),
		RewriteItem::Rule(name) => factory.rewrite_rule_ref(scope, name, attach).map(RewriteOp::Element),
		RewriteItem::Label(name) => factory.rewrite_label_ref(scope, name, attach).map(RewriteOp::Element),
		RewriteItem::Action(code) => Ok(RewriteOp::Element(factory.rewrite_action(scope, code, attach))),
		RewriteItem::Tree(root, children) => {
			scope.enter_tree();
			let tree = tree(factory, scope, root, children, item.span());
			scope.exit_tree();
			tree.map(RewriteOp::Tree)
		}
		RewriteItem::Optional(children) => {
			scope.enter_code_block();
			let optional = optional(factory, scope, children);
			scope.exit_code_block();
			optional.map(RewriteOp::Optional)
		}
		RewriteItem::Closure(children) => {
			scope.enter_code_block();
			let closure = closure(factory, scope, children);
			scope.exit_code_block();
			closure.map(RewriteOp::Closure)
		}
	}
}

/// `^(root children...)`: the first item becomes the root of the new tree
/// level, the others its children.
fn tree<F>(
	factory: &F,
	scope: &mut RuleScope,
	root: &RewriteItem,
	children: &[RewriteItem],
	span: Span
) -> Result<RewriteTreeStructure>
where
	F: OutputModelFactory + ?Sized,
{
	match root {
		RewriteItem::Tree(..) | RewriteItem::Optional(_) | RewriteItem::Closure(_) => {
			return Err(Loc::new(Error::InvalidTreeRoot, span))
		}
		_ => ()
	}

	let mut tree = factory.rewrite_tree(scope, span);
	tree.ops.push(item(factory, scope, root, Attach::Root)?);
	for child in children {
		tree.ops.push(item(factory, scope, child, Attach::Child)?)
	}

	Ok(tree)
}

fn optional<F>(factory: &F, scope: &mut RuleScope, children: &[RewriteItem]) -> Result<RewriteOptional>
where
	F: OutputModelFactory + ?Sized,
{
	let mut optional = factory.rewrite_optional(scope, children)?;
	scope.enter_iteration(optional.scope);
	let ops = items(factory, scope, children);
	scope.exit_iteration();
	optional.ops = ops?;
	Ok(optional)
}

fn closure<F>(factory: &F, scope: &mut RuleScope, children: &[RewriteItem]) -> Result<RewriteClosure>
where
	F: OutputModelFactory + ?Sized,
{
	let mut closure = factory.rewrite_closure(scope, children)?;
	scope.enter_iteration(closure.scope);
	let ops = items(factory, scope, children);
	scope.exit_iteration();
	closure.ops = ops?;
	Ok(closure)
}
