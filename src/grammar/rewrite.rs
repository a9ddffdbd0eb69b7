use crate::Ident;
use source_span::{
	Loc,
	Span
};

/// Tree-construction clause (`-> ...`) of an alternative.
pub struct RewriteClause {
	pub items: Vec<RewriteItem>,
	pub span: Span
}

impl RewriteClause {
	pub fn new(items: Vec<RewriteItem>) -> Self {
		Self {
			items,
			span: Span::default()
		}
	}
}

/// Item of a tree-construction clause.
pub enum RewriteItem {
	/// Token reference, with an optional construction argument (`ID["x"]`).
	Token {
		name: Loc<Ident>,
		arg: Option<Loc<String>>
	},

	/// Rule reference.
	Rule(Loc<Ident>),

	/// Label reference (`$label`).
	Label(Loc<Ident>),

	/// Action whose value is inserted in the tree.
	Action(Loc<String>),

	/// `^(root children...)`.
	Tree(Box<RewriteItem>, Vec<RewriteItem>),

	/// `( ... )?`
	Optional(Vec<RewriteItem>),

	/// `( ... )*`
	Closure(Vec<RewriteItem>)
}

impl RewriteItem {
	pub fn token<S: ToString>(name: S) -> Self {
		RewriteItem::Token {
			name: Ident::new(name).unlocated(),
			arg: None
		}
	}

	/// Token with a construction argument.
	pub fn new_token<S: ToString, A: ToString>(name: S, arg: A) -> Self {
		RewriteItem::Token {
			name: Ident::new(name).unlocated(),
			arg: Some(Loc::new(arg.to_string(), Span::default()))
		}
	}

	pub fn rule<S: ToString>(name: S) -> Self {
		RewriteItem::Rule(Ident::new(name).unlocated())
	}

	pub fn label<S: ToString>(name: S) -> Self {
		RewriteItem::Label(Ident::new(name).unlocated())
	}

	pub fn action<S: ToString>(code: S) -> Self {
		RewriteItem::Action(Loc::new(code.to_string(), Span::default()))
	}

	pub fn tree(root: RewriteItem, children: Vec<RewriteItem>) -> Self {
		RewriteItem::Tree(Box::new(root), children)
	}

	pub fn span(&self) -> Span {
		match self {
			Self::Token { name, .. } => name.span(),
			Self::Rule(name) | Self::Label(name) => name.span(),
			Self::Action(code) => code.span(),
			Self::Tree(root, _) => root.span(),
			Self::Optional(_) | Self::Closure(_) => Span::default()
		}
	}

	/// Name of the grammar element this item refers to, if any.
	pub fn element_name(&self) -> Option<&Loc<Ident>> {
		match self {
			Self::Token { name, .. } | Self::Rule(name) | Self::Label(name) => Some(name),
			_ => None
		}
	}

	/// Element references reachable from these items.
	///
	/// `^(...)` trees are always entered. Nested optional and closure
	/// subtrees are entered only when `deep` is set.
	pub fn collect_refs<'a>(items: &'a [RewriteItem], deep: bool, refs: &mut Vec<&'a RewriteItem>) {
		for item in items {
			match item {
				Self::Token { .. } | Self::Rule(_) | Self::Label(_) => refs.push(item),
				Self::Action(_) => (),
				Self::Tree(root, children) => {
					Self::collect_refs(std::slice::from_ref(&**root), deep, refs);
					Self::collect_refs(children, deep, refs)
				}
				Self::Optional(children) | Self::Closure(children) => {
					if deep {
						Self::collect_refs(children, deep, refs)
					}
				}
			}
		}
	}
}
