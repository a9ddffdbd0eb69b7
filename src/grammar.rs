//! Parsed grammar structure consumed by the model builders.
//!
//! These types are owned by the grammar and only borrowed while building
//! the output model.
use crate::Ident;
use source_span::{
	Loc,
	Span
};
use std::collections::{
	HashMap,
	HashSet
};

mod rewrite;

pub use rewrite::*;

pub struct Grammar {
	pub name: Ident,
	pub rules: Vec<Rule>
}

impl Grammar {
	pub fn new<S: ToString>(name: S, rules: Vec<Rule>) -> Self {
		Self {
			name: Ident::new(name),
			rules
		}
	}

	pub fn rule(&self, name: &str) -> Option<&Rule> {
		self.rules.iter().find(|r| r.name.as_ref() == name)
	}
}

pub struct Rule {
	pub name: Loc<Ident>,

	/// Outer alternatives.
	pub alts: Vec<Alternative>,

	/// Decision of the outer block, required when there is more than one alternative.
	pub decision: Option<u32>
}

impl Rule {
	pub fn new<S: ToString>(name: S, alts: Vec<Alternative>) -> Self {
		Self {
			name: Ident::new(name).unlocated(),
			alts,
			decision: None
		}
	}

	pub fn with_decision(mut self, decision: u32) -> Self {
		self.decision = Some(decision);
		self
	}

	pub fn span(&self) -> Span {
		self.name.span()
	}
}

/// Outer alternative of a rule.
///
/// The reference tables cover every element of the alternative, including
/// elements nested in sub-blocks.
pub struct Alternative {
	pub elements: Vec<Element>,
	pub rewrite: Option<RewriteClause>,

	/// Token names referenced (as `$NAME`) from action bodies.
	pub token_refs_in_actions: HashSet<Ident>,

	/// Rule names referenced (as `$name`) from action bodies.
	pub rule_refs_in_actions: HashSet<Ident>,

	/// Token names matched by this alternative.
	token_refs: HashSet<Ident>,

	/// Rule names invoked by this alternative.
	rule_refs: HashSet<Ident>,

	/// Explicit labels defined by this alternative.
	labels: HashMap<Ident, LabelForm>
}

impl Alternative {
	pub fn new(elements: Vec<Element>) -> Self {
		let mut alt = Self {
			elements: Vec::new(),
			rewrite: None,
			token_refs_in_actions: HashSet::new(),
			rule_refs_in_actions: HashSet::new(),
			token_refs: HashSet::new(),
			rule_refs: HashSet::new(),
			labels: HashMap::new()
		};

		for e in &elements {
			alt.record(e);
		}

		alt.elements = elements;
		alt
	}

	fn record(&mut self, element: &Element) {
		match element {
			Element::Token(r) | Element::Rule(r) => {
				let refs = match element {
					Element::Token(_) => &mut self.token_refs,
					_ => &mut self.rule_refs
				};
				refs.insert(r.name.as_ref().clone());

				if let Some(label) = &r.label {
					self.labels
						.entry(label.name.as_ref().clone())
						.or_insert(label.form);
				}
			}
			Element::Block(block) => {
				for alt in &block.alts {
					for e in alt {
						self.record(e)
					}
				}
			}
			Element::Action(_) | Element::ForcedAction(_) | Element::Predicate(_) => ()
		}
	}

	/// Declares the token names referenced from actions.
	pub fn with_token_refs_in_actions<'a, I: IntoIterator<Item = &'a str>>(mut self, names: I) -> Self {
		self.token_refs_in_actions
			.extend(names.into_iter().map(Ident::from));
		self
	}

	/// Declares the rule names referenced from actions.
	pub fn with_rule_refs_in_actions<'a, I: IntoIterator<Item = &'a str>>(mut self, names: I) -> Self {
		self.rule_refs_in_actions
			.extend(names.into_iter().map(Ident::from));
		self
	}

	pub fn with_rewrite(mut self, rewrite: RewriteClause) -> Self {
		self.rewrite = Some(rewrite);
		self
	}

	/// Checks if the given name is referenced from an action of this alternative.
	pub fn is_referenced_from_action(&self, name: &Ident) -> bool {
		self.token_refs_in_actions.contains(name) || self.rule_refs_in_actions.contains(name)
	}

	pub fn matches_token(&self, name: &Ident) -> bool {
		self.token_refs.contains(name)
	}

	pub fn invokes_rule(&self, name: &Ident) -> bool {
		self.rule_refs.contains(name)
	}

	pub fn label(&self, name: &Ident) -> Option<LabelForm> {
		self.labels.get(name).cloned()
	}
}

/// Grammar element in source order.
pub enum Element {
	Token(ElementRef),
	Rule(ElementRef),
	Action(Loc<String>),

	/// Action run even while the parser is only guessing (`{...}!`).
	ForcedAction(Loc<String>),

	Predicate(Loc<String>),
	Block(Block)
}

impl Element {
	pub fn token<S: ToString>(name: S) -> Element {
		Element::Token(ElementRef::new(name))
	}

	pub fn rule<S: ToString>(name: S) -> Element {
		Element::Rule(ElementRef::new(name))
	}

	pub fn action<S: ToString>(code: S) -> Element {
		Element::Action(Loc::new(code.to_string(), Span::default()))
	}

	pub fn forced_action<S: ToString>(code: S) -> Element {
		Element::ForcedAction(Loc::new(code.to_string(), Span::default()))
	}

	pub fn predicate<S: ToString>(code: S) -> Element {
		Element::Predicate(Loc::new(code.to_string(), Span::default()))
	}
}

/// Reference to a token or rule, at a specific source position.
pub struct ElementRef {
	pub name: Loc<Ident>,
	pub label: Option<Label>,

	/// Rule arguments or token construction argument.
	pub args: Option<Loc<String>>
}

impl ElementRef {
	pub fn new<S: ToString>(name: S) -> Self {
		Self {
			name: Ident::new(name).unlocated(),
			label: None,
			args: None
		}
	}

	pub fn at(mut self, span: Span) -> Self {
		self.name = Loc::new(self.name.into_inner(), span);
		self
	}

	pub fn labeled<S: ToString>(mut self, label: S, form: LabelForm) -> Self {
		self.label = Some(Label {
			name: Ident::new(label).unlocated(),
			form
		});
		self
	}

	pub fn with_args<S: ToString>(mut self, args: S) -> Self {
		self.args = Some(Loc::new(args.to_string(), Span::default()));
		self
	}

	pub fn span(&self) -> Span {
		self.name.span()
	}
}

pub struct Label {
	pub name: Loc<Ident>,
	pub form: LabelForm
}

/// How a label binds the element it labels.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LabelForm {
	/// `label=element`: holds the last match.
	Assign,

	/// `label+=element`: accumulates every match in a list.
	Append
}

impl LabelForm {
	pub fn from_marker(marker: &str) -> Option<LabelForm> {
		match marker {
			"=" => Some(LabelForm::Assign),
			"+=" => Some(LabelForm::Append),
			_ => None
		}
	}

	/// Resolves the form of a label from its syntactic markers.
	///
	/// The first recognized marker wins.
	pub fn resolve<'a, I: IntoIterator<Item = &'a str>>(markers: I) -> Option<LabelForm> {
		markers.into_iter().find_map(LabelForm::from_marker)
	}
}

/// Kind of an alternation or repetition construct.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ConstructKind {
	/// `(a | b)`
	Block,

	/// `(a | b)?`
	Optional,

	/// `(a | b)*`
	Closure,

	/// `(a | b)+`
	PositiveClosure
}

/// Alternation or repetition block nested in an alternative.
pub struct Block {
	pub kind: ConstructKind,

	/// Decision index given by the automaton for this construct.
	pub decision: Option<u32>,

	pub alts: Vec<Vec<Element>>,
	pub span: Span
}

impl Block {
	pub fn new(kind: ConstructKind, decision: u32, alts: Vec<Vec<Element>>) -> Self {
		Self {
			kind,
			decision: Some(decision),
			alts,
			span: Span::default()
		}
	}
}
