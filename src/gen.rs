//! Output model generation.
//!
//! The [`Generator`] walks every rule of a grammar, alternative by
//! alternative and element by element, and drives an
//! [`OutputModelFactory`] to build the corresponding model nodes.
use crate::{
	factory::{
		OutputModelFactory,
		RuleScope
	},
	grammar::{
		Alternative,
		ConstructKind,
		Element,
		Grammar,
		Rule
	},
	model::{
		Body,
		CodeBlock,
		ParserModel,
		RuleFunction,
		SrcOp
	},
	out::Report,
	Error,
	Result
};
use source_span::Loc;

mod rewrite;

pub struct Generator<'g, F> {
	grammar: &'g Grammar,
	factory: F
}

impl<'g, F: OutputModelFactory> Generator<'g, F> {
	pub fn new(grammar: &'g Grammar, factory: F) -> Self {
		Self { grammar, factory }
	}

	pub fn factory(&self) -> &F {
		&self.factory
	}

	/// Builds the model of every rule, in grammar order.
	///
	/// Stops at the first fault, after logging a report for it.
	pub fn generate(&self) -> Result<ParserModel> {
		log::info!("building output model of grammar `{}`", self.grammar.name);

		let rules = self
			.grammar
			.rules
			.iter()
			.map(|rule| {
				self.rule(rule).map_err(|e| {
					log::error!("{}", Report::fault(rule.name.as_ref(), e.as_ref()));
					e
				})
			})
			.collect::<Result<Vec<_>>>()?;

		Ok(ParserModel {
			grammar: self.grammar.name.clone(),
			rules
		})
	}

	/// Builds the model of a single rule.
	pub fn rule(&self, rule: &'g Rule) -> Result<RuleFunction> {
		log::debug!("building rule `{}` ({} alternative(s))", rule.name.as_ref(), rule.alts.len());
		let mut scope = RuleScope::new(rule);

		let body = match rule.decision {
			Some(decision) => {
				let alts = rule
					.alts
					.iter()
					.map(|alt| self.alt(&mut scope, alt))
					.collect::<Result<Vec<_>>>()?;
				let choice = self
					.factory
					.build_choice(ConstructKind::Block, decision, rule.span(), alts)?;
				Body::Choice(choice)
			}
			None => match rule.alts.as_slice() {
				[alt] => Body::Alt(self.alt(&mut scope, alt)?),
				_ => return Err(Loc::new(Error::MissingDecision(ConstructKind::Block), rule.span()))
			}
		};

		Ok(RuleFunction {
			name: rule.name.as_ref().clone(),
			ctx_type: self.factory.naming().rule_context_type(rule.name.as_ref()),
			body,
			decls: scope.into_decls()
		})
	}

	fn alt(&self, scope: &mut RuleScope<'g>, alt: &'g Alternative) -> Result<CodeBlock> {
		scope.set_alt(alt);
		let ops = self.elements(scope, &alt.elements)?;

		let rewrite = match &alt.rewrite {
			Some(clause) => Some(rewrite::build(&self.factory, scope, clause)?),
			None => None
		};

		Ok(CodeBlock { ops, rewrite })
	}

	fn elements(&self, scope: &mut RuleScope<'g>, elements: &'g [Element]) -> Result<Vec<SrcOp>> {
		let mut ops = Vec::new();
		for element in elements {
			ops.extend(self.element(scope, element)?)
		}

		Ok(ops)
	}

	fn element(&self, scope: &mut RuleScope<'g>, element: &'g Element) -> Result<Vec<SrcOp>> {
		match element {
			Element::Token(r) => Ok(self.factory.token_ref(scope, r)),
			Element::Rule(r) => Ok(self.factory.rule_ref(scope, r)),
			Element::Action(code) => Ok(self.factory.action(code)),
			Element::ForcedAction(code) => Ok(self.factory.forced_action(code)),
			Element::Predicate(code) => Ok(self.factory.sempred(code)),
			Element::Block(block) => {
				let decision = block
					.decision
					.ok_or_else(|| Loc::new(Error::MissingDecision(block.kind), block.span))?;

				let alts = block
					.alts
					.iter()
					.map(|elements| self.elements(scope, elements).map(CodeBlock::new))
					.collect::<Result<Vec<_>>>()?;

				let choice = self.factory.build_choice(block.kind, decision, block.span, alts)?;
				Ok(vec![SrcOp::Choice(Box::new(choice))])
			}
		}
	}
}
