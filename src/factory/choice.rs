//! Choice and repetition models.
use super::OutputModelFactory;
use crate::{
	analysis::{
		Symbol,
		TokenSet
	},
	grammar::ConstructKind,
	model::{
		Choice,
		CodeBlock,
		InlineTest,
		Ll1Alt,
		Shape
	},
	Error,
	Result
};
use source_span::{
	Loc,
	Span
};
use std::collections::HashMap;

/// Wraps the code blocks of a decision's alternatives into a choice model.
///
/// Disjoint decisions get single-token dispatch, the others full predictive
/// dispatch. An optional or repeated block with a single alternative always
/// gets the single-token, single-alternative shape.
pub fn build_choice<F>(factory: &F, kind: ConstructKind, decision: u32, span: Span, alts: Vec<CodeBlock>) -> Result<Choice>
where
	F: OutputModelFactory + ?Sized,
{
	let look = factory
		.lookahead(decision)
		.ok_or_else(|| Loc::new(Error::UnknownDecision(decision), span))?;

	if look.alts.len() != alts.len() {
		return Err(Loc::new(
			Error::LookaheadArity {
				decision,
				alts: alts.len(),
				sets: look.alts.len()
			},
			span
		));
	}

	let single_alt = alts.len() == 1 && kind != ConstructKind::Block;
	let shape = if single_alt || factory.is_disjoint(&look.alts) {
		log::debug!("decision {} ({:?}) uses single-token dispatch", decision, kind);
		let tests = ll1_tests(factory, decision, &look.alts, span)?;
		let exit = match kind {
			ConstructKind::Block => None,
			_ => look.exit.as_ref().map(|exit| factory.ll1_test(None, exit))
		};

		let mut alts: Vec<Ll1Alt> = tests
			.into_iter()
			.zip(alts)
			.map(|(test, block)| Ll1Alt { test, block })
			.collect();

		match alts.pop() {
			Some(alt) if single_alt => Shape::Ll1SingleAlt { alt, exit },
			Some(alt) => {
				alts.push(alt);
				Shape::Ll1 { alts, exit }
			}
			None => Shape::Ll1 { alts, exit }
		}
	} else {
		log::debug!("decision {} ({:?}) uses predictive dispatch", decision, kind);
		Shape::Predictive { alts }
	};

	Ok(Choice {
		decision,
		kind,
		shape,
		span
	})
}

/// Inline test of every alternative.
///
/// Fails if a symbol is claimed by two alternatives: the decision was
/// classified as disjoint, so the analysis data contradicts the classifier.
fn ll1_tests<F>(factory: &F, decision: u32, look: &[TokenSet], span: Span) -> Result<Vec<InlineTest>>
where
	F: OutputModelFactory + ?Sized,
{
	let mut owners: HashMap<Symbol, usize> = HashMap::new();
	for (i, set) in look.iter().enumerate() {
		for symbol in set {
			if let Some(first) = owners.insert(*symbol, i) {
				return Err(Loc::new(
					Error::OverlappingAlternatives {
						decision,
						symbol: *symbol,
						first,
						second: i
					},
					span
				));
			}
		}
	}

	Ok(look
		.iter()
		.enumerate()
		.map(|(i, set)| factory.ll1_test(Some(i), set))
		.collect())
}
