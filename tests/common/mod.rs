#![allow(dead_code)]
use lazy_static::lazy_static;
use outmodel::{
	grammar::{
		Alternative,
		Element,
		Rule
	},
	model::{
		ParserModel,
		RuleFunction
	},
	Decisions,
	Error,
	Generator,
	Grammar,
	ParserFactory,
	Result,
	TokenSet
};

pub const ID: u32 = 3;
pub const TOK_IF: u32 = 4;
pub const TOK_WHILE: u32 = 5;

pub const STAT_DECISION: u32 = 0;

lazy_static! {
	/// ```text
	/// stat : TOK_IF expr | TOK_WHILE expr ;
	/// expr : ID ;
	/// ```
	pub static ref STAT_GRAMMAR: Grammar = Grammar::new(
		"Stat",
		vec![
			Rule::new(
				"stat",
				vec![
					Alternative::new(vec![Element::token("TOK_IF"), Element::rule("expr")]),
					Alternative::new(vec![Element::token("TOK_WHILE"), Element::rule("expr")])
				]
			)
			.with_decision(STAT_DECISION),
			Rule::new("expr", vec![Alternative::new(vec![Element::token("ID")])])
		]
	);

	pub static ref STAT_DECISIONS: Decisions =
		Decisions::new().with(STAT_DECISION, vec![set(&[TOK_IF]), set(&[TOK_WHILE])]);
}

pub fn set(tokens: &[u32]) -> TokenSet {
	TokenSet::of(tokens.iter().cloned())
}

/// Grammar made of the given rules.
pub fn grammar(rules: Vec<Rule>) -> Grammar {
	Grammar::new("Test", rules)
}

pub fn generate(grammar: &Grammar, decisions: &Decisions) -> Result<ParserModel> {
	Generator::new(grammar, ParserFactory::new(decisions)).generate()
}

/// Model of a single-rule grammar.
pub fn build_rule(rule: Rule, decisions: &Decisions) -> RuleFunction {
	let grammar = grammar(vec![rule]);
	match generate(&grammar, decisions) {
		Ok(mut model) => model.rules.remove(0),
		Err(e) => panic!("unexpected fault: {}", e.as_ref())
	}
}

pub fn expect_fault<T>(result: Result<T>) -> Error {
	match result {
		Ok(_) => panic!("expected a fault"),
		Err(e) => e.into_inner()
	}
}
