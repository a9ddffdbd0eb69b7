mod common;

use common::*;
use outmodel::{
	grammar::{
		Alternative,
		Block,
		ConstructKind,
		Element,
		ElementRef,
		LabelForm,
		RewriteClause,
		RewriteItem,
		Rule
	},
	model::{
		RuleFunction,
		Variant
	},
	out::Report,
	Decisions,
	Error,
	Generator,
	Grammar,
	Ident,
	ParserFactory
};
use std::thread;

/// Grammar exercising every part of the model.
fn calc() -> (Grammar, Decisions) {
	let grammar = grammar(vec![
		// prog : stat+ ;
		Rule::new(
			"prog",
			vec![Alternative::new(vec![Element::Block(Block::new(
				ConstructKind::PositiveClosure,
				1,
				vec![vec![Element::rule("stat")]]
			))])]
		),
		// stat : TOK_IF expr | TOK_WHILE expr | ID ASSIGN expr ;
		Rule::new(
			"stat",
			vec![
				Alternative::new(vec![Element::token("TOK_IF"), Element::rule("expr")]),
				Alternative::new(vec![Element::token("TOK_WHILE"), Element::rule("expr")]),
				Alternative::new(vec![
					Element::Token(ElementRef::new("ID").labeled("target", LabelForm::Assign)),
					Element::token("ASSIGN"),
					Element::rule("expr"),
					Element::action("assign($target, $expr)")
				])
				.with_rule_refs_in_actions(vec!["expr"])
			]
		)
		.with_decision(2),
		// expr : atom (PLUS ops+=atom)* -> ^(EXPR atom*) ;
		Rule::new(
			"expr",
			vec![Alternative::new(vec![
				Element::rule("atom"),
				Element::Block(Block::new(
					ConstructKind::Closure,
					3,
					vec![vec![
						Element::token("PLUS"),
						Element::Rule(ElementRef::new("atom").labeled("ops", LabelForm::Append))
					]]
				))
			])
			.with_rewrite(RewriteClause::new(vec![RewriteItem::tree(
				RewriteItem::token("EXPR"),
				vec![RewriteItem::Closure(vec![RewriteItem::rule("atom")])]
			)]))]
		),
		// atom : ID | INT | LPAREN expr RPAREN ;
		Rule::new(
			"atom",
			vec![
				Alternative::new(vec![Element::token("ID")]),
				Alternative::new(vec![Element::token("INT")]),
				Alternative::new(vec![
					Element::token("LPAREN"),
					Element::predicate("nested_allowed()"),
					Element::rule("expr"),
					Element::token("RPAREN")
				])
			]
		)
		.with_decision(4)
	]);

	let decisions = Decisions::new()
		.with(1, vec![set(&[TOK_IF, TOK_WHILE, ID])])
		.with(2, vec![set(&[TOK_IF]), set(&[TOK_WHILE]), set(&[ID])])
		.with(3, vec![set(&[10])])
		// ID is ambiguous between a plain atom and a parenthesized one here.
		.with(4, vec![set(&[ID]), set(&[11]), set(&[12, ID])]);

	(grammar, decisions)
}

fn summary(rule: &RuleFunction) -> (Ident, Vec<Variant>, Vec<String>) {
	let mut variants = Vec::new();
	rule.visit_choices(|c| variants.push(c.variant()));
	let locals = rule.locals().map(|d| d.name.clone()).collect();
	(rule.name.clone(), variants, locals)
}

#[test]
fn whole_grammar() {
	let (grammar, decisions) = calc();
	let model = match Generator::new(&grammar, ParserFactory::new(&decisions)).generate() {
		Ok(model) => model,
		Err(e) => panic!("{}", e.as_ref())
	};

	assert_eq!(model.grammar, Ident::from("Test"));
	let summaries: Vec<_> = model.rules.iter().map(summary).collect();
	assert_eq!(
		summaries,
		vec![
			(Ident::from("prog"), vec![Variant::Ll1PlusBlockSingleAlt], Vec::<String>::new()),
			(
				Ident::from("stat"),
				vec![Variant::Ll1AltBlock],
				vec!["target".to_string(), "_r_expr".to_string()]
			),
			(
				Ident::from("expr"),
				vec![Variant::Ll1StarBlockSingleAlt],
				vec!["ops".to_string(), "ops_list".to_string()]
			),
			(Ident::from("atom"), vec![Variant::AltBlock], Vec::<String>::new())
		]
	);

	let expr = model.rule("expr").unwrap();
	assert!(expr.alts()[0].rewrite.is_some());
}

#[test]
fn generation_is_deterministic() {
	let (grammar, decisions) = calc();
	let generator = Generator::new(&grammar, ParserFactory::new(&decisions));

	let run = || match generator.generate() {
		Ok(model) => model.rules.iter().map(summary).collect::<Vec<_>>(),
		Err(e) => panic!("{}", e.as_ref())
	};

	assert_eq!(run(), run());
}

#[test]
fn rules_are_built_independently() {
	let (grammar, decisions) = calc();
	let generator = Generator::new(&grammar, ParserFactory::new(&decisions));

	let sequential: Vec<_> = grammar
		.rules
		.iter()
		.map(|rule| match generator.rule(rule) {
			Ok(f) => summary(&f),
			Err(e) => panic!("{}", e.as_ref())
		})
		.collect();

	let concurrent: Vec<_> = thread::scope(|s| {
		let handles: Vec<_> = grammar
			.rules
			.iter()
			.map(|rule| {
				let generator = &generator;
				s.spawn(move || generator.rule(rule).map(|f| summary(&f)).map_err(|e| e.into_inner().to_string()))
			})
			.collect();

		handles
			.into_iter()
			.map(|h| match h.join() {
				Ok(Ok(summary)) => summary,
				Ok(Err(e)) => panic!("{}", e),
				Err(_) => panic!("generation thread panicked")
			})
			.collect()
	});

	assert_eq!(sequential, concurrent);
}

#[test]
fn fault_report() {
	let grammar = grammar(vec![Rule::new(
		"decl",
		vec![Alternative::new(vec![Element::token("ID")])
			.with_rewrite(RewriteClause::new(vec![RewriteItem::rule("missing")]))]
	)]);

	let e = expect_fault(generate(&grammar, &Decisions::new()));
	assert!(matches!(&e, Error::UnresolvedReference(id) if *id == Ident::from("missing")));

	yansi::Paint::disable();
	let report = Report::fault(&Ident::from("decl"), &e).to_string();
	assert!(report.contains("unresolved reference"));
	assert!(report.contains("`missing` is never matched by the alternative"));
	assert!(report.contains("while building rule `decl`"));
	assert!(report.contains("help:"));
}
