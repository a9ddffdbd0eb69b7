mod common;

use common::*;
use outmodel::{
	decl::DeclKind,
	grammar::{
		Alternative,
		Block,
		ConstructKind,
		Element,
		ElementRef,
		LabelForm,
		Rule
	},
	model::{
		RuleFunction,
		SrcOp
	},
	Decisions,
	Ident
};

fn ops(rule: &RuleFunction) -> Vec<&SrcOp> {
	let mut ops = Vec::new();
	for block in rule.alts() {
		ops.extend(block.ops.iter())
	}
	ops
}

fn local_names(rule: &RuleFunction) -> Vec<&str> {
	rule.locals().map(|d| d.name.as_str()).collect()
}

#[test]
fn implicit_token_label_is_shared() {
	let alt = Alternative::new(vec![
		Element::token("ID"),
		Element::action("print($ID)"),
		Element::token("ID")
	])
	.with_token_refs_in_actions(vec!["ID"]);

	let rule = build_rule(Rule::new("pair", vec![alt]), &Decisions::new());
	let ops = ops(&rule);
	assert_eq!(ops.len(), 3);
	assert!(matches!(ops[1], SrcOp::Action(_)));

	let first = ops[0].labels();
	let second = ops[2].labels();
	assert_eq!(first.len(), 1);
	assert_eq!(first, second);

	let decl = rule.decl(first[0]);
	assert_eq!(decl.name, "_t_id");
	assert!(decl.is_implicit());
	assert_eq!(local_names(&rule), vec!["_t_id"]);
}

#[test]
fn implicit_rule_label() {
	let alt = Alternative::new(vec![Element::rule("expr"), Element::action("use($expr)")])
		.with_rule_refs_in_actions(vec!["expr"]);

	let rule = build_rule(Rule::new("stat", vec![alt]), &Decisions::new());
	let ops = ops(&rule);
	let invoke = match ops[0] {
		SrcOp::InvokeRule(op) => op,
		_ => panic!("expected an invocation")
	};

	assert_eq!(invoke.name, Ident::from("expr"));
	assert_eq!(invoke.ctx_type, "ExprContext");
	let decl = rule.decl(invoke.labels[0]);
	assert_eq!(decl.name, "_r_expr");
	assert_eq!(
		decl.kind,
		DeclKind::RuleContext {
			ctx_type: "ExprContext".to_string(),
			implicit: true
		}
	);
}

#[test]
fn unreferenced_elements_are_unlabeled() {
	let alt = Alternative::new(vec![Element::token("ID"), Element::rule("expr")])
		.with_token_refs_in_actions(vec!["OTHER"]);

	let rule = build_rule(Rule::new("r", vec![alt]), &Decisions::new());
	assert!(ops(&rule).iter().all(|op| op.labels().is_empty()));
	assert_eq!(rule.locals().count(), 0);
}

#[test]
fn explicit_label_suppresses_implicit_label() {
	let alt = Alternative::new(vec![Element::Token(
		ElementRef::new("ID").labeled("name", LabelForm::Assign)
	)])
	.with_token_refs_in_actions(vec!["ID"]);

	let rule = build_rule(Rule::new("r", vec![alt]), &Decisions::new());
	let ops = ops(&rule);
	assert_eq!(ops.len(), 1);
	assert_eq!(ops[0].labels().len(), 1);

	let decl = rule.decl(ops[0].labels()[0]);
	assert_eq!(decl.name, "name");
	assert!(!decl.is_implicit());
	assert_eq!(local_names(&rule), vec!["name"]);
}

#[test]
fn list_label_appends_after_the_match() {
	let alt = Alternative::new(vec![
		Element::token("LPAREN"),
		Element::Rule(ElementRef::new("expr").labeled("args", LabelForm::Append)),
		Element::token("RPAREN")
	]);

	let rule = build_rule(Rule::new("call", vec![alt]), &Decisions::new());
	let ops = ops(&rule);
	assert_eq!(ops.len(), 4);

	let label = ops[1].labels()[0];
	match ops[2] {
		SrcOp::AddToLabelList(add) => {
			assert_eq!(add.label, label);
			assert_eq!(rule.decl(add.list).name, "args_list");
			assert_eq!(
				rule.decl(add.list).kind,
				DeclKind::RuleContextList {
					ctx_type: "ExprContext".to_string()
				}
			);
		}
		_ => panic!("expected a list append")
	}
	assert!(matches!(ops[3], SrcOp::MatchToken(_)));
	assert_eq!(local_names(&rule), vec!["args", "args_list"]);
}

#[test]
fn assign_label_has_no_list() {
	let alt = Alternative::new(vec![Element::Rule(
		ElementRef::new("expr").labeled("arg", LabelForm::Assign)
	)]);

	let rule = build_rule(Rule::new("r", vec![alt]), &Decisions::new());
	assert!(ops(&rule)
		.iter()
		.all(|op| !matches!(op, SrcOp::AddToLabelList(_))));
	assert_eq!(local_names(&rule), vec!["arg"]);
}

#[test]
fn list_label_in_repetition() {
	// ids+=ID (COMMA ids+=ID)*
	let block = Block::new(
		ConstructKind::Closure,
		1,
		vec![vec![
			Element::token("COMMA"),
			Element::Token(ElementRef::new("ID").labeled("ids", LabelForm::Append))
		]]
	);
	let alt = Alternative::new(vec![
		Element::Token(ElementRef::new("ID").labeled("ids", LabelForm::Append)),
		Element::Block(block)
	]);

	let decisions = Decisions::new().with(1, vec![set(&[7])]);
	let rule = build_rule(Rule::new("ids", vec![alt]), &decisions);

	let mut appends = Vec::new();
	rule.visit_ops(|op| {
		if let SrcOp::AddToLabelList(add) = op {
			appends.push((add.list, add.label))
		}
	});

	assert_eq!(appends.len(), 2);
	assert_eq!(appends[0], appends[1]);
	assert_eq!(rule.decl(appends[0].0).kind, DeclKind::TokenList);
	assert_eq!(local_names(&rule), vec!["ids", "ids_list"]);
}

#[test]
fn labels_are_per_rule() {
	let alt = || Alternative::new(vec![Element::token("ID")]).with_token_refs_in_actions(vec!["ID"]);
	let grammar = grammar(vec![Rule::new("a", vec![alt()]), Rule::new("b", vec![alt()])]);

	let model = match generate(&grammar, &Decisions::new()) {
		Ok(model) => model,
		Err(e) => panic!("{}", e.as_ref())
	};

	for rule in &model.rules {
		assert_eq!(rule.decls.len(), 1);
		assert_eq!(local_names(rule), vec!["_t_id"]);
	}
}

#[test]
fn label_form_first_marker_wins() {
	assert_eq!(LabelForm::resolve(vec!["+=", "="]), Some(LabelForm::Append));
	assert_eq!(LabelForm::resolve(vec!["?", "=", "+="]), Some(LabelForm::Assign));
	assert_eq!(LabelForm::resolve(Vec::<&str>::new()), None);
}

#[test]
fn forced_action_keeps_its_position() {
	// r : ID {track($ID)}! lst+=ID {done()} ;
	let alt = Alternative::new(vec![
		Element::token("ID"),
		Element::forced_action("track($ID)"),
		Element::Token(ElementRef::new("ID").labeled("lst", LabelForm::Append)),
		Element::action("done()")
	])
	.with_token_refs_in_actions(vec!["ID"]);

	let rule = build_rule(Rule::new("r", vec![alt]), &Decisions::new());
	let ops = ops(&rule);
	assert_eq!(ops.len(), 5);
	assert!(matches!(ops[0], SrcOp::MatchToken(_)));
	match ops[1] {
		SrcOp::ForcedAction(action) => assert_eq!(action.code, "track($ID)"),
		_ => panic!("expected a forced action")
	}
	assert!(matches!(ops[2], SrcOp::MatchToken(_)));
	assert!(matches!(ops[3], SrcOp::AddToLabelList(_)));
	assert!(matches!(ops[4], SrcOp::Action(_)));
}
