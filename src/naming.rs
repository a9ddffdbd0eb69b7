//! Target-language identifiers for grammar elements.
use crate::{
	util::{
		to_caml_case,
		to_snake_case
	},
	Ident
};

/// Naming service.
pub trait Naming {
	/// Implicit label bound to an unlabeled token referenced from an action.
	fn implicit_token_label(&self, token: &Ident) -> String;

	/// Implicit label bound to an unlabeled rule invocation referenced from an action.
	fn implicit_rule_label(&self, rule: &Ident) -> String;

	/// List accumulator of a `+=` label.
	fn list_label(&self, label: &Ident) -> String;

	/// Context type returned by the parsing function of a rule.
	fn rule_context_type(&self, rule: &Ident) -> String;

	/// Iterator over the matches of an element, at the given code block level.
	fn rewrite_iterator(&self, element: &Ident, level: u32) -> String;

	/// Tree root variable at the given tree level.
	fn root(&self, level: u32) -> String;

	/// List tracking every match of an element, read by rewrite iterators.
	fn element_list_name(&self, element: &Ident) -> String;
}

/// Snake-case locals and caml-case context types.
#[derive(Clone, Copy, Default, Debug)]
pub struct DefaultNaming;

impl Naming for DefaultNaming {
	fn implicit_token_label(&self, token: &Ident) -> String {
		format!("_t_{}", to_snake_case(token.as_str()))
	}

	fn implicit_rule_label(&self, rule: &Ident) -> String {
		format!("_r_{}", to_snake_case(rule.as_str()))
	}

	fn list_label(&self, label: &Ident) -> String {
		format!("{}_list", label)
	}

	fn rule_context_type(&self, rule: &Ident) -> String {
		format!("{}Context", to_caml_case(rule.as_str()))
	}

	fn rewrite_iterator(&self, element: &Ident, level: u32) -> String {
		format!("it_{}_{}", element.as_str().to_lowercase(), level)
	}

	fn root(&self, level: u32) -> String {
		format!("root_{}", level)
	}

	fn element_list_name(&self, element: &Ident) -> String {
		format!("{}_track", element.as_str().to_lowercase())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_names() {
		let n = DefaultNaming;
		assert_eq!(n.implicit_token_label(&"TOK_IF".into()), "_t_tok_if");
		assert_eq!(n.implicit_rule_label(&"exprList".into()), "_r_expr_list");
		assert_eq!(n.rule_context_type(&"expr_list".into()), "ExprListContext");
		assert_eq!(n.list_label(&"args".into()), "args_list");
		assert_eq!(n.rewrite_iterator(&"ID".into(), 1), "it_id_1");
		assert_eq!(n.root(0), "root_0");
	}
}
