use itertools::Itertools;

/// Words of an identifier.
///
/// Words are separated by `_`, `-` or spaces, and by a lower case (or digit)
/// to upper case transition.
fn words(s: &str) -> Vec<&str> {
	let mut words = Vec::new();
	let mut start = None;
	let mut after_lower = false;

	for (i, c) in s.char_indices() {
		if c == '_' || c == '-' || c == ' ' {
			if let Some(b) = start.take() {
				words.push(&s[b..i])
			}
			after_lower = false;
			continue
		}

		if c.is_uppercase() && after_lower {
			if let Some(b) = start.take() {
				words.push(&s[b..i])
			}
		}

		start.get_or_insert(i);
		after_lower = c.is_lowercase() || c.is_numeric();
	}

	if let Some(b) = start {
		words.push(&s[b..])
	}

	words
}

/// `expr_list` → `ExprList`.
pub fn to_caml_case(s: &str) -> String {
	words(s)
		.into_iter()
		.map(|w| {
			let mut chars = w.chars();
			match chars.next() {
				Some(first) => first.to_uppercase().chain(chars).collect(),
				None => String::new()
			}
		})
		.collect()
}

/// `exprList` → `expr_list`, `TOK_IF` → `tok_if`.
pub fn to_snake_case(s: &str) -> String {
	words(s).into_iter().map(str::to_lowercase).join("_")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn caml_case() {
		assert_eq!(to_caml_case("expr_list"), "ExprList");
		assert_eq!(to_caml_case("stat"), "Stat");
		assert_eq!(to_caml_case("exprList"), "ExprList");
		assert_eq!(to_caml_case("__a--b"), "AB");
	}

	#[test]
	fn snake_case() {
		assert_eq!(to_snake_case("exprList"), "expr_list");
		assert_eq!(to_snake_case("Expr_List"), "expr_list");
		assert_eq!(to_snake_case("TOK_IF"), "tok_if");
		assert_eq!(to_snake_case("expr2Tail"), "expr2_tail");
		assert_eq!(to_snake_case(""), "");
	}
}
