use source_span::{
	Loc,
	Span
};
use std::fmt;

/// Grammar identifier (token, rule or label name).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct Ident(pub String);

impl Ident {
	pub fn new<S: ToString>(s: S) -> Ident {
		Ident(s.to_string())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Attach a span to this identifier.
	pub fn at(self, span: Span) -> Loc<Ident> {
		Loc::new(self, span)
	}

	/// Attach the default (unknown) span to this identifier.
	pub fn unlocated(self) -> Loc<Ident> {
		Loc::new(self, Span::default())
	}
}

impl<'a> From<&'a str> for Ident {
	fn from(s: &'a str) -> Ident {
		Ident(s.to_string())
	}
}

impl PartialEq<str> for Ident {
	fn eq(&self, other: &str) -> bool {
		self.0 == other
	}
}

impl fmt::Display for Ident {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		fmt::Display::fmt(&self.0, f)
	}
}
