//! Output model construction for a parser generator.
//!
//! Given a grammar whose decisions have already been analyzed for lookahead,
//! this crate builds the structured, render-ready model of the generated
//! parser: one [`RuleFunction`](model::RuleFunction) per rule, with its choice
//! dispatch, label bindings, local declarations and tree rewrites.
//!
//! ```ignore
//! let factory = outmodel::ParserFactory::new(&decisions);
//! let model = outmodel::Generator::new(&grammar, factory).generate()?;
//! ```
extern crate source_span;

pub mod analysis;
pub mod decl;
pub mod error;
pub mod factory;
pub mod gen;
pub mod grammar;
pub mod model;
pub mod naming;
pub mod out;
pub mod syntax;
pub mod util;

pub use analysis::{
	Decisions,
	Symbol,
	TokenSet
};
pub use error::{
	Error,
	Fault,
	Result
};
pub use factory::{
	OutputModelFactory,
	ParserFactory
};
pub use gen::Generator;
pub use grammar::Grammar;
pub use naming::{
	DefaultNaming,
	Naming
};
pub use syntax::Ident;
