//! Human readable fault reports.
use crate::{
	error::Error,
	Ident
};
use std::fmt;
use yansi::Paint;

pub enum Type {
	Error
}

impl fmt::Display for Type {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Error => write!(f, "{}", Paint::red("error").bold())
		}
	}
}

pub enum NoteType {
	Note,
	Help
}

impl fmt::Display for NoteType {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Note => write!(f, "{}", Paint::new("note").bold()),
			Self::Help => write!(f, "{}", Paint::green("help").bold())
		}
	}
}

pub struct Note {
	ty: NoteType,
	content: String
}

pub struct Report {
	ty: Type,
	title: String,
	message: String,
	notes: Vec<Note>
}

impl Report {
	pub fn new<T: ToString, M: ToString>(ty: Type, title: T, message: M) -> Report {
		Report {
			ty,
			title: title.to_string(),
			message: message.to_string(),
			notes: Vec::new()
		}
	}

	/// Report of a fault raised while building the given rule.
	pub fn fault(rule: &Ident, e: &Error) -> Report {
		let mut report = Report::new(Type::Error, e.title(), e);
		report.add_note(NoteType::Note, format!("while building rule `{}`", rule));

		match e {
			Error::OverlappingAlternatives { .. } => report.add_note(
				NoteType::Help,
				"the lookahead analysis or the decision classifier is inconsistent"
			),
			Error::UnresolvedReference(_) => report.add_note(
				NoteType::Help,
				"rewrite references must be checked against the alternative before model construction"
			),
			_ => ()
		}

		report
	}

	pub fn add_note<S: ToString>(&mut self, ty: NoteType, content: S) {
		self.notes.push(Note {
			ty,
			content: content.to_string()
		})
	}
}

impl fmt::Display for Report {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		writeln!(f, "{}{} {}", self.ty, Paint::new(':').bold(), Paint::new(&self.title).bold())?;
		writeln!(f, "  {} {}", Paint::blue('|').bold(), self.message)?;

		for note in &self.notes {
			for (i, line) in note.content.lines().enumerate() {
				if i == 0 {
					writeln!(f, "  = {}: {}", note.ty, line)?;
				} else {
					writeln!(f, "    {}", line)?
				}
			}
		}

		Ok(())
	}
}
