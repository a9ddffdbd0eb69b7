//! Per-rule local declarations.
//!
//! Every declaration created while building a rule lives in the rule's
//! [`Decls`] arena and is referred to by its [`DeclId`]. Declarations are
//! keyed by the scope that introduced them, so that asking twice for the
//! same binding yields the same declaration.
use crate::Ident;
use std::collections::HashMap;

/// Handle of a declaration in its rule arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct DeclId(u32);

impl DeclId {
	pub fn index(&self) -> usize {
		self.0 as usize
	}
}

/// Declaration scope.
///
/// The rule itself is scope `0`; each rewrite subtree opens a new scope.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ScopeId(pub u32);

impl ScopeId {
	pub const RULE: ScopeId = ScopeId(0);
}

/// Iteration mode of a rewrite iterator.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum IteratorMode {
	/// Initialized on every path.
	Single,

	/// Declared in an optional subtree: may never be initialized.
	Conditional,

	/// Declared in a closure subtree: consumed in a loop.
	Repeat
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum DeclKind {
	/// Token label.
	Token { implicit: bool },

	/// Rule invocation label, typed by the invoked rule context.
	RuleContext { ctx_type: String, implicit: bool },

	/// Token list accumulator.
	TokenList,

	/// Rule context list accumulator.
	RuleContextList { ctx_type: String },

	/// Iterator over the matches of an element in a tree rewrite.
	RewriteIterator {
		element: Ident,
		list_name: String,
		level: u32,
		mode: IteratorMode
	},

	/// Tree root at the given tree level.
	Root { level: u32 }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Decl {
	pub name: String,
	pub kind: DeclKind
}

impl Decl {
	pub fn new(name: String, kind: DeclKind) -> Self {
		Self { name, kind }
	}

	pub fn is_implicit(&self) -> bool {
		match self.kind {
			DeclKind::Token { implicit } | DeclKind::RuleContext { implicit, .. } => implicit,
			_ => false
		}
	}
}

/// Identity of a declaration within its scope.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum DeclKey {
	ImplicitToken(Ident),
	ImplicitRule(Ident),
	Label(Ident),
	ListLabel(Ident),
	Iterator(Ident, u32),
	Root(u32)
}

/// Declaration arena of a rule.
#[derive(Default, Debug)]
pub struct Decls {
	decls: Vec<Decl>,
	keys: HashMap<(ScopeId, DeclKey), DeclId>,

	/// Rule-level locals, in registration order.
	locals: Vec<DeclId>,

	next_scope: u32
}

impl Decls {
	pub fn new() -> Self {
		Self::default()
	}

	/// Declaration of the given handle.
	///
	/// # Panics
	///
	/// Panics if `id` was not created by this arena, for instance if it
	/// comes from the arena of another rule.
	pub fn get(&self, id: DeclId) -> &Decl {
		&self.decls[id.index()]
	}

	pub fn len(&self) -> usize {
		self.decls.len()
	}

	pub fn is_empty(&self) -> bool {
		self.decls.is_empty()
	}

	pub fn iter(&self) -> impl '_ + Iterator<Item = (DeclId, &Decl)> {
		self.decls
			.iter()
			.enumerate()
			.map(|(i, d)| (DeclId(i as u32), d))
	}

	/// Opens a new declaration scope.
	pub fn new_scope(&mut self) -> ScopeId {
		self.next_scope += 1;
		ScopeId(self.next_scope)
	}

	pub fn lookup(&self, scope: ScopeId, key: &DeclKey) -> Option<DeclId> {
		self.keys.get(&(scope, key.clone())).cloned()
	}

	/// Returns the declaration with the given key in the given scope,
	/// creating it with `make` if it does not exist yet.
	///
	/// The boolean is `true` if the declaration has just been created.
	pub fn define<F>(&mut self, scope: ScopeId, key: DeclKey, make: F) -> (DeclId, bool)
	where
		F: FnOnce() -> Decl,
	{
		use std::collections::hash_map::Entry;
		match self.keys.entry((scope, key)) {
			Entry::Occupied(entry) => (*entry.get(), false),
			Entry::Vacant(entry) => {
				let id = DeclId(self.decls.len() as u32);
				let decl = make();
				log::trace!("declaring `{}` ({:?})", decl.name, entry.key().1);
				self.decls.push(decl);
				entry.insert(id);
				(id, true)
			}
		}
	}

	/// Registers a declaration as a rule-level local.
	///
	/// Registering the same declaration twice has no effect.
	pub fn add_local(&mut self, id: DeclId) {
		if !self.locals.contains(&id) {
			self.locals.push(id)
		}
	}

	pub fn locals(&self) -> &[DeclId] {
		&self.locals
	}
}
