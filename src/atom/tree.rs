use serde::{Deserialize, Serialize};

/// Index of an atom inside its [`AtomTree`] arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AtomId(usize);

impl AtomId {
    /// Position of the atom in the arena
    pub fn index(self) -> usize {
        self.0
    }
}

/// The tagged payload of an atom
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum AtomKind {
    /// Empty sequence / sequence terminator
    #[default]
    Nil,
    /// Malformed token, with a human-readable message
    Error(String),
    /// Integer literal
    Int(i64),
    /// Floating-point literal
    Float(f64),
    /// String literal, quotes and escapes removed
    String(String),
    /// Symbol, literal token text
    Symbol(String),
    /// Marks the following atom as quoted
    Quote,
    /// Nested list; the contents hang off `child`
    Branch,
}

impl AtomKind {
    /// Short lowercase name of the kind
    pub fn name(&self) -> &'static str {
        match self {
            AtomKind::Nil => "nil",
            AtomKind::Error(_) => "error",
            AtomKind::Int(_) => "int",
            AtomKind::Float(_) => "float",
            AtomKind::String(_) => "string",
            AtomKind::Symbol(_) => "symbol",
            AtomKind::Quote => "quote",
            AtomKind::Branch => "branch",
        }
    }
}

/// A single node of the parsed program
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Atom {
    pub(crate) kind: AtomKind,
    pub(crate) next: Option<AtomId>,
    pub(crate) child: Option<AtomId>,
}

impl Atom {
    /// Kind and payload
    pub fn kind(&self) -> &AtomKind {
        &self.kind
    }

    /// Rest of the sequence this atom belongs to
    pub fn next(&self) -> Option<AtomId> {
        self.next
    }

    /// Head of the nested sequence, only set on `Branch`
    pub fn child(&self) -> Option<AtomId> {
        self.child
    }

    /// Whether this is a `Nil` sentinel
    pub fn is_nil(&self) -> bool {
        matches!(self.kind, AtomKind::Nil)
    }
}

/// Arena holding every atom produced by one parse
///
/// Each atom is owned exactly once: it is the root, some atom's `next`, or a
/// branch's `child`. Every sequence ends in a `Nil` atom with no `next`.
#[derive(Debug, Clone)]
pub struct AtomTree {
    atoms: Vec<Atom>,
    root: AtomId,
}

impl Default for AtomTree {
    fn default() -> Self {
        Self::new()
    }
}

impl AtomTree {
    /// Creates a tree holding a single `Nil` root
    pub fn new() -> Self {
        AtomTree {
            atoms: vec![Atom::default()],
            root: AtomId(0),
        }
    }

    /// First atom of the top-level sequence
    pub fn root(&self) -> AtomId {
        self.root
    }

    /// Atom stored under `id`
    ///
    /// Panics if `id` came from a different tree and is out of range.
    pub fn get(&self, id: AtomId) -> &Atom {
        &self.atoms[id.0]
    }

    /// Number of atoms in the arena, sentinels included
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    /// Always false: a tree holds at least its root sentinel
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// View of the atom under `id`
    pub fn node(&self, id: AtomId) -> Node<'_> {
        Node { tree: self, id }
    }

    /// Forms of the sequence starting at `id`, `Nil` sentinel excluded
    pub fn siblings(&self, id: AtomId) -> Siblings<'_> {
        Siblings {
            tree: self,
            cursor: Some(id),
        }
    }

    /// Top-level forms of the program
    pub fn top_level(&self) -> Siblings<'_> {
        self.siblings(self.root)
    }

    /// Contents of a branch; empty for any other kind
    pub fn children(&self, id: AtomId) -> Siblings<'_> {
        Siblings {
            tree: self,
            cursor: self.get(id).child,
        }
    }

    /// Every `Error` atom, in document order
    pub fn errors(&self) -> Vec<(AtomId, &str)> {
        let mut found = Vec::new();
        let mut pending = vec![self.root];

        while let Some(id) = pending.pop() {
            let atom = self.get(id);
            if let AtomKind::Error(message) = &atom.kind {
                found.push((id, message.as_str()));
            }
            // Child goes on top so a list's contents come before its successors
            pending.extend(atom.next);
            pending.extend(atom.child);
        }

        found
    }

    /// Whether the tree contains any `Error` atom
    pub fn has_errors(&self) -> bool {
        self.atoms
            .iter()
            .any(|atom| matches!(atom.kind, AtomKind::Error(_)))
    }

    /// Compares shape and values, ignoring how the arenas are laid out
    pub fn structurally_eq(&self, other: &AtomTree) -> bool {
        let mut pending = vec![(Some(self.root), Some(other.root))];

        while let Some(pair) = pending.pop() {
            match pair {
                (None, None) => {}
                (Some(a), Some(b)) => {
                    let left = self.get(a);
                    let right = other.get(b);
                    if left.kind != right.kind {
                        return false;
                    }
                    pending.push((left.next, right.next));
                    pending.push((left.child, right.child));
                }
                _ => return false,
            }
        }

        true
    }

    pub(crate) fn alloc(&mut self) -> AtomId {
        self.atoms.push(Atom::default());
        AtomId(self.atoms.len() - 1)
    }

    pub(crate) fn set_kind(&mut self, id: AtomId, kind: AtomKind) {
        self.atoms[id.0].kind = kind;
    }

    /// Gives `id` a fresh `Nil` successor and returns it
    pub(crate) fn push_next(&mut self, id: AtomId) -> AtomId {
        let next = self.alloc();
        self.atoms[id.0].next = Some(next);
        next
    }

    /// Turns `id` into a `Branch` with an empty child sequence, returning the child slot
    pub(crate) fn open_branch(&mut self, id: AtomId) -> AtomId {
        let child = self.alloc();
        let atom = &mut self.atoms[id.0];
        atom.kind = AtomKind::Branch;
        atom.child = Some(child);
        child
    }
}

/// Borrowed view of one atom together with its tree
#[derive(Debug, Clone, Copy)]
pub struct Node<'a> {
    tree: &'a AtomTree,
    id: AtomId,
}

impl<'a> Node<'a> {
    /// Arena index
    pub fn id(&self) -> AtomId {
        self.id
    }

    /// Underlying atom
    pub fn atom(&self) -> &'a Atom {
        self.tree.get(self.id)
    }

    /// Kind and payload
    pub fn kind(&self) -> &'a AtomKind {
        &self.atom().kind
    }

    /// Contents of the list, empty unless this is a `Branch`
    pub fn children(&self) -> Siblings<'a> {
        self.tree.children(self.id)
    }

    /// Whether this is a `Branch`
    pub fn is_branch(&self) -> bool {
        matches!(self.kind(), AtomKind::Branch)
    }
}

/// Iterator over one sequence, stopping at its `Nil` sentinel
#[derive(Debug, Clone)]
pub struct Siblings<'a> {
    tree: &'a AtomTree,
    cursor: Option<AtomId>,
}

impl<'a> Iterator for Siblings<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let atom = self.tree.get(id);
        if atom.is_nil() {
            self.cursor = None;
            return None;
        }
        self.cursor = atom.next;
        Some(Node {
            tree: self.tree,
            id,
        })
    }
}
