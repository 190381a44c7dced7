//! Declaration tree for workload definition files.
//!
//! The tree is a closed tagged union: every node shape a rule can encounter
//! is an [`Expr`] variant, so matchers pattern-match variants instead of
//! performing ad hoc downcasts. Comments are attached to the declaration or
//! field entry they precede (or trail) and survive re-serialization.

/// A source position (1-indexed line and column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub line: u32,
    pub column: u32,
}

impl Span {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// A comment, stored with its delimiters (`// ...` or `/* ... */`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
    pub line: u32,
}

/// A parsed workload definition file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Package name from the `package` clause, if present.
    pub package: Option<String>,
    /// The raw `import ...` block, reproduced verbatim by the printer.
    pub imports: Option<String>,
    /// Top-level `var` declarations, in source order.
    pub decls: Vec<VarDecl>,
    /// Comments at end of file not attached to any declaration.
    pub trailing_comments: Vec<Comment>,
}

impl SourceFile {
    /// Look up a top-level declaration by variable name.
    pub fn decl(&self, name: &str) -> Option<&VarDecl> {
        self.decls.iter().find(|d| d.name == name)
    }
}

/// A top-level `var NAME = EXPR` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDecl {
    pub name: String,
    pub init: Expr,
    pub span: Span,
    pub leading_comments: Vec<Comment>,
}

/// An expression node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A construction expression: `pkg.Type{...}`, `[]pkg.Type{...}`,
    /// `map[string]string{...}`, or an untyped `{...}` element.
    Composite(CompositeLit),
    /// Reference-taking: `&expr`.
    Ref(Box<Expr>, Span),
    /// A call expression: `ptr.To(5)`, `resource.MustParse("100m")`.
    Call(CallExpr),
    /// A string literal (interpreted or raw).
    Str(StrLit),
    /// An integer literal.
    Int(IntLit),
    /// A boolean literal.
    Bool(BoolLit),
    /// An identifier or selector chain: `other`, `other.Spec.Name`.
    Path(PathExpr),
}

impl Expr {
    /// The source position of this expression.
    pub fn span(&self) -> Span {
        match self {
            Expr::Composite(c) => c.span,
            Expr::Ref(_, span) => *span,
            Expr::Call(c) => c.span,
            Expr::Str(s) => s.span,
            Expr::Int(i) => i.span,
            Expr::Bool(b) => b.span,
            Expr::Path(p) => p.span,
        }
    }

    /// Strip one layer of reference-taking, so `&T{...}` and `T{...}` are
    /// treated identically.
    pub fn unref(&self) -> &Expr {
        match self {
            Expr::Ref(inner, _) => inner,
            other => other,
        }
    }

    /// View this expression as a construction expression, transparently
    /// through one reference-taking layer.
    pub fn as_composite(&self) -> Option<&CompositeLit> {
        match self.unref() {
            Expr::Composite(c) => Some(c),
            _ => None,
        }
    }

    /// Mutable form of [`Expr::as_composite`].
    pub fn as_composite_mut(&mut self) -> Option<&mut CompositeLit> {
        let inner = match self {
            Expr::Ref(inner, _) => inner.as_mut(),
            other => other,
        };
        match inner {
            Expr::Composite(c) => Some(c),
            _ => None,
        }
    }

    /// Whether this is a call expression, through one reference-taking layer.
    pub fn is_call(&self) -> bool {
        matches!(self.unref(), Expr::Call(_))
    }
}

/// A string literal. Raw literals are backtick-delimited in source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrLit {
    pub value: String,
    pub raw: bool,
    pub span: Span,
}

/// An integer literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntLit {
    pub value: i64,
    pub span: Span,
}

/// A boolean literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoolLit {
    pub value: bool,
    pub span: Span,
}

/// An identifier or dotted selector chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpr {
    pub segments: Vec<String>,
    pub span: Span,
}

impl PathExpr {
    /// The root identifier of the chain.
    pub fn root(&self) -> &str {
        &self.segments[0]
    }

    /// Render the chain as written (`a.b.c`).
    pub fn dotted(&self) -> String {
        self.segments.join(".")
    }
}

/// A call expression with a (possibly dotted) callee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallExpr {
    pub callee: PathExpr,
    pub args: Vec<Expr>,
    pub span: Span,
}

/// The declared type of a composite literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    /// `pkg.Type` or `Type`.
    Named(Vec<String>),
    /// `[]T`.
    Slice(Box<TypeRef>),
    /// `map[K]V`.
    Map(Box<TypeRef>, Box<TypeRef>),
}

impl TypeRef {
    /// The final identifier of a named type (`corev1.Container` -> `Container`).
    pub fn last_segment(&self) -> Option<&str> {
        match self {
            TypeRef::Named(segments) => segments.last().map(String::as_str),
            _ => None,
        }
    }

    /// The element type of a slice, if this is a slice type.
    pub fn slice_elem(&self) -> Option<&TypeRef> {
        match self {
            TypeRef::Slice(elem) => Some(elem),
            _ => None,
        }
    }

    pub fn is_map(&self) -> bool {
        matches!(self, TypeRef::Map(_, _))
    }
}

/// A construction expression with named, keyed, or positional entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeLit {
    /// Declared type. `None` for untyped elements inside slice/map literals
    /// until the parser resolves the implied element type.
    pub ty: Option<TypeRef>,
    pub entries: Vec<Entry>,
    pub span: Span,
}

impl CompositeLit {
    /// The final identifier of the declared type, if named.
    pub fn type_name(&self) -> Option<&str> {
        self.ty.as_ref().and_then(TypeRef::last_segment)
    }

    /// The value bound to a named field, or `None`.
    pub fn field(&self, name: &str) -> Option<&Expr> {
        self.entries.iter().find_map(|e| match &e.key {
            EntryKey::Field(f) if f == name => Some(&e.value),
            _ => None,
        })
    }

    /// Mutable form of [`CompositeLit::field`].
    pub fn field_mut(&mut self, name: &str) -> Option<&mut Expr> {
        self.entries.iter_mut().find_map(|e| match &e.key {
            EntryKey::Field(f) if f == name => Some(&mut e.value),
            _ => None,
        })
    }

    /// Index of the entry for a named field.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| match &e.key {
            EntryKey::Field(f) => f == name,
            _ => false,
        })
    }
}

/// How an entry is keyed inside a construction expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKey {
    /// `Field: value` in a struct-shaped literal.
    Field(String),
    /// `"key": value` in a map literal.
    Keyed(Box<Expr>),
    /// Positional element of a slice literal.
    Positional,
}

/// One field/element entry of a construction expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: EntryKey,
    pub value: Expr,
    pub span: Span,
    pub leading_comments: Vec<Comment>,
    pub trailing_comment: Option<Comment>,
}

impl Entry {
    /// Build a plain `Field: value` entry with no comments, as inserted by fixes.
    pub fn field(name: impl Into<String>, value: Expr) -> Self {
        Self {
            key: EntryKey::Field(name.into()),
            value,
            span: Span::default(),
            leading_comments: Vec::new(),
            trailing_comment: None,
        }
    }
}

/// Nesting depth of an expression.
///
/// A construction node's depth is 1 + the maximum depth of its entry values;
/// scalars and absent values are depth 0. Reference-taking is transparent.
pub fn depth(expr: &Expr) -> u32 {
    match expr.unref() {
        Expr::Composite(c) => {
            1 + c
                .entries
                .iter()
                .map(|e| depth(&e.value))
                .max()
                .unwrap_or(0)
        }
        _ => 0,
    }
}
