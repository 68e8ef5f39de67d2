//! TypeScript IR types for code generation.
//!
//! This module defines the slice of the TypeScript language that generated
//! model units use:
//! - TsType: Types (primitives, arrays, tuples, unions, literals, ...)
//! - TsExpr / TsStmt: The handful of expressions a type guard needs
//! - TsTypeDef / TsFunction / TsImport / TsModule: Top-level declarations

/// TypeScript type representation
#[derive(Debug, Clone, PartialEq)]
pub enum TsType {
    /// Primitive types: string, number, boolean, unknown, any
    Primitive(TsPrimitive),
    /// Array type: T[]
    Array(Box<TsType>),
    /// Fixed-length tuple: [A, B]
    Tuple(Vec<TsType>),
    /// Union type: A | B | C
    Union(Vec<TsType>),
    /// Object type: { foo: string; bar?: number }
    Object(Vec<TsProp>),
    /// Open string-keyed map: { [key: string]: T }
    Map(Box<TsType>),
    /// Literal type: 'foo'
    Literal(TsLiteral),
    /// Named type reference: Article, Date, or a caller-supplied type
    Ref(String),
    /// Type predicate in return position: obj is Article
    Predicate {
        /// Narrowed parameter
        param: String,
        /// Type it narrows to
        ty: Box<TsType>,
    },
}

impl TsType {
    /// Shorthand for `TsType::Primitive(TsPrimitive::String)`.
    pub const fn string() -> Self {
        TsType::Primitive(TsPrimitive::String)
    }

    /// Shorthand for the permissive fallback `any`.
    pub const fn any() -> Self {
        TsType::Primitive(TsPrimitive::Any)
    }

    /// Shorthand for the unknown-kind fallback `unknown`.
    pub const fn unknown() -> Self {
        TsType::Primitive(TsPrimitive::Unknown)
    }

    /// Build a union, collapsing a single member to itself.
    ///
    /// An empty member list yields `any` so the result is always a valid type.
    pub fn union(mut members: Vec<TsType>) -> Self {
        match members.len() {
            0 => TsType::any(),
            1 => members.pop().unwrap_or_else(TsType::any),
            _ => TsType::Union(members),
        }
    }

    /// Wrap this type in an array.
    pub fn array_of(self) -> Self {
        TsType::Array(Box::new(self))
    }

    /// Check if this type is a union of more than one member.
    pub fn is_union(&self) -> bool {
        matches!(self, TsType::Union(members) if members.len() > 1)
    }
}

/// TypeScript primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TsPrimitive {
    /// string
    String,
    /// number
    Number,
    /// boolean
    Boolean,
    /// unknown
    Unknown,
    /// any
    Any,
}

/// Object or interface property definition
#[derive(Debug, Clone, PartialEq)]
pub struct TsProp {
    /// Key, quoted on emission when not an identifier
    pub name: String,
    /// Value type
    pub ty: TsType,
    /// Emitted with `?`
    pub optional: bool,
}

/// TypeScript literal values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsLiteral {
    /// Single-quoted string literal
    String(String),
}

/// TypeScript expression
#[derive(Debug, Clone, PartialEq)]
pub enum TsExpr {
    /// Identifier: foo
    Ident(String),
    /// Literal value: 'bar'
    Literal(TsLiteral),
    /// Member access: foo.bar
    Member {
        /// Accessed object
        object: Box<TsExpr>,
        /// Property name
        prop: String,
    },
    /// Strict comparison: a === b
    StrictEqual {
        /// Left operand
        left: Box<TsExpr>,
        /// Right operand
        right: Box<TsExpr>,
    },
}

/// Function parameter
#[derive(Debug, Clone, PartialEq)]
pub struct TsParam {
    /// Parameter name
    pub name: String,
    /// Annotated type
    pub ty: TsType,
}

// =============================================================================
// Module-Level IR (for printer)
// =============================================================================

/// Import statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsImport {
    /// Names to import
    pub items: Vec<String>,
    /// Module path, relative to the importing unit
    pub from: String,
    /// Whether this is a type-only import
    pub type_only: bool,
}

/// Type definition kind
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDefKind {
    /// interface Foo { ... }
    ///
    /// `raw_members` are appended verbatim after the typed properties.
    Interface {
        /// Typed members, in order
        properties: Vec<TsProp>,
        /// Verbatim `name: type` members
        raw_members: Vec<String>,
    },
    /// enum Foo { a = "a" }
    Enum {
        /// Member values; each becomes both key and string value
        members: Vec<String>,
    },
}

/// Type definition
#[derive(Debug, Clone, PartialEq)]
pub struct TsTypeDef {
    /// Exported name
    pub name: String,
    /// Rendered as a `/** ... */` block above the declaration.
    pub doc: Option<String>,
    /// Interface or enum body
    pub kind: TypeDefKind,
}

/// Statement in a function body
#[derive(Debug, Clone, PartialEq)]
pub enum TsStmt {
    /// Return statement
    Return(TsExpr),
}

/// Exported function definition
#[derive(Debug, Clone, PartialEq)]
pub struct TsFunction {
    /// Function name
    pub name: String,
    /// Parameters, in order
    pub params: Vec<TsParam>,
    /// Annotated return type
    pub return_type: TsType,
    /// Statements of the body
    pub body: Vec<TsStmt>,
}

/// Complete TypeScript module (one output unit)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TsModule {
    /// Import lines, already sorted
    pub imports: Vec<TsImport>,
    /// Interface and enum declarations
    pub types: Vec<TsTypeDef>,
    /// Functions after the declarations
    pub functions: Vec<TsFunction>,
}
