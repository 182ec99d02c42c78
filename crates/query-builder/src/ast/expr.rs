//! Defines the AST for SQL expressions.

use model::core::value::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A column identifier, e.g. `age`.
    Identifier(Ident),

    /// A literal value, bound as a parameter at render time.
    Value(Value),

    /// The `*` projection.
    Wildcard,

    /// A binary operation, e.g. `age >= 21` or `a AND b`.
    BinaryOp(Box<BinaryOp>),

    /// A function call, e.g. `COUNT(*)`.
    FunctionCall(FunctionCall),

    /// `NOT (expr)`, negating the inner predicate as one group.
    Not(Box<Expr>),

    /// `expr [NOT] IN (v1, v2, ...)`.
    InList {
        expr: Box<Expr>,
        list: Vec<Expr>,
        negated: bool,
    },

    /// `expr [NOT] BETWEEN low AND high`, bounds inclusive.
    Between {
        expr: Box<Expr>,
        low: Box<Expr>,
        high: Box<Expr>,
        negated: bool,
    },

    /// `expr IS [NOT] NULL`.
    IsNull { expr: Box<Expr>, negated: bool },

    /// A raw predicate fragment. `?` placeholders are substituted with the
    /// dialect's parameter syntax at render time, one binding each.
    Raw { sql: String, bindings: Vec<Value> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOp {
    pub left: Expr,
    pub op: BinaryOperator,
    pub right: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    pub args: Vec<Expr>,
    pub wildcard: bool, // the '*' in 'COUNT(*)'
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    // Comparison
    Eq,   // =
    Lt,   // <
    LtEq, // <=
    Gt,   // >
    GtEq, // >=

    // Logical
    And,
    Or,
}
