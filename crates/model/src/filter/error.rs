use thiserror::Error;

/// All the ways a filter can fail to classify or compile. These are contract
/// violations raised before any query is issued, so callers can tell them
/// apart from backend errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    /// A `$`-keyed filter object must carry exactly one operator.
    #[error("special filter must have exactly one operator key, found {found}")]
    AmbiguousSpecial { found: usize },

    /// The operator key is not part of the filter vocabulary.
    #[error("unknown filter operator: {0}")]
    UnknownOperator(String),

    /// A single-column operator payload had the wrong key count.
    #[error("{operator} expects exactly one column, found {found}")]
    OperandArity {
        operator: &'static str,
        found: usize,
    },

    /// An operator payload had the wrong shape entirely.
    #[error("{operator} expects {expected}")]
    InvalidOperand {
        operator: &'static str,
        expected: &'static str,
    },

    /// A raw fragment's placeholder count disagrees with its bindings.
    #[error("$raw has {placeholders} placeholders but {bindings} bindings")]
    RawArity {
        placeholders: usize,
        bindings: usize,
    },

    /// A named placeholder in a raw fragment has no matching binding.
    #[error("$raw has no binding for :{0}")]
    MissingBinding(String),

    /// Nesting went past the compiler's recursion ceiling.
    #[error("filter nesting exceeded {max} levels")]
    DepthExceeded { max: usize },

    /// A deferred filter resolved to an error.
    #[error("deferred filter failed: {0}")]
    Deferred(String),
}
