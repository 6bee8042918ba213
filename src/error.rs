use thiserror::Error;

/// Errors surfaced at the string-keyed boundary between the engine and the
/// surrounding form glue.
///
/// Schema violations inside typed code are unrepresentable by construction:
/// the check variants form a closed enum and observers implement a declared
/// trait, so a malformed rule or a subscriber missing its callback cannot
/// reach runtime. What remains is the glue layer addressing fields by name.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    /// A field name outside the fixed schema.
    #[error("unknown field `{0}`")]
    UnknownField(String),

    /// A field that exists but does not hold a text value.
    #[error("field `{0}` does not hold a text value")]
    NotText(&'static str),
}
