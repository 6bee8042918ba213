extern crate self as passrule;

use regex::Regex;

#[macro_use]
mod macros;
mod api;
mod engine;
mod error;
mod rules;
mod view;

pub use api::{PolicyReport, RuleOutcome, Session, evaluate};
pub use engine::{StateStore, Validator};
pub use error::PolicyError;
pub use rules::policy::{RULE_COUNT, default_rules};
pub use view::{FormController, Hint, HintClass, PolicyHintView, Section, SubmitState};

// --- Core types ---------------------------------------------------------------

/// Fields tracked by the reactive state store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Username,
    Password,
    Confirm,
    Valid,
}

impl Field {
    /// Name used by the string-keyed entry points of the surrounding form glue.
    pub fn name(self) -> &'static str {
        match self {
            Field::Username => "username",
            Field::Password => "password",
            Field::Confirm => "confirm",
            Field::Valid => "valid",
        }
    }

    /// Slot into the per-field listener registries.
    pub(crate) fn index(self) -> usize {
        match self {
            Field::Username => 0,
            Field::Password => 1,
            Field::Confirm => 2,
            Field::Valid => 3,
        }
    }
}

impl std::str::FromStr for Field {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "username" => Ok(Field::Username),
            "password" => Ok(Field::Password),
            "confirm" => Ok(Field::Confirm),
            "valid" => Ok(Field::Valid),
            other => Err(PolicyError::UnknownField(other.to_string())),
        }
    }
}

/// A field change delivered to observers, carrying the new value. The store
/// is passed alongside in [`Observer::on_change`] so observers can read other
/// live fields without holding a back-reference.
#[derive(Debug, Clone, Copy)]
pub enum Change<'a> {
    Username(&'a str),
    Password(&'a str),
    Confirm(&'a str),
    Valid(&'a [bool]),
}

impl Change<'_> {
    /// The field this change belongs to.
    pub fn field(&self) -> Field {
        match self {
            Change::Username(_) => Field::Username,
            Change::Password(_) => Field::Password,
            Change::Confirm(_) => Field::Confirm,
            Change::Valid(_) => Field::Valid,
        }
    }
}

/// Synchronous observer of state-store fields.
///
/// Notification happens on the same call stack as the triggering write, in
/// registration order. An observer may write back into the store from its own
/// callback; unchanged values short-circuit, so propagation terminates.
pub trait Observer {
    fn on_change(&self, store: &StateStore, change: Change<'_>);
}

// Checks used by policy rules: either a regex matched against the password,
// or a predicate that may read other live fields from the store.
#[derive(Clone, Copy)]
pub enum Check {
    /// Match a regular expression against the password. The `Regex` is stored
    /// as a static reference (created via the `regex!` helper macro in
    /// `src/macros.rs`).
    Pattern(&'static Regex),

    /// Decide from the password plus live store state. Used by the
    /// confirmation rule, which compares against the current confirm value at
    /// evaluation time.
    Predicate(fn(&str, &StateStore) -> bool),
}

impl std::fmt::Debug for Check {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Check::Pattern(pattern) => f.debug_tuple("Pattern").field(pattern).finish(),
            Check::Predicate(_) => f.write_str("Predicate(<function>)"),
        }
    }
}

/// A policy rule: a stable name, the English hint text rendered for it, a
/// flag bit for compact violation reporting, and its check.
///
/// Rules are immutable and defined once at load time; hint ordering depends
/// on table order, so the table is never reordered.
#[derive(Debug)]
pub struct Rule {
    pub name: &'static str,
    pub message: &'static str,
    pub flag: RuleFlags,
    pub check: Check,
}

impl Rule {
    /// Evaluate this rule against the given password and live state.
    pub fn matches(&self, password: &str, store: &StateStore) -> bool {
        match self.check {
            Check::Pattern(pattern) => pattern.is_match(password),
            Check::Predicate(predicate) => predicate(password, store),
        }
    }
}

bitflags::bitflags! {
    /// One bit per policy rule, used to report violations compactly.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RuleFlags: u8 {
        const LENGTH  = 1 << 0;
        const LOWER   = 1 << 1;
        const UPPER   = 1 << 2;
        const NUMBER  = 1 << 3;
        const SPECIAL = 1 << 4;
        const CONFIRM = 1 << 5;
    }
}
