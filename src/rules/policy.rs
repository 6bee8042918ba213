//! The fixed password-policy rule table.
//!
//! Table order is load-bearing: the validity vector, the hint list and the
//! flag bits are all index-aligned with it.

use once_cell::sync::Lazy;

use crate::engine::StateStore;
use crate::{Rule, RuleFlags};

/// Number of rules in the fixed policy table.
pub const RULE_COUNT: usize = 6;

static RULES: Lazy<Vec<Rule>> = Lazy::new(get);

/// The fixed policy rule table, in hint order.
pub fn default_rules() -> &'static [Rule] {
    &RULES
}

fn get() -> Vec<Rule> {
    vec![
        rule_length(),
        rule_lower(),
        rule_upper(),
        rule_number(),
        rule_special(),
        rule_confirm(),
    ]
}

/// Match when the password is 15 to 200 characters long.
fn rule_length() -> Rule {
    rule! {
        name: "OK_LENGTH",
        message: "has a minimum length of 15 characters",
        flag: RuleFlags::LENGTH,
        check: re!(r"^.{15,200}$"),
    }
}

fn rule_lower() -> Rule {
    rule! {
        name: "HAS_LOWER",
        message: "contains lower case characters [a-z]",
        flag: RuleFlags::LOWER,
        check: re!(r"[a-z]"),
    }
}

fn rule_upper() -> Rule {
    rule! {
        name: "HAS_UPPER",
        message: "contains upper case characters [A-Z]",
        flag: RuleFlags::UPPER,
        check: re!(r"[A-Z]"),
    }
}

fn rule_number() -> Rule {
    rule! {
        name: "HAS_NUMBER",
        message: "contains numbers [0-9]",
        flag: RuleFlags::NUMBER,
        check: re!(r"\d"),
    }
}

fn rule_special() -> Rule {
    rule! {
        name: "HAS_SPECIAL",
        message: "contains characters other than [a-z] [A-Z] [0-9]",
        flag: RuleFlags::SPECIAL,
        check: re!(r"[^a-zA-Z0-9]"),
    }
}

fn rule_confirm() -> Rule {
    rule! {
        name: "OK_CONFIRM",
        message: "confirmation and password are equal",
        flag: RuleFlags::CONFIRM,
        check: pred!(confirmation_matches),
    }
}

/// The confirmation rule closes over live state: the confirm value is read
/// from the store at evaluation time, not taken from the password argument.
/// An empty password never confirms, whatever the confirm field holds.
fn confirmation_matches(password: &str, store: &StateStore) -> bool {
    !password.is_empty() && store.confirm().as_deref() == Some(password)
}
