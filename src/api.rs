use std::rc::Rc;

use crate::engine::{StateStore, Validator};
use crate::error::PolicyError;
use crate::rules::policy;
use crate::view::{FormController, PolicyHintView, SubmitState};
use crate::RuleFlags;

/// Outcome of a single rule after evaluation.
#[derive(Debug, Clone)]
pub struct RuleOutcome {
    /// Stable rule name, e.g. `"OK_LENGTH"`.
    pub name: &'static str,
    /// The hint text rendered for this rule.
    pub message: &'static str,
    pub passed: bool,
}

/// Snapshot of an evaluation: per-rule outcomes in table order, a compact
/// violation mask, and the submit state the vector produced.
#[derive(Debug, Clone)]
pub struct PolicyReport {
    pub outcomes: Vec<RuleOutcome>,
    pub violations: RuleFlags,
    pub submit: SubmitState,
}

impl PolicyReport {
    /// True when every rule passed and submit is enabled.
    pub fn satisfied(&self) -> bool {
        self.submit == SubmitState::Enabled
    }
}

/// One page session: a store, a validator, a form controller and a hint
/// view, wired together explicitly.
///
/// Construct a `Session` when the surrounding form markup exists; everything
/// is subscribed and live from that point on, and it all goes away when the
/// session is dropped. Exactly one store and one validator exist per session.
///
/// # Example
/// ```
/// use passrule::{Session, SubmitState};
///
/// let session = Session::new();
/// session.input("password", "VeryStrongPass123!").unwrap();
/// session.input("confirm", "VeryStrongPass123!").unwrap();
/// assert_eq!(session.form().submit_state(), SubmitState::Enabled);
/// ```
pub struct Session {
    store: StateStore,
    validator: Rc<Validator>,
    form: Rc<FormController>,
    hints: Rc<PolicyHintView>,
}

impl Session {
    pub fn new() -> Self {
        let store = StateStore::new();
        let validator = Validator::register(&store);
        let form = FormController::register(&store);
        let hints = PolicyHintView::register(&store, policy::default_rules());
        Self { store, validator, form, hints }
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn hints(&self) -> &PolicyHintView {
        &self.hints
    }

    /// Seed the username field from the surrounding form.
    pub fn set_username(&self, value: &str) {
        self.store.set_username(value);
    }

    /// Route a keyup/focus input event by field name. Docks the hint list
    /// and writes the value through the store.
    pub fn input(&self, field: &str, value: &str) -> Result<(), PolicyError> {
        self.form.check_policy(&self.store, field, value)
    }

    /// Snapshot the current evaluation as a report.
    ///
    /// Before the first password input the vector is still the single-entry
    /// sentinel, so the report covers only the first rule.
    pub fn report(&self) -> PolicyReport {
        let vector = self.store.valid();
        let mut violations = RuleFlags::empty();
        let outcomes = policy::default_rules()
            .iter()
            .zip(&vector)
            .map(|(rule, &passed)| {
                if !passed {
                    violations |= rule.flag;
                }
                RuleOutcome { name: rule.name, message: rule.message, passed }
            })
            .collect();
        PolicyReport { outcomes, violations, submit: self.form.submit_state() }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluate a password/confirm pair against the default policy in one shot.
///
/// # Example
/// ```
/// use passrule::evaluate;
///
/// let report = evaluate("VeryStrongPass123!", "VeryStrongPass123!");
/// assert!(report.satisfied());
/// ```
pub fn evaluate(password: &str, confirm: &str) -> PolicyReport {
    let session = Session::new();
    session.store().set_password(password);
    session.store().set_confirm(confirm);
    session.report()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{Hint, HintClass, Section};

    #[test]
    fn evaluate_strong_password() {
        let report = evaluate("VeryStrongPass123!", "VeryStrongPass123!");
        assert!(report.satisfied());
        assert_eq!(report.submit, SubmitState::Enabled);
        assert!(report.violations.is_empty());
        assert!(report.outcomes.iter().all(|outcome| outcome.passed));
    }

    #[test]
    fn evaluate_short_password() {
        let report = evaluate("short", "");
        assert!(!report.satisfied());
        assert_eq!(report.submit, SubmitState::Disabled);

        let passed: Vec<bool> = report.outcomes.iter().map(|outcome| outcome.passed).collect();
        assert_eq!(passed, vec![false, true, false, false, false, false]);
        assert_eq!(
            report.violations,
            RuleFlags::LENGTH | RuleFlags::UPPER | RuleFlags::NUMBER | RuleFlags::SPECIAL | RuleFlags::CONFIRM
        );
    }

    #[test]
    fn single_violation_keeps_submit_disabled() {
        // Each password satisfies every rule except the one named.
        let cases: Vec<(&str, &str, RuleFlags)> = vec![
            ("Aa1!Aa1!Aa1!Aa", "Aa1!Aa1!Aa1!Aa", RuleFlags::LENGTH),
            ("AAAA1111!!!!AAA", "AAAA1111!!!!AAA", RuleFlags::LOWER),
            ("aaaa1111!!!!aaa", "aaaa1111!!!!aaa", RuleFlags::UPPER),
            ("aaaaAAAA!!!!aaa", "aaaaAAAA!!!!aaa", RuleFlags::NUMBER),
            ("aaaaAAAA1111aaa", "aaaaAAAA1111aaa", RuleFlags::SPECIAL),
            ("VeryStrongPass123!", "VeryStrongPass123", RuleFlags::CONFIRM),
        ];

        for (password, confirm, expected) in cases {
            let report = evaluate(password, confirm);
            assert_eq!(report.violations, expected, "password {password:?}");
            assert_eq!(report.submit, SubmitState::Disabled);
            assert_eq!(report.outcomes.iter().filter(|outcome| !outcome.passed).count(), 1);
        }
    }

    #[test]
    fn short_password_marks_every_hint_but_lowercase() {
        let session = Session::new();
        session.input("password", "short").unwrap();

        let classes: Vec<HintClass> = session.hints().hints().iter().map(Hint::class).collect();
        assert_eq!(
            classes,
            vec![
                HintClass::Invalid,
                HintClass::Valid,
                HintClass::Invalid,
                HintClass::Invalid,
                HintClass::Invalid,
                HintClass::Invalid,
            ]
        );
        assert_eq!(session.form().submit_state(), SubmitState::Disabled);
    }

    #[test]
    fn session_end_to_end() {
        let session = Session::new();
        session.set_username("user@example.com");
        assert_eq!(session.store().username().as_deref(), Some("user@example.com"));

        session.input("password", "VeryStrongPass123!").unwrap();
        // Confirmation still missing.
        assert_eq!(session.form().submit_state(), SubmitState::Disabled);
        assert_eq!(session.hints().hints()[5].class(), HintClass::Invalid);

        session.input("confirm", "VeryStrongPass123!").unwrap();
        assert_eq!(session.form().submit_state(), SubmitState::Enabled);
        assert!(session.hints().hints().iter().all(|hint| hint.class() == HintClass::Valid));
        assert!(session.report().satisfied());

        // The hint list was docked in front of the submit control.
        assert_eq!(
            session.form().sections(),
            vec![Section::Password, Section::Confirm, Section::Policy, Section::Submit]
        );

        // A regression on either field disables submit again.
        session.input("password", "weak").unwrap();
        assert_eq!(session.form().submit_state(), SubmitState::Disabled);
    }

    #[test]
    fn unknown_input_field_is_signaled() {
        let session = Session::new();
        assert_eq!(
            session.input("secret", "x"),
            Err(PolicyError::UnknownField("secret".to_string()))
        );
    }

    #[test]
    fn sentinel_report_covers_the_first_rule_only() {
        let session = Session::new();
        let report = session.report();
        assert_eq!(report.outcomes.len(), 1);
        assert_eq!(report.violations, RuleFlags::LENGTH);
        assert!(!report.satisfied());
    }
}
