//! Update-password form controller: the submit gate and the hint placement.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::debug;

use crate::engine::StateStore;
use crate::error::PolicyError;
use crate::{Change, Field, Observer};

/// Observable state of the submit control. The control itself lives in the
/// glue layer; this is the state it mirrors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Disabled,
    Enabled,
}

/// Layout slots of the update-password form, in visual order. `Policy` is
/// the hint list; the glue layer keeps the real markup in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Password,
    Confirm,
    Policy,
    Submit,
}

/// Gates the submit control on the all-true reduction of the validity
/// vector and owns the form's section ordering.
///
/// Starts `Disabled`; any vector update that is not non-empty-and-all-true
/// transitions back to `Disabled`. The hint list starts detached and is
/// docked in front of the submit control on the first input event.
pub struct FormController {
    submit: Cell<SubmitState>,
    sections: RefCell<Vec<Section>>,
}

impl FormController {
    /// Build a controller and subscribe it to validity changes.
    pub fn register(store: &StateStore) -> Rc<Self> {
        let controller = Rc::new(Self {
            submit: Cell::new(SubmitState::Disabled),
            sections: RefCell::new(vec![Section::Password, Section::Confirm, Section::Submit]),
        });
        store.add_listener(Field::Valid, controller.clone());
        controller
    }

    pub fn submit_state(&self) -> SubmitState {
        self.submit.get()
    }

    /// Current section ordering, for the glue layer to mirror.
    pub fn sections(&self) -> Vec<Section> {
        self.sections.borrow().clone()
    }

    /// Keyup/focus entry point: dock the hint list in front of the submit
    /// control, then push the raw input value into the store by field name.
    pub fn check_policy(
        &self,
        store: &StateStore,
        field: &str,
        value: &str,
    ) -> Result<(), PolicyError> {
        self.place_hint_before_submit();
        store.set_value(field, value)
    }

    /// Move the hint section to immediately precede the submit control.
    /// Remove-then-insert makes repeated calls land on the same position.
    pub fn place_hint_before_submit(&self) {
        let mut sections = self.sections.borrow_mut();
        sections.retain(|section| *section != Section::Policy);
        let at = sections
            .iter()
            .position(|section| *section == Section::Submit)
            .unwrap_or(sections.len());
        sections.insert(at, Section::Policy);
    }
}

impl Observer for FormController {
    fn on_change(&self, _store: &StateStore, change: Change<'_>) {
        if let Change::Valid(vector) = change {
            // An empty vector must never enable submit.
            let next = if !vector.is_empty() && vector.iter().all(|&ok| ok) {
                SubmitState::Enabled
            } else {
                SubmitState::Disabled
            };
            if next != self.submit.get() {
                debug!(?next, "submit state transition");
                self.submit.set(next);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_starts_disabled() {
        let store = StateStore::new();
        let form = FormController::register(&store);
        assert_eq!(form.submit_state(), SubmitState::Disabled);
    }

    #[test]
    fn submit_enables_on_all_true_and_disables_again() {
        let store = StateStore::new();
        let form = FormController::register(&store);

        store.set_valid(vec![true; 6]);
        assert_eq!(form.submit_state(), SubmitState::Enabled);

        store.set_valid(vec![true, true, true, true, true, false]);
        assert_eq!(form.submit_state(), SubmitState::Disabled);
    }

    #[test]
    fn empty_vector_never_enables() {
        let store = StateStore::new();
        let form = FormController::register(&store);

        store.set_valid(Vec::new());
        assert_eq!(form.submit_state(), SubmitState::Disabled);
    }

    #[test]
    fn hint_placement_is_idempotent() {
        let store = StateStore::new();
        let form = FormController::register(&store);

        assert_eq!(form.sections(), vec![Section::Password, Section::Confirm, Section::Submit]);

        form.place_hint_before_submit();
        form.place_hint_before_submit();

        let sections = form.sections();
        assert_eq!(
            sections,
            vec![Section::Password, Section::Confirm, Section::Policy, Section::Submit]
        );
        assert_eq!(sections.iter().filter(|s| **s == Section::Policy).count(), 1);
    }

    #[test]
    fn check_policy_places_hint_and_writes_through() {
        let store = StateStore::new();
        let form = FormController::register(&store);

        form.check_policy(&store, "password", "hunter2").unwrap();
        assert_eq!(store.password().as_deref(), Some("hunter2"));
        assert!(form.sections().contains(&Section::Policy));
    }

    #[test]
    fn check_policy_signals_unknown_fields() {
        let store = StateStore::new();
        let form = FormController::register(&store);

        assert_eq!(
            form.check_policy(&store, "secret", "x"),
            Err(PolicyError::UnknownField("secret".to_string()))
        );
    }
}
