//! Policy validator: turns password/confirm changes into a validity vector.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::engine::StateStore;
use crate::rules::policy;
use crate::{Change, Field, Observer, Rule};

/// Re-evaluates the whole rule table on any password or confirm change and
/// publishes the resulting boolean vector back into the store.
///
/// Exactly one validator exists per page session; it is registered once and
/// stays subscribed for the life of the store. The password is recorded
/// locally on each change; the confirmation rule reads the confirm value
/// from the store at evaluation time.
pub struct Validator {
    rules: &'static [Rule],
    password: RefCell<String>,
}

impl Validator {
    /// Register a validator over the default rule table.
    pub fn register(store: &StateStore) -> Rc<Self> {
        Self::register_with(store, policy::default_rules())
    }

    /// Register a validator over a caller-supplied rule table. The table
    /// order is the vector order.
    pub fn register_with(store: &StateStore, rules: &'static [Rule]) -> Rc<Self> {
        let validator = Rc::new(Self { rules, password: RefCell::new(String::new()) });
        store.add_listener(Field::Password, validator.clone());
        store.add_listener(Field::Confirm, validator.clone());
        validator
    }

    fn check_valid(&self, store: &StateStore) {
        let password = self.password.borrow().clone();
        let vector: Vec<bool> =
            self.rules.iter().map(|rule| rule.matches(&password, store)).collect();
        debug!(?vector, "policy re-evaluated");
        store.set_valid(vector);
    }
}

impl Observer for Validator {
    fn on_change(&self, store: &StateStore, change: Change<'_>) {
        match change {
            Change::Password(value) => {
                *self.password.borrow_mut() = value.to_owned();
                self.check_valid(store);
            }
            Change::Confirm(_) => self.check_valid(store),
            _ => {}
        }
    }
}
