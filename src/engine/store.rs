//! Reactive state store: field values plus per-field observer registries.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::error::PolicyError;
use crate::{Change, Field, Observer};

/// The single reactive holder of current field values and their subscribers.
///
/// A `StateStore` is a cheap-to-clone handle; clones share the same state.
/// One store exists per page session (see [`crate::Session`]), created when
/// the surrounding form is wired and dropped with it.
///
/// Writes notify observers synchronously, in registration order, and only
/// when the value actually changed — duplicate keystroke events are absorbed
/// by the equality check. Observers registered during a notification do not
/// receive the in-flight change.
#[derive(Clone)]
pub struct StateStore {
    inner: Rc<RefCell<Inner>>,
}

struct Inner {
    username: Option<String>,
    password: Option<String>,
    confirm: Option<String>,
    valid: Vec<bool>,
    // One registry per field, indexed by `Field::index`. Append-only: there
    // is no removal API and no de-duplication, listeners live as long as the
    // store.
    listeners: [Vec<Rc<dyn Observer>>; 4],
}

impl StateStore {
    /// Create an empty store. Text fields start unset (an unset field is not
    /// equal to the empty string) and the validity vector starts as the
    /// single-entry `[false]` sentinel, replaced by a full vector on the
    /// first evaluation.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                username: None,
                password: None,
                confirm: None,
                valid: vec![false],
                listeners: std::array::from_fn(|_| Vec::new()),
            })),
        }
    }

    /// Subscribe one observer to a field.
    pub fn add_listener(&self, field: Field, listener: Rc<dyn Observer>) {
        self.inner.borrow_mut().listeners[field.index()].push(listener);
    }

    /// Subscribe one or many observers to a field, preserving order.
    pub fn add_listeners<I>(&self, field: Field, listeners: I)
    where
        I: IntoIterator<Item = Rc<dyn Observer>>,
    {
        self.inner.borrow_mut().listeners[field.index()].extend(listeners);
    }

    pub fn username(&self) -> Option<String> {
        self.inner.borrow().username.clone()
    }

    pub fn password(&self) -> Option<String> {
        self.inner.borrow().password.clone()
    }

    pub fn confirm(&self) -> Option<String> {
        self.inner.borrow().confirm.clone()
    }

    /// Current validity vector, index-aligned with the rule table.
    pub fn valid(&self) -> Vec<bool> {
        self.inner.borrow().valid.clone()
    }

    pub fn set_username(&self, value: &str) {
        self.set_text(Field::Username, value);
    }

    pub fn set_password(&self, value: &str) {
        self.set_text(Field::Password, value);
    }

    pub fn set_confirm(&self, value: &str) {
        self.set_text(Field::Confirm, value);
    }

    /// String-keyed write for the glue layer, which addresses fields by the
    /// names carried in the markup. Unknown names are signaled instead of
    /// silently creating state.
    pub fn set_value(&self, field: &str, value: &str) -> Result<(), PolicyError> {
        match field.parse::<Field>()? {
            Field::Valid => Err(PolicyError::NotText("valid")),
            field => {
                self.set_text(field, value);
                Ok(())
            }
        }
    }

    /// Publish a freshly evaluated validity vector. Compared by value: a
    /// re-published identical vector notifies nobody, which is what bounds
    /// re-entrant notification chains.
    pub fn set_valid(&self, value: Vec<bool>) {
        let snapshot = {
            let mut inner = self.inner.borrow_mut();
            if inner.valid == value {
                trace!(field = "valid", "unchanged value, skipping notification");
                return;
            }
            inner.valid = value.clone();
            inner.listeners[Field::Valid.index()].clone()
        };
        debug!(field = "valid", vector = ?value, observers = snapshot.len(), "field changed");
        for listener in snapshot {
            listener.on_change(self, Change::Valid(&value));
        }
    }

    fn set_text(&self, field: Field, value: &str) {
        let snapshot = {
            let mut inner = self.inner.borrow_mut();
            let slot = match field {
                Field::Username => &mut inner.username,
                Field::Password => &mut inner.password,
                Field::Confirm => &mut inner.confirm,
                Field::Valid => unreachable!("valid does not hold text"),
            };
            if slot.as_deref() == Some(value) {
                trace!(field = field.name(), "unchanged value, skipping notification");
                return;
            }
            *slot = Some(value.to_owned());
            inner.listeners[field.index()].clone()
        };
        debug!(field = field.name(), observers = snapshot.len(), "field changed");
        let change = match field {
            Field::Username => Change::Username(value),
            Field::Password => Change::Password(value),
            Field::Confirm => Change::Confirm(value),
            Field::Valid => unreachable!("valid does not hold text"),
        };
        // The interior borrow is released before dispatch: observers are free
        // to write back into the store from their callback.
        for listener in snapshot {
            listener.on_change(self, change);
        }
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recorder {
        tag: &'static str,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Observer for Recorder {
        fn on_change(&self, _store: &StateStore, change: Change<'_>) {
            self.log.borrow_mut().push(format!("{}:{}", self.tag, change.field().name()));
        }
    }

    #[test]
    fn initial_valid_is_the_sentinel() {
        let store = StateStore::new();
        assert_eq!(store.valid(), vec![false]);
        assert_eq!(store.password(), None);
    }

    #[test]
    fn redundant_write_is_a_no_op() {
        let store = StateStore::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        store.add_listener(Field::Password, Rc::new(Recorder { tag: "a", log: log.clone() }));

        store.set_password("hunter2");
        store.set_password("hunter2");
        assert_eq!(log.borrow().len(), 1);

        store.set_password("hunter3");
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn unset_field_differs_from_empty_string() {
        let store = StateStore::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        store.add_listener(Field::Confirm, Rc::new(Recorder { tag: "a", log: log.clone() }));

        store.set_confirm("");
        assert_eq!(log.borrow().len(), 1);
        store.set_confirm("");
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn notification_follows_registration_order() {
        let store = StateStore::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        store.add_listeners(
            Field::Password,
            [
                Rc::new(Recorder { tag: "first", log: log.clone() }) as Rc<dyn Observer>,
                Rc::new(Recorder { tag: "second", log: log.clone() }),
            ],
        );

        store.set_password("x");
        assert_eq!(*log.borrow(), vec!["first:password", "second:password"]);
    }

    #[test]
    fn unknown_field_is_signaled() {
        let store = StateStore::new();
        assert_eq!(
            store.set_value("secret", "x"),
            Err(PolicyError::UnknownField("secret".to_string()))
        );
    }

    #[test]
    fn valid_is_not_writable_as_text() {
        let store = StateStore::new();
        assert_eq!(store.set_value("valid", "true"), Err(PolicyError::NotText("valid")));
    }

    #[test]
    fn set_value_routes_by_field_name() {
        let store = StateStore::new();
        store.set_value("username", "user@example.com").unwrap();
        store.set_value("password", "pw").unwrap();
        store.set_value("confirm", "pw").unwrap();
        assert_eq!(store.username().as_deref(), Some("user@example.com"));
        assert_eq!(store.password().as_deref(), Some("pw"));
        assert_eq!(store.confirm().as_deref(), Some("pw"));
    }

    #[test]
    fn reentrant_writes_converge() {
        // Echoes every password change into the confirm field from within
        // the notification callback.
        struct Echo;

        impl Observer for Echo {
            fn on_change(&self, store: &StateStore, change: Change<'_>) {
                if let Change::Password(value) = change {
                    store.set_confirm(value);
                }
            }
        }

        let store = StateStore::new();
        store.add_listener(Field::Password, Rc::new(Echo));

        store.set_password("abc");
        assert_eq!(store.confirm().as_deref(), Some("abc"));

        // A second identical write must not notify, let alone loop.
        store.set_password("abc");
        assert_eq!(store.confirm().as_deref(), Some("abc"));
    }
}
