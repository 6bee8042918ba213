//! Policy hint list: one line of hint text per rule, classed by validity.

use std::cell::Cell;
use std::rc::Rc;

use crate::engine::StateStore;
use crate::{Change, Field, Observer, Rule};

/// Visual class of a single hint item. Items start unclassed and flip
/// between `Valid` and `Invalid` as the vector updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintClass {
    Unset,
    Valid,
    Invalid,
}

/// One rendered hint line: a rule's message plus its current class.
pub struct Hint {
    message: &'static str,
    class: Cell<HintClass>,
}

impl Hint {
    pub fn message(&self) -> &'static str {
        self.message
    }

    pub fn class(&self) -> HintClass {
        self.class.get()
    }
}

/// Renders the rule table as a list of classed hints.
///
/// The glue layer pre-creates one element per rule in table order and mirrors
/// [`Hint::class`] onto it after each change.
pub struct PolicyHintView {
    hints: Vec<Hint>,
}

impl PolicyHintView {
    /// Build one hint per rule and subscribe to validity changes.
    pub fn register(store: &StateStore, rules: &[Rule]) -> Rc<Self> {
        let hints = rules
            .iter()
            .map(|rule| Hint { message: rule.message, class: Cell::new(HintClass::Unset) })
            .collect();
        let view = Rc::new(Self { hints });
        store.add_listener(Field::Valid, view.clone());
        view
    }

    /// Hint items in rule-table order.
    pub fn hints(&self) -> &[Hint] {
        &self.hints
    }
}

impl Observer for PolicyHintView {
    fn on_change(&self, _store: &StateStore, change: Change<'_>) {
        if let Change::Valid(vector) = change {
            // zip bounds the update: a vector shorter than the hint list
            // (the initial [false] sentinel) only classes the covered
            // prefix, items beyond it keep their class.
            for (hint, &ok) in self.hints.iter().zip(vector) {
                hint.class.set(if ok { HintClass::Valid } else { HintClass::Invalid });
            }
        }
    }
}
