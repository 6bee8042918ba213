//! Reactive validation engine.
//!
//! The engine is a small synchronous pipeline: field writes flow into the
//! state store, the validator re-evaluates the rule table, and the resulting
//! validity vector flows back out to whoever subscribed to it.
//!
//! ```text
//! input event ── FormController::check_policy (view/form.rs)
//!        │
//!        v
//!   StateStore::set_value          (store.rs)
//!     - equality short-circuit (unchanged values notify nobody)
//!     - notify password/confirm observers, registration order
//!        │
//!        v
//!   Validator::on_change           (validator.rs)
//!     - re-evaluate ALL rules, table order (rules/policy.rs)
//!     - StateStore::set_valid(vector)
//!        │
//!        v
//!   valid observers:
//!     - PolicyHintView  → class each hint item valid/invalid
//!     - FormController  → enable submit iff the vector is all-true
//! ```
//!
//! Everything runs on the caller's stack; there is no deferred dispatch and
//! no shared-state locking. Observers may write back into the store from
//! their own callback (the validator does exactly that), and the equality
//! short-circuit is what makes that re-entrancy converge.
//!
//! ## Debugging
//!
//! The engine traces writes, notification fan-out and evaluation through
//! `tracing` at `debug`/`trace` level.

#[path = "engine/store.rs"]
mod store;
#[path = "engine/validator.rs"]
mod validator;

pub use store::StateStore;
pub use validator::Validator;
