//! Views over the validity vector: the per-rule hint list and the submit
//! gate. Both are pure state the surrounding form glue renders; neither
//! touches markup directly.

#[path = "view/form.rs"]
mod form;
#[path = "view/hint.rs"]
mod hint;

pub use form::{FormController, Section, SubmitState};
pub use hint::{Hint, HintClass, PolicyHintView};
