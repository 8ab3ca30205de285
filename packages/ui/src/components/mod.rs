//! Small building blocks shared by the showcase views.

mod button;
mod dialog;
mod input;
mod label;
mod toast;

pub use button::{Button, ButtonVariant};
pub use dialog::Dialog;
pub use input::{Input, Textarea};
pub use label::Label;
pub use toast::{use_toasts, ToastProvider, Toasts};
