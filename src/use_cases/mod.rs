// Use cases layer: request assembly and the booking screen workflow.

pub mod request_builder;
pub mod screen;

#[cfg(test)]
pub(crate) mod test_support;

pub use screen::{CallKind, CallOutcome, Notice, ScreenController, ScreenView, UiEvent};
