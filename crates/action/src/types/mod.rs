/// Suspend/resume action type.
pub mod interactive;

pub use interactive::InteractiveAction;
