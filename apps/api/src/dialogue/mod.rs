pub mod engine;
pub mod handlers;
pub mod step;

pub use engine::{DialogueEngine, Message, Sender, SubmitOutcome};
pub use step::Step;
