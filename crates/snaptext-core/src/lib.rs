pub mod collab;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod history;
pub mod poll;
pub mod selector;
pub mod sink;
pub mod text;
pub mod translate;

#[cfg(test)]
mod tests;

pub use collab::{Collaborators, Overlay, Pointer, Recognizer, Snapshot};
pub use dispatch::Dispatcher;
pub use engine::CaptureEngine;
pub use error::EngineError;
pub use history::RegionHistory;
pub use poll::{PollLoop, PollState};
pub use selector::RegionSelector;
pub use sink::{TextBuffer, TextSink};
