pub mod engine;
pub mod report;
pub mod targets;

pub use engine::Engine;
pub use report::{BoardReport, Evaluation};
pub use targets::MinimaxTargets;
