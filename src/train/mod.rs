pub mod loop_fn;
pub mod source;
pub mod summary;
pub mod train_config;

pub use loop_fn::train_loop;
pub use source::{FixedExample, TrainingSource};
pub use summary::TrainSummary;
pub use train_config::TrainConfig;
