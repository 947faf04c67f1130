pub mod log;
pub mod pipeline;

pub use log::SubmissionLog;
