pub mod relay;
pub mod submission;

pub use relay::RelayResponse;
pub use submission::Submission;
