use std::sync::Arc;

use crate::config::Config;
use crate::submission::SubmissionLog;
use crate::upstream::UpstreamClient;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub upstream: UpstreamClient,
    pub log: SubmissionLog,
}
