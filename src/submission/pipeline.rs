use axum::http::StatusCode;
use serde_json::value::RawValue;

use crate::models::relay::{MSG_ACCEPTED, MSG_INCOMPLETE, MSG_REJECTED, MSG_TRANSPORT};
use crate::models::{RelayResponse, Submission};
use crate::state::SharedState;
use crate::upstream::UpstreamOutcome;

/// Record the submission, forward it upstream and turn the outcome into a reply.
pub async fn run(state: &SharedState, data: Box<RawValue>) -> (StatusCode, RelayResponse) {
    let submission = Submission::new(data);
    let id = submission.id;
    tracing::info!(%id, received_at = %submission.received_at, payload = submission.data.get(), "Submission received");

    // Recorded before the outbound call so failed relays still show up in the log.
    let position = state.log.append(submission.clone()).await;
    tracing::debug!(%id, position, "Submission stored");

    let outcome = state.upstream.evaluate(&submission.data).await;
    respond(id, outcome)
}

fn respond(id: uuid::Uuid, outcome: UpstreamOutcome) -> (StatusCode, RelayResponse) {
    match outcome {
        UpstreamOutcome::Incomplete(body) => {
            tracing::info!(%id, response = %body, "Upstream evaluation missing required inputs");
            (StatusCode::OK, RelayResponse::with_data(MSG_INCOMPLETE, body))
        }
        UpstreamOutcome::Accepted(body) => {
            tracing::info!(%id, response = %body, "Upstream evaluation created");
            (StatusCode::CREATED, RelayResponse::with_data(MSG_ACCEPTED, body))
        }
        UpstreamOutcome::Rejected { status, body } => {
            tracing::warn!(%id, status, response = %body, "Upstream rejected submission");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                RelayResponse::with_status(MSG_REJECTED, status),
            )
        }
        UpstreamOutcome::Transport(err) => {
            tracing::error!(%id, "Error during upstream call: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                RelayResponse::message(MSG_TRANSPORT),
            )
        }
    }
}
