//! HTTP endpoint handlers

use std::{convert::Infallible, sync::Arc};
use axum::{
    extract::State,
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::{self, Stream};
use tokio::sync::broadcast::error::RecvError;
use tracing::{error, info, warn};

use crate::{
    engine::{format_display, StartOutcome},
    state::{AppState, ControlError},
};
use super::{
    requests::StartRequest,
    responses::{ApiResponse, HealthResponse, StatusResponse},
};

/// Handle POST /start - Start a countdown
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StartRequest>,
) -> Result<(StatusCode, Json<ApiResponse>), StatusCode> {
    let inputs = request.into_inputs();

    match state.start_countdown(&inputs) {
        Ok((StartOutcome::Started, timer)) => {
            info!("Start endpoint called - countdown of {} started", timer.display);
            let message = format!("Countdown started at {}", timer.display);
            Ok((StatusCode::OK, Json(ApiResponse::running(message, timer))))
        }
        Ok((StartOutcome::AlreadyRunning, timer)) => {
            info!("Start endpoint called while a countdown is running");
            Ok((
                StatusCode::OK,
                Json(ApiResponse::already_running(
                    "Countdown already running".to_string(),
                    timer,
                )),
            ))
        }
        Err(ControlError::Validation(e)) => {
            warn!("Rejected start request: {}", e);
            match state.snapshot() {
                Ok(timer) => Ok((
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(ApiResponse::error(e.to_string(), timer)),
                )),
                Err(e) => {
                    error!("Failed to read timer state: {}", e);
                    Err(StatusCode::INTERNAL_SERVER_ERROR)
                }
            }
        }
        Err(e) => {
            error!("Failed to start countdown: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /reset - Stop the countdown and return to idle
pub async fn reset_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.reset_countdown() {
        Ok(timer) => {
            info!("Reset endpoint called - countdown cleared");
            Ok(Json(ApiResponse::idle(
                format!("Countdown reset to {}", format_display(0)),
                timer,
            )))
        }
        Err(e) => {
            error!("Failed to reset countdown: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - Return current countdown status
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.snapshot() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /events - Stream countdown events as server-sent events
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let events = state.subscribe();

    let stream = stream::unfold(events, |mut events| async move {
        loop {
            match events.recv().await {
                Ok(event) => match Event::default().event(event.kind()).json_data(&event) {
                    Ok(sse) => return Some((Ok::<_, Infallible>(sse), events)),
                    Err(e) => warn!("Failed to encode timer event: {}", e),
                },
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Event stream client lagged, skipped {} events", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
