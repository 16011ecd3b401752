use crate::backend::BookingStore;
use crate::errors::BookingError;
use crate::types::{Booking, BookingRequest};
use crate::AppState;
use axum::extract::{Query, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{Local, NaiveDate, NaiveTime};
use futures::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use tower_http::cors::{Any, CorsLayer};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CancelRequest {
    id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RescheduleRequest {
    id: Uuid,
    date: NaiveDate,
    #[serde(with = "crate::types::hhmm")]
    time: NaiveTime,
}

#[derive(Debug, Deserialize)]
struct SlotsQuery {
    service_id: String,
    date: NaiveDate,
}

#[derive(Debug, Deserialize)]
struct DayQuery {
    date: NaiveDate,
}

pub fn create_app<B: BookingStore>(state: AppState<B>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let public = Router::new()
        .route("/services", get(get_services))
        .route("/slots", get(get_slots))
        .route("/book", post(submit_booking))
        .route("/cancel", post(cancel_booking))
        .route("/bookings", get(get_bookings))
        .route("/bookings/stream", get(stream_bookings));

    let admin = Router::new()
        .route("/admin/by_town", get(get_bookings_by_town))
        .route("/admin/day", get(get_day_schedule))
        .route("/admin/reschedule", post(reschedule_booking))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            admin_auth::<B>,
        ));

    Router::new()
        .merge(public)
        .merge(admin)
        .with_state(state)
        .layer(cors)
}

async fn admin_auth<B: BookingStore>(
    State(state): State<AppState<B>>,
    request: Request,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    let Some(header) = request.headers().get("x-admin-password") else {
        return Err((StatusCode::UNAUTHORIZED, "Missing credentials".to_string()));
    };
    if header.to_str().unwrap_or("") != state.configuration.admin_password() {
        return Err((StatusCode::UNAUTHORIZED, "Unauthorized".to_string()));
    }
    Ok(next.run(request).await)
}

fn error_response(err: BookingError) -> (StatusCode, String) {
    let status = match err {
        BookingError::Validation(_) => StatusCode::BAD_REQUEST,
        BookingError::SlotTaken => StatusCode::CONFLICT,
        BookingError::NotFound(_) => StatusCode::NOT_FOUND,
    };
    (status, err.to_string())
}

async fn get_services<B: BookingStore>(State(state): State<AppState<B>>) -> impl IntoResponse {
    Json(state.manager.services())
}

async fn get_slots<B: BookingStore>(
    State(state): State<AppState<B>>,
    Query(query): Query<SlotsQuery>,
) -> Response {
    let now = Local::now().naive_local();
    match state
        .manager
        .available_slots(&query.service_id, query.date, now)
    {
        Ok(slots) => {
            // "HH:MM" on the wire; an empty list means the frontend shows
            // its "no free slots" message.
            let slots: Vec<String> = slots
                .iter()
                .map(|slot| slot.format("%H:%M").to_string())
                .collect();
            Json(slots).into_response()
        }
        Err(err) => error_response(err).into_response(),
    }
}

async fn submit_booking<B: BookingStore>(
    State(state): State<AppState<B>>,
    Json(request): Json<BookingRequest>,
) -> Response {
    match state.manager.submit_booking(request) {
        Ok(booking) => Json(booking).into_response(),
        Err(err) => error_response(err).into_response(),
    }
}

async fn cancel_booking<B: BookingStore>(
    State(state): State<AppState<B>>,
    Json(request): Json<CancelRequest>,
) -> impl IntoResponse {
    state.manager.cancel_booking(request.id);
    (StatusCode::OK, "Booking cancelled".to_string())
}

async fn get_bookings<B: BookingStore>(State(state): State<AppState<B>>) -> impl IntoResponse {
    Json(state.manager.list_upcoming())
}

async fn stream_bookings<B: BookingStore>(
    State(state): State<AppState<B>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = state.manager.booking_stream().map(|bookings: Vec<Booking>| {
        Ok::<Event, Infallible>(Event::default().json_data(&bookings).unwrap_or_default())
    });
    Sse::new(stream).keep_alive(KeepAlive::default())
}

async fn get_bookings_by_town<B: BookingStore>(
    State(state): State<AppState<B>>,
) -> impl IntoResponse {
    Json(state.manager.list_by_town())
}

async fn get_day_schedule<B: BookingStore>(
    State(state): State<AppState<B>>,
    Query(query): Query<DayQuery>,
) -> impl IntoResponse {
    Json(state.manager.day_schedule(query.date))
}

async fn reschedule_booking<B: BookingStore>(
    State(state): State<AppState<B>>,
    Json(request): Json<RescheduleRequest>,
) -> Response {
    match state
        .manager
        .reschedule_booking(request.id, request.date, request.time)
    {
        Ok(booking) => Json(booking).into_response(),
        Err(err) => error_response(err).into_response(),
    }
}
