// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use tasklink_api::{
    ApiError, BookingActionRequest, BookingView, CancelBookingRequest, ConfirmPaymentRequest,
    CreateBookingRequest, CreateBookingResult, CreateServiceRequest, CreateServiceResult,
    CreateUserRequest, CreateUserResult, WalletView, WithdrawRequest, WithdrawResult,
    booking_action, cancel_booking, complete_booking, confirm_payment, create_booking,
    create_service, create_user, get_booking, get_wallet, list_bookings, withdraw,
};
use tasklink_domain::{BookingId, FeePolicy, UserId};
use tasklink_ledger::Persistence;
use tasklink_notify::{Dispatcher, LoggingPushSender, NotificationBroadcaster, PresenceDirectory};
use tasklink_pay::{FakeGateway, PaymentGateway};

mod live;

/// TaskLink Server - HTTP server for the TaskLink booking backend
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Cancellation fee in basis points of the service price
    #[arg(long, default_value_t = 500)]
    cancellation_fee_bps: u32,

    /// Platform commission in basis points retained on completion payouts
    #[arg(long, default_value_t = 0)]
    completion_commission_bps: u32,

    /// Fee in basis points retained on wallet withdrawals
    #[arg(long, default_value_t = 500)]
    withdrawal_fee_bps: u32,
}

/// Application state shared across handlers.
///
/// The store is wrapped in a Mutex for safe concurrent access; the gateway,
/// dispatcher, and presence directory are internally synchronized.
#[derive(Clone)]
pub struct AppState {
    /// The booking store and payment ledger.
    store: Arc<Mutex<Persistence>>,
    /// The payment gateway adapter.
    gateway: Arc<dyn PaymentGateway>,
    /// Presence-based notification routing.
    dispatcher: Dispatcher,
    /// Live connection tracking, shared with the dispatcher.
    pub presence: Arc<PresenceDirectory>,
    /// Realtime notification fan-out, shared with the dispatcher.
    pub broadcaster: NotificationBroadcaster,
    /// The platform fee policy.
    policy: FeePolicy,
}

impl AppState {
    fn new(store: Persistence, gateway: Arc<dyn PaymentGateway>, policy: FeePolicy) -> Self {
        let presence = Arc::new(PresenceDirectory::new());
        let broadcaster = NotificationBroadcaster::new();
        let dispatcher = Dispatcher::new(
            Arc::clone(&presence),
            broadcaster.clone(),
            Arc::new(LoggingPushSender),
        );

        Self {
            store: Arc::new(Mutex::new(store)),
            gateway,
            dispatcher,
            presence,
            broadcaster,
            policy,
        }
    }
}

/// Query parameters for listing bookings.
#[derive(Debug, Deserialize)]
struct ListBookingsQuery {
    /// The user whose bookings to list.
    user_id: i64,
}

/// Response for listing bookings.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ListBookingsResponse {
    /// The bookings, newest first.
    bookings: Vec<BookingView>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::ResourceNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            ApiError::Conflict { .. } => Self {
                status: StatusCode::CONFLICT,
                message: err.to_string(),
            },
            ApiError::InvalidInput { .. } | ApiError::InsufficientFunds { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
            ApiError::ExternalFailure { .. } => Self {
                status: StatusCode::BAD_GATEWAY,
                message: err.to_string(),
            },
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: err.to_string(),
                }
            }
        }
    }
}

/// Handler for POST `/users` endpoint.
async fn handle_create_user(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<CreateUserResult>, HttpError> {
    info!(email = %req.email, "Handling create_user request");

    let mut store = state.store.lock().await;
    let result: CreateUserResult = create_user(&mut store, req)?;
    drop(store);

    Ok(Json(result))
}

/// Handler for POST `/services` endpoint.
async fn handle_create_service(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<CreateServiceRequest>,
) -> Result<Json<CreateServiceResult>, HttpError> {
    info!(
        provider_id = req.provider_id.value(),
        title = %req.title,
        "Handling create_service request"
    );

    let mut store = state.store.lock().await;
    let result: CreateServiceResult = create_service(&mut store, req)?;
    drop(store);

    Ok(Json(result))
}

/// Handler for POST `/bookings` endpoint.
///
/// Creates a pending booking and returns the checkout session the customer
/// must complete before the provider sees the request.
async fn handle_create_booking(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<Json<CreateBookingResult>, HttpError> {
    info!(
        customer_id = req.customer_id.value(),
        service_id = req.service_id.value(),
        "Handling create_booking request"
    );

    let mut store = state.store.lock().await;
    let result: CreateBookingResult = create_booking(&mut store, state.gateway.as_ref(), req)?;
    drop(store);

    Ok(Json(result))
}

/// Handler for GET `/bookings/{booking_id}` endpoint.
async fn handle_get_booking(
    AxumState(state): AxumState<AppState>,
    Path(booking_id): Path<i64>,
) -> Result<Json<BookingView>, HttpError> {
    let mut store = state.store.lock().await;
    let view: BookingView = get_booking(&mut store, BookingId::new(booking_id))?;
    drop(store);

    Ok(Json(view))
}

/// Handler for GET `/bookings` endpoint.
///
/// Lists the bookings where the user is the customer or the provider.
async fn handle_list_bookings(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<ListBookingsQuery>,
) -> Result<Json<ListBookingsResponse>, HttpError> {
    let mut store = state.store.lock().await;
    let bookings: Vec<BookingView> = list_bookings(&mut store, UserId::new(query.user_id))?;
    drop(store);

    Ok(Json(ListBookingsResponse { bookings }))
}

/// Handler for POST `/payments/confirm` endpoint.
///
/// Verifies the checkout session against the gateway and records the
/// payment, making the booking visible to the provider.
async fn handle_confirm_payment(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<ConfirmPaymentRequest>,
) -> Result<Json<BookingView>, HttpError> {
    info!(session_id = %req.session_id, "Handling confirm_payment request");

    let mut store = state.store.lock().await;
    let view: BookingView = confirm_payment(
        &mut store,
        state.gateway.as_ref(),
        &state.dispatcher,
        &state.policy,
        req,
    )?;
    drop(store);

    Ok(Json(view))
}

/// Handler for POST `/bookings/{booking_id}/action` endpoint.
///
/// Applies the provider's accept or reject decision.
async fn handle_booking_action(
    AxumState(state): AxumState<AppState>,
    Path(booking_id): Path<i64>,
    Json(req): Json<BookingActionRequest>,
) -> Result<Json<BookingView>, HttpError> {
    info!(
        booking_id = booking_id,
        action = ?req.action,
        "Handling booking_action request"
    );

    let mut store = state.store.lock().await;
    let view: BookingView = booking_action(
        &mut store,
        &state.dispatcher,
        &state.policy,
        BookingId::new(booking_id),
        req,
    )?;
    drop(store);

    Ok(Json(view))
}

/// Handler for POST `/bookings/{booking_id}/complete` endpoint.
async fn handle_complete_booking(
    AxumState(state): AxumState<AppState>,
    Path(booking_id): Path<i64>,
) -> Result<Json<BookingView>, HttpError> {
    info!(booking_id = booking_id, "Handling complete_booking request");

    let mut store = state.store.lock().await;
    let view: BookingView = complete_booking(
        &mut store,
        &state.dispatcher,
        &state.policy,
        BookingId::new(booking_id),
    )?;
    drop(store);

    Ok(Json(view))
}

/// Handler for POST `/bookings/{booking_id}/cancel` endpoint.
async fn handle_cancel_booking(
    AxumState(state): AxumState<AppState>,
    Path(booking_id): Path<i64>,
    Json(req): Json<CancelBookingRequest>,
) -> Result<Json<BookingView>, HttpError> {
    info!(
        booking_id = booking_id,
        by = ?req.by,
        "Handling cancel_booking request"
    );

    let mut store = state.store.lock().await;
    let view: BookingView = cancel_booking(
        &mut store,
        state.gateway.as_ref(),
        &state.dispatcher,
        &state.policy,
        BookingId::new(booking_id),
        req,
    )?;
    drop(store);

    Ok(Json(view))
}

/// Handler for POST `/wallet/withdraw` endpoint.
async fn handle_withdraw(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<WithdrawRequest>,
) -> Result<Json<WithdrawResult>, HttpError> {
    info!(
        provider_id = req.provider_id.value(),
        amount_minor = req.amount_minor,
        "Handling withdraw request"
    );

    let mut store = state.store.lock().await;
    let result: WithdrawResult = withdraw(&mut store, state.gateway.as_ref(), &state.policy, req)?;
    drop(store);

    Ok(Json(result))
}

/// Handler for GET `/wallet/{provider_id}` endpoint.
async fn handle_get_wallet(
    AxumState(state): AxumState<AppState>,
    Path(provider_id): Path<i64>,
) -> Result<Json<WalletView>, HttpError> {
    let mut store = state.store.lock().await;
    let view: WalletView = get_wallet(&mut store, UserId::new(provider_id))?;
    drop(store);

    Ok(Json(view))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/users", post(handle_create_user))
        .route("/services", post(handle_create_service))
        .route("/bookings", post(handle_create_booking))
        .route("/bookings", get(handle_list_bookings))
        .route("/bookings/{booking_id}", get(handle_get_booking))
        .route("/bookings/{booking_id}/action", post(handle_booking_action))
        .route(
            "/bookings/{booking_id}/complete",
            post(handle_complete_booking),
        )
        .route("/bookings/{booking_id}/cancel", post(handle_cancel_booking))
        .route("/payments/confirm", post(handle_confirm_payment))
        .route("/wallet/withdraw", post(handle_withdraw))
        .route("/wallet/{provider_id}", get(handle_get_wallet))
        .route("/live", get(live::live_stream_handler))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing TaskLink Server");

    // Initialize the store (in-memory or file-based based on CLI argument)
    let store: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let policy: FeePolicy = FeePolicy::new(
        args.cancellation_fee_bps,
        args.completion_commission_bps,
        args.withdrawal_fee_bps,
    );

    // TODO: wire a real gateway adapter behind a CLI flag once one exists;
    // the in-process gateway settles everything locally.
    let gateway: Arc<dyn PaymentGateway> = Arc::new(FakeGateway::new());

    let app_state: AppState = AppState::new(store, gateway, policy);

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
