// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking workflow orchestration.
//!
//! Each handler follows the same shape: load the current records, run the
//! pure lifecycle engine, execute any required gateway call, commit the
//! transition in one transaction, then dispatch notifications best-effort.
//! Gateway calls happen *before* the commit so an external failure leaves
//! the store untouched.

use tracing::info;

use tasklink::{Command, GatewayIntent, Notice, apply};
use tasklink_domain::{
    Booking, BookingId, ConfirmationRef, FeePolicy, Money, Role, SessionRef, UserId,
    validate_withdrawal,
};
use tasklink_ledger::{NewBooking, Persistence, ServiceRecord, UserRecord};
use tasklink_notify::Dispatcher;
use tasklink_pay::{CheckoutSession, ConfirmedSession, PaymentGateway, PayoutOnboarding};

use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_gateway_error,
    translate_persistence_error,
};
use crate::request_response::{
    BookingAction, BookingActionRequest, BookingView, CancelBookingRequest, ConfirmPaymentRequest,
    CreateBookingRequest, CreateBookingResult, CreateServiceRequest, CreateServiceResult,
    CreateUserRequest, CreateUserResult, LedgerEntryView, WalletView, WithdrawRequest,
    WithdrawResult,
};

fn require_non_empty(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: field.to_string(),
            message: format!("{field} must not be empty"),
        });
    }
    Ok(())
}

fn require_positive_amount(field: &str, minor: i64) -> Result<Money, ApiError> {
    let amount: Money = Money::from_minor(minor);
    if !amount.is_positive() {
        return Err(ApiError::InvalidInput {
            field: field.to_string(),
            message: format!("{field} must be positive, got {minor}"),
        });
    }
    Ok(amount)
}

/// Delivers the notices produced by a committed transition.
///
/// Delivery is best-effort; the dispatcher swallows push failures, so this
/// can never fail a handler.
fn dispatch_notices(dispatcher: &Dispatcher, notices: &[Notice]) {
    for notice in notices {
        dispatcher.notify(notice.recipient, &notice.message);
    }
}

/// Loads a booking and its service price, applies a lifecycle command, and
/// commits the result. Used by every transition that needs no gateway call.
fn run_transition(
    persistence: &mut Persistence,
    dispatcher: &Dispatcher,
    policy: &FeePolicy,
    booking_id: BookingId,
    command: Command,
) -> Result<BookingView, ApiError> {
    let booking: Booking = persistence
        .find_booking(booking_id)
        .map_err(translate_persistence_error)?;
    let service: ServiceRecord = persistence
        .find_service(booking.service)
        .map_err(translate_persistence_error)?;

    let result = apply(&booking, service.price, command, policy).map_err(translate_core_error)?;

    persistence
        .persist_transition(&result)
        .map_err(translate_persistence_error)?;
    dispatch_notices(dispatcher, &result.notices);

    Ok(BookingView::from(&result.booking))
}

/// Creates a user account.
///
/// # Errors
///
/// Returns an error if the input is invalid or the account cannot be
/// stored, including when the email is already taken.
pub fn create_user(
    persistence: &mut Persistence,
    request: CreateUserRequest,
) -> Result<CreateUserResult, ApiError> {
    require_non_empty("name", &request.name)?;
    require_non_empty("email", &request.email)?;
    if !request.email.contains('@') {
        return Err(ApiError::InvalidInput {
            field: String::from("email"),
            message: String::from("email must contain '@'"),
        });
    }

    let user_id: UserId = persistence
        .create_user(request.name.trim(), request.email.trim(), request.role)
        .map_err(translate_persistence_error)?;

    info!(user_id = user_id.value(), role = request.role.as_str(), "Created user");

    Ok(CreateUserResult { user_id })
}

/// Creates a service offering for a provider.
///
/// # Errors
///
/// Returns an error if the provider does not exist, the account is not a
/// provider, or the input is invalid.
pub fn create_service(
    persistence: &mut Persistence,
    request: CreateServiceRequest,
) -> Result<CreateServiceResult, ApiError> {
    require_non_empty("title", &request.title)?;
    let price: Money = require_positive_amount("price_minor", request.price_minor)?;

    let provider: UserRecord = persistence
        .find_user(request.provider_id)
        .map_err(translate_persistence_error)?;
    if provider.role != Role::Provider {
        return Err(ApiError::InvalidInput {
            field: String::from("provider_id"),
            message: format!("User {} is not a provider", provider.id.value()),
        });
    }

    let service_id = persistence
        .create_service(provider.id, request.title.trim(), price)
        .map_err(translate_persistence_error)?;

    info!(
        service_id = service_id.value(),
        provider_id = provider.id.value(),
        "Created service"
    );

    Ok(CreateServiceResult { service_id })
}

/// Creates a pending booking and a gateway checkout session for its price.
///
/// The booking is inserted first so the session can carry the booking ID;
/// if the gateway call fails, the fresh booking is soft-deleted so no
/// orphaned pending booking survives.
///
/// # Errors
///
/// Returns an error if the customer or service does not exist, the input
/// is invalid, or the gateway cannot create the session.
pub fn create_booking(
    persistence: &mut Persistence,
    gateway: &dyn PaymentGateway,
    request: CreateBookingRequest,
) -> Result<CreateBookingResult, ApiError> {
    require_non_empty("scheduled_for", &request.scheduled_for)?;
    require_non_empty("address", &request.address)?;

    let customer: UserRecord = persistence
        .find_user(request.customer_id)
        .map_err(translate_persistence_error)?;
    if customer.role != Role::Customer {
        return Err(ApiError::InvalidInput {
            field: String::from("customer_id"),
            message: format!("User {} is not a customer", customer.id.value()),
        });
    }
    let service: ServiceRecord = persistence
        .find_service(request.service_id)
        .map_err(translate_persistence_error)?;

    let booking_id: BookingId = persistence
        .create_booking(&NewBooking {
            customer: customer.id,
            provider: service.provider,
            service: service.id,
            scheduled_for: request.scheduled_for.clone(),
            location: tasklink_domain::GeoPoint {
                latitude: request.latitude,
                longitude: request.longitude,
            },
            address: request.address.clone(),
            note: request.note.clone(),
        })
        .map_err(translate_persistence_error)?;

    let session: CheckoutSession = match gateway.create_checkout_session(service.price, booking_id)
    {
        Ok(session) => session,
        Err(err) => {
            // Undo the insert so a gateway outage leaves no orphan.
            persistence
                .soft_delete_booking(booking_id)
                .map_err(translate_persistence_error)?;
            return Err(translate_gateway_error(err));
        }
    };

    persistence
        .set_session_ref(booking_id, &session.session_ref)
        .map_err(translate_persistence_error)?;

    info!(
        booking_id = booking_id.value(),
        session_ref = session.session_ref.value(),
        "Created booking with checkout session"
    );

    Ok(CreateBookingResult {
        booking_id,
        session_id: session.session_ref.value().to_string(),
        checkout_url: session.url,
    })
}

/// Confirms a payment after the customer returns from checkout.
///
/// The session is verified against the gateway; a session the gateway does
/// not report as paid is rejected, and a booking that is already paid
/// conflicts. On success the charge is recorded in the ledger and the
/// provider is notified of the new request.
///
/// # Errors
///
/// Returns an error if no booking owns the session, the gateway cannot be
/// reached, the session is unpaid, or the booking is already paid.
pub fn confirm_payment(
    persistence: &mut Persistence,
    gateway: &dyn PaymentGateway,
    dispatcher: &Dispatcher,
    policy: &FeePolicy,
    request: ConfirmPaymentRequest,
) -> Result<BookingView, ApiError> {
    let session_ref: SessionRef = SessionRef::new(&request.session_id);
    let booking: Booking = persistence
        .find_booking_by_session(&session_ref)
        .map_err(translate_persistence_error)?;

    let confirmed: ConfirmedSession = gateway
        .confirm_session(&session_ref)
        .map_err(translate_gateway_error)?;
    if !confirmed.paid {
        return Err(translate_domain_error(
            tasklink_domain::DomainError::PaymentIncomplete {
                session_ref: request.session_id,
            },
        ));
    }
    let confirmation: ConfirmationRef = confirmed.confirmation.ok_or_else(|| ApiError::Internal {
        message: String::from("Gateway reported the session paid without a confirmation reference"),
    })?;

    let service: ServiceRecord = persistence
        .find_service(booking.service)
        .map_err(translate_persistence_error)?;
    let result = apply(
        &booking,
        service.price,
        Command::ConfirmPayment { confirmation },
        policy,
    )
    .map_err(translate_core_error)?;

    persistence
        .persist_transition(&result)
        .map_err(translate_persistence_error)?;
    dispatch_notices(dispatcher, &result.notices);

    info!(
        booking_id = booking.id.value(),
        amount = service.price.minor(),
        "Payment confirmed"
    );

    Ok(BookingView::from(&result.booking))
}

/// Applies a provider decision (accept or reject) to a pending booking.
///
/// # Errors
///
/// Returns an error if the booking does not exist, is not pending, or a
/// rejection carries no reason.
pub fn booking_action(
    persistence: &mut Persistence,
    dispatcher: &Dispatcher,
    policy: &FeePolicy,
    booking_id: BookingId,
    request: BookingActionRequest,
) -> Result<BookingView, ApiError> {
    let command: Command = match request.action {
        BookingAction::Accept => Command::Accept,
        BookingAction::Reject => Command::Reject {
            reason: request.reason,
        },
    };
    run_transition(persistence, dispatcher, policy, booking_id, command)
}

/// Marks an accepted booking as completed, crediting the provider wallet.
///
/// # Errors
///
/// Returns an error if the booking does not exist or is not accepted.
pub fn complete_booking(
    persistence: &mut Persistence,
    dispatcher: &Dispatcher,
    policy: &FeePolicy,
    booking_id: BookingId,
) -> Result<BookingView, ApiError> {
    run_transition(persistence, dispatcher, policy, booking_id, Command::Complete)
}

/// Cancels a pending or accepted booking.
///
/// If the booking is paid, a cancellation fee applies: customer-initiated
/// cancellations refund the fee through the gateway, provider-initiated
/// cancellations debit it from the provider wallet. The gateway refund is
/// executed before the commit so a gateway failure changes nothing.
///
/// # Errors
///
/// Returns an error if the booking does not exist, is already terminal,
/// the refund fails, or the provider wallet cannot cover the fee.
pub fn cancel_booking(
    persistence: &mut Persistence,
    gateway: &dyn PaymentGateway,
    dispatcher: &Dispatcher,
    policy: &FeePolicy,
    booking_id: BookingId,
    request: CancelBookingRequest,
) -> Result<BookingView, ApiError> {
    let booking: Booking = persistence
        .find_booking(booking_id)
        .map_err(translate_persistence_error)?;
    let service: ServiceRecord = persistence
        .find_service(booking.service)
        .map_err(translate_persistence_error)?;

    let result = apply(
        &booking,
        service.price,
        Command::Cancel { by: request.by },
        policy,
    )
    .map_err(translate_core_error)?;

    if let Some(GatewayIntent::Refund {
        confirmation,
        amount,
    }) = &result.gateway
    {
        gateway
            .refund(confirmation, *amount)
            .map_err(translate_gateway_error)?;
        info!(
            booking_id = booking_id.value(),
            amount = amount.minor(),
            "Refunded cancellation fee"
        );
    }

    persistence
        .persist_transition(&result)
        .map_err(translate_persistence_error)?;
    dispatch_notices(dispatcher, &result.notices);

    Ok(BookingView::from(&result.booking))
}

/// Withdraws funds from a provider wallet.
///
/// A provider without a payout account is onboarded first: the account is
/// created at the gateway, stored, and the onboarding URL returned without
/// moving money. Otherwise the requested amount minus the withdrawal fee
/// is transferred, and the wallet is debited the full requested amount.
///
/// # Errors
///
/// Returns an error if the user does not exist or is not a provider, the
/// amount is invalid or exceeds the balance, or a gateway call fails.
pub fn withdraw(
    persistence: &mut Persistence,
    gateway: &dyn PaymentGateway,
    policy: &FeePolicy,
    request: WithdrawRequest,
) -> Result<WithdrawResult, ApiError> {
    let user: UserRecord = persistence
        .find_user(request.provider_id)
        .map_err(translate_persistence_error)?;
    if user.role != Role::Provider {
        return Err(ApiError::InvalidInput {
            field: String::from("provider_id"),
            message: format!("User {} is not a provider", user.id.value()),
        });
    }

    let requested: Money = Money::from_minor(request.amount_minor);
    validate_withdrawal(user.wallet_balance, requested).map_err(translate_domain_error)?;

    let Some(account_ref) = user.payout_account_ref else {
        let onboarding: PayoutOnboarding = gateway
            .create_payout_account(&user.email)
            .map_err(translate_gateway_error)?;
        persistence
            .set_payout_account(user.id, &onboarding.account_ref)
            .map_err(translate_persistence_error)?;

        info!(
            provider_id = user.id.value(),
            account_ref = %onboarding.account_ref,
            "Created payout account, onboarding required"
        );

        return Ok(WithdrawResult::OnboardingRequired {
            onboarding_url: onboarding.onboarding_url,
        });
    };

    let transfer_amount: Money = policy
        .withdrawal_transfer_amount(requested)
        .map_err(translate_domain_error)?;
    let transfer_ref: ConfirmationRef = gateway
        .transfer(&account_ref, transfer_amount)
        .map_err(translate_gateway_error)?;

    persistence
        .record_withdrawal(user.id, requested, &transfer_ref)
        .map_err(translate_persistence_error)?;

    info!(
        provider_id = user.id.value(),
        requested = requested.minor(),
        transferred = transfer_amount.minor(),
        "Withdrawal transferred"
    );

    Ok(WithdrawResult::Transferred {
        transferred_minor: transfer_amount.minor(),
        transfer_ref: transfer_ref.value().to_string(),
    })
}

/// Retrieves a booking.
///
/// # Errors
///
/// Returns an error if no live booking with that ID exists.
pub fn get_booking(
    persistence: &mut Persistence,
    booking_id: BookingId,
) -> Result<BookingView, ApiError> {
    let booking: Booking = persistence
        .find_booking(booking_id)
        .map_err(translate_persistence_error)?;
    Ok(BookingView::from(&booking))
}

/// Lists the bookings where the user is the customer or the provider,
/// newest first.
///
/// # Errors
///
/// Returns an error if the user does not exist or the query fails.
pub fn list_bookings(
    persistence: &mut Persistence,
    user_id: UserId,
) -> Result<Vec<BookingView>, ApiError> {
    // Existence check so an unknown user is a 404, not an empty list.
    persistence
        .find_user(user_id)
        .map_err(translate_persistence_error)?;
    let bookings = persistence
        .list_bookings_for_user(user_id)
        .map_err(translate_persistence_error)?;
    Ok(bookings.iter().map(BookingView::from).collect())
}

/// Retrieves a provider wallet: the current balance plus the full entry
/// history, oldest first.
///
/// # Errors
///
/// Returns an error if the user does not exist or is not a provider.
pub fn get_wallet(
    persistence: &mut Persistence,
    provider_id: UserId,
) -> Result<WalletView, ApiError> {
    let user: UserRecord = persistence
        .find_user(provider_id)
        .map_err(translate_persistence_error)?;
    if user.role != Role::Provider {
        return Err(ApiError::InvalidInput {
            field: String::from("provider_id"),
            message: format!("User {} is not a provider", user.id.value()),
        });
    }

    let entries = persistence
        .entries_for_provider(user.id)
        .map_err(translate_persistence_error)?;

    Ok(WalletView {
        provider_id: user.id,
        balance_minor: user.wallet_balance.minor(),
        entries: entries.iter().map(LedgerEntryView::from).collect(),
    })
}
