// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking creation and soft deletion.
//!
//! Lifecycle transitions go through `settlement::persist_transition`; this
//! module only covers the operations that happen outside a transition.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::data_models::NewBookingRow;
use crate::diesel_schema::bookings;
use crate::error::PersistenceError;
use crate::sqlite;
use tasklink_domain::{BookingId, BookingStatus, GeoPoint, ServiceId, SessionRef, UserId};

/// Creation parameters for a booking.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub customer: UserId,
    pub provider: UserId,
    pub service: ServiceId,
    pub scheduled_for: String,
    pub location: GeoPoint,
    pub address: String,
    pub note: String,
}

/// Inserts a new pending booking and returns its assigned ID.
///
/// The checkout session reference is attached separately once the gateway
/// session exists, since the session carries the booking ID in its
/// metadata.
///
/// # Errors
///
/// Returns an error if the referenced users or service do not exist or
/// the insert fails.
pub fn create_booking(
    conn: &mut SqliteConnection,
    new_booking: &NewBooking,
) -> Result<BookingId, PersistenceError> {
    let row: NewBookingRow = NewBookingRow {
        customer_id: new_booking.customer.value(),
        provider_id: new_booking.provider.value(),
        service_id: new_booking.service.value(),
        scheduled_for: new_booking.scheduled_for.clone(),
        latitude: new_booking.location.latitude,
        longitude: new_booking.location.longitude,
        address: new_booking.address.clone(),
        note: new_booking.note.clone(),
        status: BookingStatus::Pending.as_str().to_string(),
        session_ref: None,
    };

    diesel::insert_into(bookings::table)
        .values(&row)
        .execute(conn)?;

    let booking_id: i64 = sqlite::get_last_insert_rowid(conn)?;

    info!(
        booking_id,
        customer = new_booking.customer.value(),
        provider = new_booking.provider.value(),
        "Created booking"
    );

    Ok(BookingId::new(booking_id))
}

/// Attaches the checkout session reference to a freshly created booking.
///
/// # Errors
///
/// Returns an error if the booking does not exist or the update fails.
pub fn set_session_ref(
    conn: &mut SqliteConnection,
    booking: BookingId,
    session_ref: &SessionRef,
) -> Result<(), PersistenceError> {
    let updated: usize =
        diesel::update(bookings::table.filter(bookings::booking_id.eq(booking.value())))
            .set(bookings::session_ref.eq(session_ref.value()))
            .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::BookingNotFound(booking.value()));
    }

    Ok(())
}

/// Soft-deletes a booking. The row and its ledger entries remain for the
/// payment audit trail.
///
/// # Errors
///
/// Returns an error if the booking does not exist or the update fails.
pub fn soft_delete_booking(
    conn: &mut SqliteConnection,
    booking: BookingId,
) -> Result<(), PersistenceError> {
    let updated: usize =
        diesel::update(bookings::table.filter(bookings::booking_id.eq(booking.value())))
            .set(bookings::is_deleted.eq(1))
            .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::BookingNotFound(booking.value()));
    }

    info!(booking_id = booking.value(), "Soft-deleted booking");

    Ok(())
}
