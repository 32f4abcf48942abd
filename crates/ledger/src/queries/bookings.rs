// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking queries.

use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::BookingRow;
use crate::diesel_schema::bookings;
use crate::error::PersistenceError;
use tasklink_domain::{Booking, BookingId, SessionRef};

/// Retrieves a booking by ID.
///
/// Soft-deleted bookings are treated as absent.
///
/// # Errors
///
/// Returns `BookingNotFound` if no live booking with that ID exists.
pub fn find_booking(
    conn: &mut SqliteConnection,
    booking: BookingId,
) -> Result<Booking, PersistenceError> {
    let row: BookingRow = bookings::table
        .filter(
            bookings::booking_id
                .eq(booking.value())
                .and(bookings::is_deleted.eq(0)),
        )
        .first::<BookingRow>(conn)
        .optional()?
        .ok_or(PersistenceError::BookingNotFound(booking.value()))?;

    Booking::try_from(row)
}

/// Retrieves the booking that owns a checkout session reference.
///
/// Used by the payment confirmation flow, where the gateway only hands
/// back the session identifier.
///
/// # Errors
///
/// Returns `SessionNotFound` if no live booking carries that reference.
pub fn find_booking_by_session(
    conn: &mut SqliteConnection,
    session_ref: &SessionRef,
) -> Result<Booking, PersistenceError> {
    let row: BookingRow = bookings::table
        .filter(
            bookings::session_ref
                .eq(session_ref.value())
                .and(bookings::is_deleted.eq(0)),
        )
        .first::<BookingRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::SessionNotFound(session_ref.value().to_string()))?;

    Booking::try_from(row)
}

/// Lists the live bookings where the given user is the customer or the
/// provider, newest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row fails to decode.
pub fn list_bookings_for_user(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Vec<Booking>, PersistenceError> {
    let rows: Vec<BookingRow> = bookings::table
        .filter(
            bookings::customer_id
                .eq(user_id)
                .or(bookings::provider_id.eq(user_id)),
        )
        .filter(bookings::is_deleted.eq(0))
        .order(bookings::booking_id.desc())
        .load::<BookingRow>(conn)?;

    rows.into_iter().map(Booking::try_from).collect()
}
