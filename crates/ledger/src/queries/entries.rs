// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Payment ledger queries.

use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::{LedgerEntryRecord, LedgerEntryRow};
use crate::diesel_schema::ledger_entries;
use crate::error::PersistenceError;
use tasklink_domain::{BookingId, UserId};

/// Lists all ledger entries for a booking, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row fails to decode.
pub fn entries_for_booking(
    conn: &mut SqliteConnection,
    booking: BookingId,
) -> Result<Vec<LedgerEntryRecord>, PersistenceError> {
    let rows: Vec<LedgerEntryRow> = ledger_entries::table
        .filter(ledger_entries::booking_id.eq(booking.value()))
        .order(ledger_entries::entry_id.asc())
        .load::<LedgerEntryRow>(conn)?;

    rows.into_iter().map(LedgerEntryRecord::try_from).collect()
}

/// Lists all ledger entries involving a provider, oldest first.
///
/// This is the provider's full monetary history: charges on their
/// bookings, fees, and withdrawals.
///
/// # Errors
///
/// Returns an error if the query fails or a row fails to decode.
pub fn entries_for_provider(
    conn: &mut SqliteConnection,
    provider: UserId,
) -> Result<Vec<LedgerEntryRecord>, PersistenceError> {
    let rows: Vec<LedgerEntryRow> = ledger_entries::table
        .filter(ledger_entries::provider_id.eq(provider.value()))
        .order(ledger_entries::entry_id.asc())
        .load::<LedgerEntryRow>(conn)?;

    rows.into_iter().map(LedgerEntryRecord::try_from).collect()
}
