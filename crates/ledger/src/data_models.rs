// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types mapping database records to domain values.

use diesel::prelude::*;
use tasklink_domain::{
    Booking, BookingId, BookingStatus, ConfirmationRef, GeoPoint, Money, PaymentStatus, Role,
    ServiceId, SessionRef, UserId,
};

use crate::diesel_schema::{bookings, ledger_entries};
use crate::error::PersistenceError;

/// A user account with its wallet state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub wallet_balance: Money,
    pub payout_account_ref: Option<String>,
}

/// A provider-owned service offering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRecord {
    pub id: ServiceId,
    pub provider: UserId,
    pub title: String,
    pub price: Money,
}

/// One immutable row of the payment ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntryRecord {
    pub id: i64,
    pub booking: Option<BookingId>,
    pub customer: Option<UserId>,
    pub provider: UserId,
    pub service: Option<ServiceId>,
    pub amount: Money,
    pub status: PaymentStatus,
    pub confirmation: Option<ConfirmationRef>,
    pub created_at: String,
}

/// Raw user row as stored.
#[derive(Debug, Queryable)]
pub(crate) struct UserRow {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub wallet_balance: i64,
    pub payout_account_ref: Option<String>,
    #[allow(dead_code)]
    pub created_at: String,
}

impl TryFrom<UserRow> for UserRecord {
    type Error = PersistenceError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role: Role = match row.role.as_str() {
            "customer" => Role::Customer,
            "provider" => Role::Provider,
            other => {
                return Err(PersistenceError::InvalidRecord(format!(
                    "user {} has unknown role '{other}'",
                    row.user_id
                )));
            }
        };

        Ok(Self {
            id: UserId::new(row.user_id),
            name: row.name,
            email: row.email,
            role,
            wallet_balance: Money::from_minor(row.wallet_balance),
            payout_account_ref: row.payout_account_ref,
        })
    }
}

/// Raw service row as stored.
#[derive(Debug, Queryable)]
pub(crate) struct ServiceRow {
    pub service_id: i64,
    pub provider_id: i64,
    pub title: String,
    pub price: i64,
    #[allow(dead_code)]
    pub created_at: String,
}

impl From<ServiceRow> for ServiceRecord {
    fn from(row: ServiceRow) -> Self {
        Self {
            id: ServiceId::new(row.service_id),
            provider: UserId::new(row.provider_id),
            title: row.title,
            price: Money::from_minor(row.price),
        }
    }
}

/// Raw booking row as stored.
#[derive(Debug, Queryable)]
pub(crate) struct BookingRow {
    pub booking_id: i64,
    pub customer_id: i64,
    pub provider_id: i64,
    pub service_id: i64,
    pub scheduled_for: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub note: String,
    pub status: String,
    pub is_paid: i32,
    pub reject_reason: Option<String>,
    pub session_ref: Option<String>,
    pub confirmation_ref: Option<String>,
    pub is_deleted: i32,
    pub version: i64,
    #[allow(dead_code)]
    pub created_at: String,
    #[allow(dead_code)]
    pub updated_at: String,
}

impl TryFrom<BookingRow> for Booking {
    type Error = PersistenceError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let status: BookingStatus = row.status.parse().map_err(|_| {
            PersistenceError::InvalidRecord(format!(
                "booking {} has unknown status '{}'",
                row.booking_id, row.status
            ))
        })?;

        Ok(Self {
            id: BookingId::new(row.booking_id),
            customer: UserId::new(row.customer_id),
            provider: UserId::new(row.provider_id),
            service: ServiceId::new(row.service_id),
            scheduled_for: row.scheduled_for,
            location: GeoPoint {
                latitude: row.latitude,
                longitude: row.longitude,
            },
            address: row.address,
            note: row.note,
            status,
            is_paid: row.is_paid != 0,
            reject_reason: row.reject_reason,
            session_ref: row.session_ref.as_deref().map(SessionRef::new),
            confirmation_ref: row.confirmation_ref.as_deref().map(ConfirmationRef::new),
            is_deleted: row.is_deleted != 0,
            version: row.version,
        })
    }
}

/// Insertable booking row.
#[derive(Debug, Insertable)]
#[diesel(table_name = bookings)]
pub(crate) struct NewBookingRow {
    pub customer_id: i64,
    pub provider_id: i64,
    pub service_id: i64,
    pub scheduled_for: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub note: String,
    pub status: String,
    pub session_ref: Option<String>,
}

/// Raw ledger entry row as stored.
#[derive(Debug, Queryable)]
pub(crate) struct LedgerEntryRow {
    pub entry_id: i64,
    pub booking_id: Option<i64>,
    pub customer_id: Option<i64>,
    pub provider_id: i64,
    pub service_id: Option<i64>,
    pub amount: i64,
    pub status: String,
    pub confirmation_ref: Option<String>,
    pub created_at: String,
}

impl TryFrom<LedgerEntryRow> for LedgerEntryRecord {
    type Error = PersistenceError;

    fn try_from(row: LedgerEntryRow) -> Result<Self, Self::Error> {
        let status: PaymentStatus = row.status.parse().map_err(|_| {
            PersistenceError::InvalidRecord(format!(
                "ledger entry {} has unknown status '{}'",
                row.entry_id, row.status
            ))
        })?;

        Ok(Self {
            id: row.entry_id,
            booking: row.booking_id.map(BookingId::new),
            customer: row.customer_id.map(UserId::new),
            provider: UserId::new(row.provider_id),
            service: row.service_id.map(ServiceId::new),
            amount: Money::from_minor(row.amount),
            status,
            confirmation: row.confirmation_ref.as_deref().map(ConfirmationRef::new),
            created_at: row.created_at,
        })
    }
}

/// Insertable ledger entry row.
#[derive(Debug, Insertable)]
#[diesel(table_name = ledger_entries)]
pub(crate) struct NewLedgerEntryRow {
    pub booking_id: Option<i64>,
    pub customer_id: Option<i64>,
    pub provider_id: i64,
    pub service_id: Option<i64>,
    pub amount: i64,
    pub status: String,
    pub confirmation_ref: Option<String>,
}
