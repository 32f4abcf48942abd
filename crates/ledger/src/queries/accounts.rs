// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User and service queries.

use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::{ServiceRecord, ServiceRow, UserRecord, UserRow};
use crate::diesel_schema::{services, users};
use crate::error::PersistenceError;
use tasklink_domain::{Money, ServiceId, UserId};

/// Retrieves a user by ID.
///
/// # Errors
///
/// Returns `UserNotFound` if no such user exists.
pub fn find_user(conn: &mut SqliteConnection, user: UserId) -> Result<UserRecord, PersistenceError> {
    let row: UserRow = users::table
        .find(user.value())
        .first::<UserRow>(conn)
        .optional()?
        .ok_or(PersistenceError::UserNotFound(user.value()))?;

    UserRecord::try_from(row)
}

/// Retrieves a service by ID.
///
/// # Errors
///
/// Returns `ServiceNotFound` if no such service exists.
pub fn find_service(
    conn: &mut SqliteConnection,
    service: ServiceId,
) -> Result<ServiceRecord, PersistenceError> {
    let row: ServiceRow = services::table
        .find(service.value())
        .first::<ServiceRow>(conn)
        .optional()?
        .ok_or(PersistenceError::ServiceNotFound(service.value()))?;

    Ok(ServiceRecord::from(row))
}

/// Retrieves the current wallet balance for a user.
///
/// # Errors
///
/// Returns `UserNotFound` if no such user exists.
pub fn wallet_balance(
    conn: &mut SqliteConnection,
    user: UserId,
) -> Result<Money, PersistenceError> {
    let balance: i64 = users::table
        .find(user.value())
        .select(users::wallet_balance)
        .first::<i64>(conn)
        .optional()?
        .ok_or(PersistenceError::UserNotFound(user.value()))?;

    Ok(Money::from_minor(balance))
}
