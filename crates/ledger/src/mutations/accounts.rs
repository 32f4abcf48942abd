// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User and service mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::info;

use crate::diesel_schema::{services, users};
use crate::error::PersistenceError;
use crate::sqlite;
use tasklink_domain::{Money, Role, ServiceId, UserId};

/// Creates a new user account.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `name` - Display name
/// * `email` - Unique email address
/// * `role` - Customer or provider
///
/// # Errors
///
/// Returns an error if the user cannot be created, including when the
/// email is already taken.
pub fn create_user(
    conn: &mut SqliteConnection,
    name: &str,
    email: &str,
    role: Role,
) -> Result<UserId, PersistenceError> {
    diesel::insert_into(users::table)
        .values((
            users::name.eq(name),
            users::email.eq(email),
            users::role.eq(role.as_str()),
        ))
        .execute(conn)?;

    let user_id: i64 = sqlite::get_last_insert_rowid(conn)?;

    info!(user_id, role = role.as_str(), "Created user");

    Ok(UserId::new(user_id))
}

/// Creates a new service offering for a provider.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `provider` - The owning provider
/// * `title` - Service title
/// * `price` - Price in minor units
///
/// # Errors
///
/// Returns an error if the provider does not exist or the insert fails.
pub fn create_service(
    conn: &mut SqliteConnection,
    provider: UserId,
    title: &str,
    price: Money,
) -> Result<ServiceId, PersistenceError> {
    diesel::insert_into(services::table)
        .values((
            services::provider_id.eq(provider.value()),
            services::title.eq(title),
            services::price.eq(price.minor()),
        ))
        .execute(conn)?;

    let service_id: i64 = sqlite::get_last_insert_rowid(conn)?;

    info!(service_id, provider = provider.value(), "Created service");

    Ok(ServiceId::new(service_id))
}

/// Stores the payout account reference for a provider.
///
/// Set once when the provider first goes through payout onboarding and
/// reused for every later withdrawal.
///
/// # Errors
///
/// Returns an error if the user does not exist or the update fails.
pub fn set_payout_account(
    conn: &mut SqliteConnection,
    user: UserId,
    account_ref: &str,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(users::table.filter(users::user_id.eq(user.value())))
        .set(users::payout_account_ref.eq(account_ref))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::UserNotFound(user.value()));
    }

    info!(user_id = user.value(), "Stored payout account reference");

    Ok(())
}
