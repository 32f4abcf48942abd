// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query operations for the booking store and payment ledger.

pub mod accounts;
pub mod bookings;
pub mod entries;
