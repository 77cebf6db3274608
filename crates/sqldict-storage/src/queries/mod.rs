// SPDX-FileCopyrightText: 2026 SqlDict Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Statement bodies shared by the blocking and suspendable stores.
//!
//! Every function here takes an open connection and returns a plain
//! `rusqlite::Result`; choosing how the connection is obtained and how the
//! caller waits is left to [`crate::strategy`].

pub(crate) mod entries;
pub(crate) mod table;
