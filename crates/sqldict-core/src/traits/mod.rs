// SPDX-FileCopyrightText: 2026 SqlDict Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mapping contracts implemented by the blocking and suspendable stores.

pub mod store;

pub use store::{AsyncMapStore, MapStore};
