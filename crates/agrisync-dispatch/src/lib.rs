// SPDX-FileCopyrightText: 2026 AgriSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP dispatch layer for the AgriSync offline core.
//!
//! Maps each decrypted action onto its backend operation (JSON or
//! multipart) and probes connectivity ahead of each drain pass.

pub mod http;
pub mod probe;

pub use http::HttpDispatcher;
pub use probe::HttpConnectivityProbe;
