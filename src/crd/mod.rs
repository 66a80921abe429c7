// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Custom Resource Definitions for the `ExternalDNS` API.
//!
//! The `ExternalDNS` kind is served in two versions:
//!
//! - [`v1beta1`] - storage version, and the only shape the admission rules see
//! - [`v1alpha1`] - legacy version, converted through [`conversion`]
//!
//! The storage version is re-exported at this level so most code can simply
//! `use crate::crd::ExternalDNSSpec`.

pub mod conversion;
pub mod v1alpha1;
pub mod v1beta1;

pub use v1beta1::*;
