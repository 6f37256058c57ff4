// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Add-observation forms for Starlog: the session/type selector and the
//! field catalog of each observation type.

pub mod catalog;
pub mod selector;

pub use catalog::{FieldKind, FieldSpec, fields_for, object_name, validate_fields};
pub use selector::{ObservationFormSelector, SelectorState};
