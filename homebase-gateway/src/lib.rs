//! HTTP API gateway for the homebase resource store.
//!
//! Exposes create/list/read/delete endpoints for users and devices, each
//! served by a short pipeline of validation and persistence steps, plus a
//! health check.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod context;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod routes;
pub mod validation;
