//! # IO Module
//!
//! Adapter layer between HTTP clients and the domain services.
//!
//! Handlers translate JSON requests into service calls and map domain errors
//! to status codes: validation failures become 400 and storage failures 500.
//! No business rules live here.

pub mod rest;
