//! Core types for the Concierge guest-management client.
//!
//! This crate is free of HTTP and terminal dependencies. It holds the domain
//! types, the guest list view-model, the form model, and the [`GuestApi`]
//! abstraction that the HTTP client implements.
//!
//! [`GuestApi`]: api::GuestApi

pub mod api;
pub mod collate;
pub mod error;
pub mod form;
pub mod guest;
pub mod session;
pub mod view;

pub use error::{Error, Result};
