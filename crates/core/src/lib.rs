//! Core domain for the gatehouse auth stack.
//!
//! Pure types, traits, and functions only. Everything that performs I/O
//! (HTTP dispatch, session storage, provider round-trips) lives in
//! `gatehouse_auth`.

pub mod auth;
