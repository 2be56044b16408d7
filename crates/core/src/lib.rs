//! Domain logic for the toyshop backend.
//!
//! Everything in this crate is transport- and storage-agnostic: item field
//! validation, the upload policy and file pipeline, image post-processing,
//! and the request rate limiter. The HTTP and database layers live in
//! `toyshop-api` and `toyshop-db`.

pub mod error;
pub mod images;
pub mod items;
pub mod ratelimit;
pub mod types;
pub mod uploads;
