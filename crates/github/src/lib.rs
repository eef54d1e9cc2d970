//! GitHub infrastructure adapter for the following tracker.
//!
//! Implements [`tracker::ports::FollowingSource`] and
//! [`tracker::ports::RelationshipChecker`] over the public GitHub REST API with
//! `reqwest`:
//!
//! - `GET /users/{username}/following?per_page={n}&page={p}` lists followees.
//! - `GET /users/{follower}/following/{target}` answers 204 when the
//!   relationship exists.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** This crate must not contain domain rules. Status-code
//! interpretation, rate-limit detection, headers and wire decoding live here;
//! the [`tracker`] crate never sees them. Requests are never retried.

pub mod classify;
pub mod client;
pub mod wire;

pub use client::{GithubClient, GithubConfig, GithubError, DEFAULT_BASE_URL};
