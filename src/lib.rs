#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]
//! # dot621
//!
//! dot621 is a convenient wrapper library around an image board's REST API.
//!
//! This library can list, create and edit:
//! - [`Posts`] (uploads, flags and votes included)
//! - [`Pools`]
//! - [`Notes`]
//! - [`Tags`] and [`TagAliases`] (listing only)
//!
//! While respecting:
//! - 1 request-per-second rate limits, shared by every resource client.
//! - HTTP basic authentication whenever a username and API key are set.
//!
//! ## Example: Listing the first few posts for a tag.
//!
//! ```rust,no_run
//! # type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;
//! use dot621::models::post::PostList;
//! use dot621::resources::posts::PostListArgs;
//! use dot621::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = Client::new("my-tool/1.0 (by someone)")?;
//!
//!     let reply = client
//!         .posts()
//!         .list(PostListArgs {
//!             limit: Some(5),
//!             tags: vec!["horse".into()],
//!             ..Default::default()
//!         })
//!         .await?;
//!
//!     for post in reply.json::<PostList>()?.iter() {
//!         println!("{}: {:?}", post.id(), post.file().url());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! [`Posts`]:      crate::resources::posts::Posts
//! [`Pools`]:      crate::resources::pools::Pools
//! [`Notes`]:      crate::resources::notes::Notes
//! [`Tags`]:       crate::resources::tags::Tags
//! [`TagAliases`]: crate::resources::tag_aliases::TagAliases

/// Client module contains [`Client`] for issuing requests and managing login state.
pub mod client;

/// Settings a [`Client`] is built from.
pub mod config;

/// The rate limiter all requests are queued on.
pub mod dispatch;

/// Contains [`Error`]s that can be thrown by the library.
///
/// [`Error`]: crate::error::Error
pub mod error;

pub mod models;

/// Query strings, request descriptions and the [`Model`](request::Model) that sends them.
pub mod request;

pub mod resources;

pub mod result;

/// Identity state shared by every resource client.
pub mod session;

/// The HTTP seam and raw [`Reply`](transport::Reply)s.
pub mod transport;

#[cfg(test)]
pub(crate) mod test_utils;

pub use client::{Client, ClientBuilder};
pub use config::Config;
pub use error::Error;
pub use request::{build_query_string, Model, QueryArgs, RequestSpec};
pub use transport::Reply;
