//! Process-local mirror of which objects of one kind exist in the cluster
//!
//! [`ExistenceCache`] is fed by a background [`watch::Informer`] and answers
//! [`ExistenceChecker::exists`] without touching the API server.

pub mod cache;
pub mod checker;
pub mod config;
mod error;
pub mod handler;
pub mod kubemodel;
pub mod watch;

pub use cache::ExistenceCache;
pub use checker::{AlwaysExists, ExistenceChecker};
pub use error::{Error, Result};
pub use handler::{Deleted, EventHandler};
pub use kubemodel::ResourceKind;
