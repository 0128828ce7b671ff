//! `codebook` - An in-memory record catalog served over HTTP
//!
//! Records and two reference tables are loaded once from a JSON seed file.
//! The HTTP layer serves CRUD over the records, filtering by model and tech,
//! and a detail view that translates model and tech codes into labels.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod logging;
pub mod model;
pub mod server;
pub mod store;
pub mod translate;

pub use config::Config;
pub use error::{Error, Result};
pub use filter::RecordFilter;
pub use logging::init_logging;
pub use model::{Data, DataDetail, ModelReference, Reference, Seed, TechReference};
pub use store::{Store, StoreStats};
pub use translate::Translator;
