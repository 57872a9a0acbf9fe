//! MongoDB connection management for the LARP services.
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB connector, config and health checks
//! - `config` (default) - `core_config::FromEnv` support for [`mongodb::MongoConfig`]
//!
//! ```ignore
//! use database::mongodb::{MongoConfig, connect_database};
//!
//! let config = MongoConfig::with_database("mongodb://localhost:27017", "larp");
//! let db = connect_database(&config).await?;
//! let events = db.collection::<Document>("events");
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;
