//! MongoDB backend implementation for docport.
//!
//! This crate provides a MongoDB-based implementation of the `StoreBackend` trait, so a
//! hierarchical collection tree can be exported from and imported into a MongoDB database.
//!
//! To use this backend through the facade crate, include the `mongodb` feature:
//!
//! ```toml
//! [dependencies]
//! docport = { version = "x.y.z", features = ["mongodb"] }
//! ```
//!
//! # Layout
//!
//! MongoDB collections are flat, so every store collection maps to one MongoDB collection
//! named after its full path (`users`, `users/u1/posts`). A document is stored with its key
//! as `_id`. The child collections of a document are the MongoDB collections whose names
//! start with the document path.
//!
//! # Connection
//!
//! Connection settings are read from a credential file, see [`credentials::ServiceAccount`].
//!
//! ```ignore
//! use docport::{backend::StoreBackendBuilder, mongodb::{MongoDbStoreBuilder, ServiceAccount, DatabaseId}};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let account = ServiceAccount::from_file("service-account.json")?;
//!     let store = MongoDbStoreBuilder::from_service_account(&account, &DatabaseId::Default)
//!         .build()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as docport_mongodb;

pub mod credentials;
pub mod sanitizer;
pub mod store;

pub use credentials::{DatabaseId, ServiceAccount};
pub use store::{MongoDbStore, MongoDbStoreBuilder};
