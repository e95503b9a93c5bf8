pub mod client;
pub mod error;
pub mod ingest;
pub mod queries;
pub mod types;

pub use client::{ClientOptions, GraphqlClient};
pub use error::GraphqlError;
pub use ingest::{ingest_detail, ingest_page};
