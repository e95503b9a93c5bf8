//! Domain types and pure listing logic for the comercios directory.
//!
//! Everything here is transport-agnostic: the GraphQL client lives in
//! `guia-graphql` and feeds [`Page`]s into a [`PaginationController`]
//! through the [`PageSource`] trait.

pub mod app_config;
pub mod categories;
pub mod config;
pub mod filter;
pub mod listing;
pub mod normalize;
pub mod pagination;

pub use app_config::{AppConfig, Environment};
pub use categories::{category_label, extract_categories};
pub use config::{load_app_config, load_app_config_from_env};
pub use filter::{filter_listings, FilterState};
pub use listing::{Category, Listing, ListingDetail, Page, PageInfo, Weekday, WeeklySchedule};
pub use normalize::normalize;
pub use pagination::{
    merge_page, ListingPhase, LoadMoreOutcome, PageSource, PaginationController,
    PaginationSnapshot, PAGE_SIZE,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
