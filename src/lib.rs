// Main library file for the hotel listing query engine

// Pipeline stages, leaf-first
pub mod catalog;
pub mod config;
pub mod filter;
pub mod hotel;
pub mod paginate;
pub mod query;
pub mod sort;

// Re-export key types for convenience
pub use catalog::{Catalog, CatalogError, QuarantinedEntry, SAMPLE_CATALOG_PATH};
pub use config::{ConfigError, EngineConfig};
pub use filter::{filter, FilterCriteria, PriceBand, RatingBand};
pub use hotel::{AmenityIcon, HotelFields, HotelRecord, RecordError, RoomOffer};
pub use paginate::{paginate, Page, PageState};
pub use query::{QueryController, QueryError, QueryIntent, QueryState, QueryView};
pub use sort::{sort, SortKey};
