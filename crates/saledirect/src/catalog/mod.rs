//! Property catalog: the search/filter/sort engine and its data sources.

pub mod domain;
mod filter;
mod search;
pub mod source;

pub use domain::{
    Address, AustralianState, CatalogError, PropertyCatalog, PropertyId, PropertyRecord,
    PropertyType,
};
pub use filter::{filter, sort, FilterSpec, SortKey};
pub use search::{SearchEngine, SearchReply, SearchToken};
pub use source::{sample_catalog, PropertySource, SampleCatalog, SourceError};
