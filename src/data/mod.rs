//! Data module - CSV loading, joining, filtering, and selection linking

mod filter;
mod loader;
mod model;

pub use filter::{region_indices, Selection};
pub use loader::{load_dataset, LoaderConfig, LoaderError};
pub use model::{distinct_regions, CountryRecord};
