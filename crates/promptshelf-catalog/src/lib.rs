//! Catalog filtering and pagination for Promptshelf.
//!
//! # Key Abstractions
//!
//! - [`FilterState`]: immutable filter value; every mutation returns a new
//!   value with the page reset to 1
//! - [`query`]: `parse`/`serialize` between `FilterState` and query strings
//! - [`Pagination`]: page arithmetic over a match count
//! - [`Catalog`]: the loaded entry list with views and facets

#![doc = include_str!("../README.md")]

pub mod catalog;
pub mod filter;
pub mod pagination;
pub mod query;

pub use catalog::{Catalog, CatalogView, CategoryInfo, LanguageInfo};
pub use filter::{FilterState, filter_entries};
pub use pagination::{PAGE_SIZE, Pagination, paginate};
