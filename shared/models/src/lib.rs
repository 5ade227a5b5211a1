//! # Labstock Domain Models
//!
//! Plain data types shared by the inventory search engine, the storage
//! collaborators and the HTTP service.
//!
//! ## Key Models
//!
//! - **ComponentRecord**: structured projection of one inventory block (part number, description, location)
//! - **SearchQuery**: optional part number, value and footprint filters
//! - **InventorySource** / **SourceDump**: named inventory dumps and their retrieved text
//! - **ReorderRequest**: one append-only ledger entry, with its line format
//!
//! Models derive serde traits for the HTTP layer; `ReorderRequest` also derives
//! `validator::Validate`.

pub mod component;
pub mod query;
pub mod reorder;
pub mod source;


pub use component::*;
pub use query::*;
pub use reorder::*;
pub use source::*;
