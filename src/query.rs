//! The recursive query object model.
//!
//! A search request is a tree of optional-field value objects which
//! serializes to the nested JSON document the server's query parser
//! expects. Unset fields are omitted from the document entirely; a query
//! node never serializes to `null` or an empty container, which would
//! over-constrain matching server-side.
//!
//! All query types start empty ([Default]) and are populated through
//! chainable methods:
//!
//! ```
//! use matgrid::query::*;
//!
//! let query = DatasetReturningQuery::new()
//!     .size(0)
//!     .query(
//!         DataQuery::new().dataset(DatasetQuery::new().id(Filter::new().equal("151278"))),
//!     );
//! ```

mod data;
mod field;
mod filter;
mod object;
mod returning;

pub use data::*;
pub use field::*;
pub use filter::*;
pub use object::*;
pub use returning::*;
