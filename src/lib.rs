//! Client library for the Matgrid materials-informatics platform.
//!
//! The platform exposes REST endpoints for search over datasets, PIF
//! (Physical Information File) records and dataset files, predictive
//! models, experimental-design optimization, and data management. This
//! crate wraps them in typed request and response objects:
//!
//! - [query] holds the recursive query object model. Query trees are
//!   plain value objects which serialize to the nested JSON documents
//!   the search endpoints expect, omitting every unset field.
//! - [SearchClient] issues search requests, enforces the maximum
//!   pagination depth, and pages transparently when no pagination
//!   controls are given.
//! - [ModelsClient] submits predict requests and experimental-design
//!   runs and polls their status.
//! - [DataClient] manages datasets and their files.

mod client;
pub mod data;
pub mod design;
pub mod errors;
pub mod models;
pub mod query;
pub mod search;
pub mod types;

pub use client::MatgridClient;
pub use data::DataClient;
pub use models::{ModelsClient, MAX_DESIGN_EFFORT};
pub use search::{SearchClient, MAX_QUERY_DEPTH};
