//! Search endpoints: typed results and the paginating client.

mod client;
mod results;

pub use client::*;
pub use results::*;
