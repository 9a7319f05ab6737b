//! NewTypes for values used when first interacting and authenticating
//! with the Matgrid API.

use crate::errors::InvalidSiteUrl;
use aliri_braid::braid;
use serde::{Deserialize, Serialize};
use shrinkwraprs::Shrinkwrap;

/// A [SiteUrl] is the base URL for a Matgrid deployment, e.g.
/// `https://matgrid.example.org/api/`
#[braid(validator, serde)]
pub struct SiteUrl(String);

impl aliri_braid::Validator for SiteUrl {
    type Error = InvalidSiteUrl;

    fn validate(s: &str) -> Result<(), Self::Error> {
        if !(s.starts_with("http://") || s.starts_with("https://")) {
            Err(InvalidSiteUrl::Protocol(s.to_string()))
        } else if !s.ends_with("/api/") {
            Err(InvalidSiteUrl::EndpointRoot(s.to_string()))
        } else {
            Ok(())
        }
    }
}

/// API key issued by a Matgrid site, sent as the `X-API-Key` header.
#[braid(serde)]
pub struct ApiKey;

/// ID of a data view, the column layout predict and design runs operate on.
#[braid(serde)]
pub struct DataViewId;

/// UID of a server-side run (predict request or design run).
#[braid(serde)]
pub struct RunUid;

/// Dataset ID
#[derive(Copy, Clone, Shrinkwrap, Serialize, Deserialize, Debug, Hash, Eq, PartialEq)]
pub struct DatasetId(pub u64);
