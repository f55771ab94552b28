pub mod completions;
pub mod css;
pub mod families;
pub mod help;
pub mod preview;
pub mod resolve;
pub mod set;
pub mod show;

use crate::catalog::Catalog;
use crate::error::{Error, Result};

/// Match a family name typed on the command line against the catalog,
/// ignoring case.
pub(crate) fn family_name(catalog: &Catalog, query: &str) -> Result<String> {
    catalog
        .find_by_name(query)
        .map(|s| s.to_string())
        .ok_or_else(|| {
            let known: Vec<&str> = catalog.families().collect();
            log::debug!("known families: {}", known.join(", "));
            Error::UnknownFamily(query.trim().to_string())
        })
}
