//! Built-in routine catalog.
//!
//! The catalog is a JSON document bundled into the binary and parsed once.

use std::sync::OnceLock;

use serde::Deserialize;

use super::Routine;

const DEFAULTS_JSON: &str = include_str!("../../catalog/defaults.json");

#[derive(Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    routines: Vec<Routine>,
}

fn catalog() -> &'static [Routine] {
    static CATALOG: OnceLock<Vec<Routine>> = OnceLock::new();
    CATALOG.get_or_init(|| match serde_json::from_str::<CatalogDocument>(DEFAULTS_JSON) {
        Ok(doc) => doc
            .routines
            .into_iter()
            .map(|mut r| {
                r.is_default = true;
                r
            })
            .collect(),
        Err(e) => {
            tracing::error!("bundled routine catalog is invalid: {e}");
            Vec::new()
        }
    })
}

/// Returns all built-in routines, in catalog order, flagged as defaults.
pub fn default_routines() -> Vec<Routine> {
    catalog().to_vec()
}
