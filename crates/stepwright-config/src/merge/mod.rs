//! Merging of property layers.
//!
//! Layers are flattened to dotted keys before merging, so a nested table in
//! one file and a dotted key in another address the same property. Values
//! from the overlay **replace** the base value; arrays are not concatenated.

mod types;

pub use types::{ConfigLayer, FieldSources};

use crate::bundle::PropertyBundle;

/// Merge `overlay` into `base`, recording `layer` as the source of every key
/// the overlay sets. Returns the number of keys written.
pub fn merge_layer(
    base: &mut PropertyBundle,
    overlay: &PropertyBundle,
    layer: &ConfigLayer,
    sources: &mut FieldSources,
) -> usize {
    let mut written = 0_usize;
    for (key, value) in overlay.iter() {
        base.set(key, value.clone());
        sources.insert(key.to_owned(), layer.clone());
        written = written.saturating_add(1);
    }
    written
}

/// Record `layer` as the source of every key in `bundle`.
pub fn record_layer(bundle: &PropertyBundle, layer: &ConfigLayer, sources: &mut FieldSources) {
    for key in bundle.keys() {
        sources.insert(key.to_owned(), layer.clone());
    }
}
