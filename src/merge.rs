//! Deep-merge of layered raw inputs, run before validation.

use crate::value::{RawInput, RawValue};

/// Deep-merge `overlay` on top of `base`.
/// If both sides have an object for the same key, recurse.
/// Otherwise, `overlay`'s value wins.
pub fn deep_merge(mut base: RawInput, overlay: RawInput) -> RawInput {
    for (key, overlay_val) in overlay {
        match (base.remove(&key), overlay_val) {
            (Some(RawValue::Object(base_map)), RawValue::Object(overlay_map)) => {
                base.insert(key, RawValue::Object(deep_merge(base_map, overlay_map)));
            }
            (_, overlay_val) => {
                base.insert(key, overlay_val);
            }
        }
    }
    base
}
