//! Converts adblock-style filter lists into declarative network request rules.
//!
//! ```
//! let json = filterlist_dnr::transform("! ads\n||ads.example.com^\n");
//! assert_eq!(
//!     json,
//!     r#"[{"id":1,"priority":1,"action":{"type":"block"},"condition":{"urlFilter":"||ads.example.com/","resourceTypes":["main_frame","sub_frame","script","xmlhttprequest"]}}]"#
//! );
//! ```
use log::error;

pub mod builders;
pub mod core;
pub mod utils;
#[cfg(feature = "wasm")]
pub mod wasm;

pub use builders::patterns::{FilterRule, ResourceType, RuleKind, RulePolicy};
pub use crate::core::engine::{Conversion, ConversionEngine, ConversionStats};

/// Converts filter-list text into a JSON array of rules.
///
/// Lines that are blank, comments, or not a supported rule are skipped; the
/// result is always a JSON array, `[]` when nothing was recognized.
pub fn transform(filter_list_text: &str) -> String {
    let engine = ConversionEngine::default();
    match engine.transform(filter_list_text) {
        Ok(json) => json,
        Err(err) => {
            error!("Failed to serialize rules: {err:#}");
            String::from("[]")
        }
    }
}

/// Like [`transform`], for input that may not be valid UTF-8.
pub fn transform_bytes(filter_list_bytes: &[u8]) -> String {
    transform(&String::from_utf8_lossy(filter_list_bytes))
}
