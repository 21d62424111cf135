use wasm_bindgen::prelude::*;

/// JavaScript entry point: filter-list text in, JSON rule array out.
///
/// Never throws; unsupported lines are simply left out of the result.
#[wasm_bindgen(js_name = parseFilterListWasm)]
pub fn parse_filter_list_wasm(filter_list_text: &str) -> String {
    crate::transform(filter_list_text)
}
