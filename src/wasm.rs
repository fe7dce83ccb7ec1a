//! WASM bindings for browser-based puzzle conversion.
//!
//! This module exposes CCXML → LaTeX conversion to JavaScript via wasm-bindgen.

use wasm_bindgen::prelude::*;

use crate::{RenderConfig, xml_to_latex};

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Convert a CCXML puzzle to a LaTeX document with solutions filled in.
#[wasm_bindgen]
pub fn ccxml_to_latex(data: &[u8]) -> Result<String, JsValue> {
    xml_to_latex(data, &RenderConfig::default()).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Convert a CCXML puzzle to a LaTeX document with an empty grid.
#[wasm_bindgen]
pub fn ccxml_to_blank_latex(data: &[u8]) -> Result<String, JsValue> {
    let config = RenderConfig {
        show_solution: false,
        ..RenderConfig::default()
    };
    xml_to_latex(data, &config).map_err(|e| JsValue::from_str(&e.to_string()))
}
