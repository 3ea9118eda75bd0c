//! WASM bindings for the viewer

use crate::{PageConfig, Recipe, Viewer};
use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// WASM-exposed viewer wrapper.
///
/// Takes one already-selected recipe record as JSON; fetching the data
/// file and picking a record from it stay in the JS shell.
#[wasm_bindgen]
pub struct WasmViewer {
    viewer: Viewer,
}

#[wasm_bindgen]
impl WasmViewer {
    /// Create a viewer for a recipe JSON record and page dimensions.
    #[wasm_bindgen(constructor)]
    pub fn new(
        recipe_json: &str,
        page_height: f32,
        padding_vertical: f32,
        content_width: f32,
    ) -> Result<WasmViewer, JsError> {
        let recipe = Recipe::from_json(recipe_json)?;
        let config = PageConfig::new(page_height, padding_vertical, content_width)?;
        let viewer = Viewer::new(recipe, config)?;
        Ok(Self { viewer })
    }

    /// Create a viewer with the default page dimensions.
    #[wasm_bindgen(js_name = withDefaults)]
    pub fn with_defaults(recipe_json: &str) -> Result<WasmViewer, JsError> {
        let recipe = Recipe::from_json(recipe_json)?;
        let viewer = Viewer::new(recipe, PageConfig::default())?;
        Ok(Self { viewer })
    }

    /// Re-paginate for new page dimensions (viewport resize)
    pub fn resize(
        &mut self,
        page_height: f32,
        padding_vertical: f32,
        content_width: f32,
    ) -> Result<(), JsError> {
        let config = PageConfig::new(page_height, padding_vertical, content_width)?;
        self.viewer.resize(config)?;
        Ok(())
    }

    /// Advance to the next spread; false at the last one
    #[wasm_bindgen(js_name = nextSpread)]
    pub fn next_spread(&mut self) -> bool {
        let before = self.viewer.current_index();
        self.viewer.next();
        self.viewer.current_index() != before
    }

    /// Go back one spread; false at the first one
    #[wasm_bindgen(js_name = prevSpread)]
    pub fn prev_spread(&mut self) -> bool {
        let before = self.viewer.current_index();
        self.viewer.prev();
        self.viewer.current_index() != before
    }

    /// Jump to a spread index (clamped); returns the landed index
    #[wasm_bindgen(js_name = gotoSpread)]
    pub fn goto_spread(&mut self, index: usize) -> usize {
        self.viewer.goto(index);
        self.viewer.current_index()
    }

    /// HTML for the current spread (empty string for an empty document)
    #[wasm_bindgen(js_name = currentSpreadHtml)]
    pub fn current_spread_html(&self) -> String {
        self.viewer.current_spread_html()
    }

    /// Current spread index
    #[wasm_bindgen(js_name = currentIndex)]
    pub fn current_index(&self) -> usize {
        self.viewer.current_index()
    }

    /// Total spread count
    #[wasm_bindgen(js_name = spreadCount)]
    pub fn spread_count(&self) -> usize {
        self.viewer.spread_count()
    }

    /// Total page count
    #[wasm_bindgen(js_name = pageCount)]
    pub fn page_count(&self) -> usize {
        self.viewer.page_count()
    }

    /// Whether the prev button should be enabled
    #[wasm_bindgen(js_name = canGoPrev)]
    pub fn can_go_prev(&self) -> bool {
        self.viewer.can_go_prev()
    }

    /// Whether the next button should be enabled
    #[wasm_bindgen(js_name = canGoNext)]
    pub fn can_go_next(&self) -> bool {
        self.viewer.can_go_next()
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn constructs_from_json() {
        let viewer = WasmViewer::with_defaults(
            r#"{"title": "Tea", "ingredients": ["water"], "instructions": ["boil"]}"#,
        )
        .unwrap();
        assert_eq!(viewer.page_count(), 1);
        assert!(viewer.current_spread_html().contains("Tea"));
    }

    #[wasm_bindgen_test]
    fn rejects_bad_json() {
        assert!(WasmViewer::with_defaults("{oops").is_err());
    }
}
