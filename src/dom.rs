use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};
use crate::portfolio::content::ContentEntry;
use crate::portfolio::overlay::OverlayView;

pub const CANVAS_ID: &str = "scene";
pub const OVERLAY_ID: &str = "overlay";
pub const TITLE_ID: &str = "modal-title";
pub const CONTENT_ID: &str = "modal-content";
pub const RESET_ID: &str = "resetCamera";
const HIDDEN_CLASS: &str = "hidden";

pub fn require_element(document: &Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Missing #{} element", id)))
}

/// The page's info panel. The elements belong to the page; this only sets
/// their text and toggles the container's `hidden` class.
pub struct DomOverlay {
    container: Element,
    title: Element,
    content: Element,
}

impl DomOverlay {
    /// Looks up all overlay elements, failing if any is missing.
    pub fn bind(document: &Document) -> Result<Self, JsValue> {
        Ok(DomOverlay {
            container: require_element(document, OVERLAY_ID)?,
            title: require_element(document, TITLE_ID)?,
            content: require_element(document, CONTENT_ID)?,
        })
    }
}

impl OverlayView for DomOverlay {
    fn show(&self, entry: &ContentEntry) -> Result<(), JsValue> {
        self.title.set_text_content(Some(entry.title));
        self.content.set_text_content(Some(entry.text));
        self.container.class_list().remove_1(HIDDEN_CLASS)
    }

    fn hide(&self) -> Result<(), JsValue> {
        self.container.class_list().add_1(HIDDEN_CLASS)
    }
}
