use wasm_bindgen::JsValue;
use crate::portfolio::content::ContentEntry;

/// Where overlay changes end up. The browser implementation writes to DOM
/// elements it does not own.
pub trait OverlayView {
    fn show(&self, entry: &ContentEntry) -> Result<(), JsValue>;
    fn hide(&self) -> Result<(), JsValue>;
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct OverlayState {
    pub visible: bool,
    pub entry: Option<&'static ContentEntry>,
}

/// Two-state info panel: hidden, or visible with exactly one entry.
pub struct Overlay<V: OverlayView> {
    view: V,
    state: OverlayState,
}

impl<V: OverlayView> Overlay<V> {
    pub fn new(view: V) -> Self {
        Overlay { view, state: OverlayState::default() }
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn show(&mut self, entry: &'static ContentEntry) -> Result<(), JsValue> {
        self.state = OverlayState { visible: true, entry: Some(entry) };
        self.view.show(entry)
    }

    pub fn hide(&mut self) -> Result<(), JsValue> {
        self.state = OverlayState { visible: false, entry: None };
        self.view.hide()
    }
}
