//! Modal dialog chrome: close behavior and class assembly.
//!
//! Rendering of the dialog and its backdrop belongs to the host; this type
//! owns the behavioral surface of a bootstrap-style modal: escape-key
//! close (opt-out), the backdrop mode, and the class list applied to the
//! dialog element.

/// How the backdrop behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backdrop {
    /// Backdrop shown; clicking it closes the modal.
    #[default]
    Closable,
    /// Backdrop shown; clicks on it are ignored.
    Static,
    /// No backdrop.
    Hidden,
}

pub struct Modal {
    class_name: String,
    keyboard: bool,
    backdrop: Backdrop,
    on_close: Box<dyn FnMut()>,
}

impl Modal {
    pub fn new(on_close: impl FnMut() + 'static) -> Self {
        Self {
            class_name: String::new(),
            keyboard: true,
            backdrop: Backdrop::default(),
            on_close: Box::new(on_close),
        }
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    /// Close the modal when escape is pressed? Defaults to true.
    pub fn keyboard(mut self, keyboard: bool) -> Self {
        self.keyboard = keyboard;
        self
    }

    pub fn backdrop(mut self, backdrop: Backdrop) -> Self {
        self.backdrop = backdrop;
        self
    }

    pub fn backdrop_mode(&self) -> Backdrop {
        self.backdrop
    }

    pub fn has_backdrop(&self) -> bool {
        self.backdrop != Backdrop::Hidden
    }

    /// A key event reached the modal. Only escape is interesting.
    pub fn handle_key(&mut self, key: &str) {
        if self.keyboard && key == "Escape" {
            (self.on_close)();
        }
    }

    /// A click landed on the backdrop.
    pub fn handle_backdrop_click(&mut self) {
        if self.backdrop == Backdrop::Closable {
            (self.on_close)();
        }
    }

    /// Classes for the dialog element: the caller's class plus `modal`.
    pub fn class_list(&self) -> Vec<String> {
        let mut classes = Vec::new();
        if !self.class_name.is_empty() {
            classes.push(self.class_name.clone());
        }
        classes.push("modal".to_string());
        classes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn make_modal() -> (Modal, Rc<Cell<u32>>) {
        let closes = Rc::new(Cell::new(0));
        let modal = {
            let closes = Rc::clone(&closes);
            Modal::new(move || closes.set(closes.get() + 1))
        };
        (modal, closes)
    }

    #[test]
    fn escape_closes_by_default() {
        let (mut modal, closes) = make_modal();
        modal.handle_key("Escape");
        assert_eq!(closes.get(), 1);
    }

    #[test]
    fn other_keys_are_ignored() {
        let (mut modal, closes) = make_modal();
        modal.handle_key("Enter");
        modal.handle_key("a");
        assert_eq!(closes.get(), 0);
    }

    #[test]
    fn escape_is_inert_with_keyboard_off() {
        let (modal, closes) = make_modal();
        let mut modal = modal.keyboard(false);
        modal.handle_key("Escape");
        assert_eq!(closes.get(), 0);
    }

    #[test]
    fn backdrop_click_respects_the_mode() {
        let (modal, closes) = make_modal();
        let mut modal = modal.backdrop(Backdrop::Static);
        modal.handle_backdrop_click();
        assert_eq!(closes.get(), 0);

        let (modal, closes) = make_modal();
        let mut modal = modal.backdrop(Backdrop::Closable);
        modal.handle_backdrop_click();
        assert_eq!(closes.get(), 1);
    }

    #[test]
    fn class_list_always_ends_with_modal() {
        let (modal, _closes) = make_modal();
        let modal = modal.with_class_name("prompt");
        assert_eq!(modal.class_list(), vec!["prompt", "modal"]);
    }
}
