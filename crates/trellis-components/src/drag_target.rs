//! Drag-hover decoration for a drop target.
//!
//! The host wires its platform's drag events into the handlers here; the
//! target tracks whether a drag is hovering (so the host can dim or
//! highlight the element) and forwards accepted drops. What a drop payload
//! means is entirely the host's business.

pub struct DragTarget<E> {
    hover: bool,
    should_highlight: Box<dyn Fn(&E) -> bool>,
    on_drop: Box<dyn FnMut(E)>,
}

impl<E> DragTarget<E> {
    pub fn new(on_drop: impl FnMut(E) + 'static) -> Self {
        Self {
            hover: false,
            should_highlight: Box::new(|_| true),
            on_drop: Box::new(on_drop),
        }
    }

    /// Predicate deciding whether a hovering drag should highlight the
    /// target (for instance, only drags carrying images).
    pub fn should_highlight(mut self, predicate: impl Fn(&E) -> bool + 'static) -> Self {
        self.should_highlight = Box::new(predicate);
        self
    }

    /// Whether a drag is currently hovering the target.
    pub fn drag_hover(&self) -> bool {
        self.hover
    }

    pub fn handle_drag_enter(&mut self, event: &E) {
        self.hover = (self.should_highlight)(event);
    }

    pub fn handle_drag_leave(&mut self) {
        self.hover = false;
    }

    pub fn handle_drag_end(&mut self) {
        self.hover = false;
    }

    pub fn handle_drop(&mut self, event: E) {
        self.hover = false;
        (self.on_drop)(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn hovering_highlights_by_default() {
        let mut target = DragTarget::new(|_: &str| {});
        target.handle_drag_enter(&"files");
        assert!(target.drag_hover());
        target.handle_drag_leave();
        assert!(!target.drag_hover());
    }

    #[test]
    fn predicate_can_decline_the_highlight() {
        let mut target =
            DragTarget::new(|_: &str| {}).should_highlight(|event| event.starts_with("image"));
        target.handle_drag_enter(&"text/plain");
        assert!(!target.drag_hover());
        target.handle_drag_enter(&"image/png");
        assert!(target.drag_hover());
    }

    #[test]
    fn drop_clears_the_hover_and_forwards_the_payload() {
        let drops = Rc::new(RefCell::new(Vec::new()));
        let mut target = {
            let drops = Rc::clone(&drops);
            DragTarget::new(move |event: &str| drops.borrow_mut().push(event.to_string()))
        };

        target.handle_drag_enter(&"files");
        target.handle_drop("files");
        assert!(!target.drag_hover());
        assert_eq!(*drops.borrow(), vec!["files".to_string()]);
    }
}
