//! Page-level layers (modals, overlays) stacked in mount order.
//!
//! Appending layers to one stack is easier than managing the z-order of
//! everything on the page: components stack in the order they mounted.
//! [`LayerStack::push`] returns a handle; the layer's content can be
//! replaced through the handle on every owner update, and dropping the
//! handle removes the layer.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

pub type LayerId = u64;

struct LayerStackInner<T> {
    layers: Vec<(LayerId, T)>,
    next_id: LayerId,
}

/// Shared stack of layers in mount order (bottom first).
pub struct LayerStack<T> {
    inner: Rc<RefCell<LayerStackInner<T>>>,
}

impl<T> Clone for LayerStack<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> LayerStack<T> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(LayerStackInner {
                layers: Vec::new(),
                next_id: 1,
            })),
        }
    }

    /// Mounts a new layer on top of the stack.
    pub fn push(&self, content: T) -> LayerHandle<T> {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.layers.push((id, content));
        LayerHandle {
            stack: Rc::downgrade(&self.inner),
            id,
        }
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().layers.is_empty()
    }

    /// Visits every layer bottom-to-top.
    pub fn for_each(&self, mut visit: impl FnMut(LayerId, &T)) {
        for (id, content) in &self.inner.borrow().layers {
            visit(*id, content);
        }
    }
}

impl<T: Clone> LayerStack<T> {
    /// Layer contents bottom-to-top.
    pub fn contents(&self) -> Vec<T> {
        self.inner
            .borrow()
            .layers
            .iter()
            .map(|(_, content)| content.clone())
            .collect()
    }
}

impl<T> Default for LayerStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Owner handle for one mounted layer. Dropping it unmounts the layer.
pub struct LayerHandle<T> {
    stack: Weak<RefCell<LayerStackInner<T>>>,
    id: LayerId,
}

impl<T> LayerHandle<T> {
    pub fn id(&self) -> LayerId {
        self.id
    }

    /// Replaces the layer's content in place, keeping its stack position.
    pub fn set(&self, content: T) {
        let Some(stack) = self.stack.upgrade() else {
            log::debug!("layer {} updated after its stack was dropped", self.id);
            return;
        };
        let mut inner = stack.borrow_mut();
        match inner.layers.iter_mut().find(|(id, _)| *id == self.id) {
            Some((_, slot)) => *slot = content,
            None => log::debug!("layer {} updated after removal", self.id),
        }
    }
}

impl<T> Drop for LayerHandle<T> {
    fn drop(&mut self) {
        if let Some(stack) = self.stack.upgrade() {
            stack.borrow_mut().layers.retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layers_stack_in_mount_order() {
        let stack = LayerStack::new();
        let _first = stack.push("backdrop");
        let _second = stack.push("dialog");
        assert_eq!(stack.contents(), vec!["backdrop", "dialog"]);
    }

    #[test]
    fn dropping_a_handle_unmounts_its_layer() {
        let stack = LayerStack::new();
        let first = stack.push("backdrop");
        let _second = stack.push("dialog");
        drop(first);
        assert_eq!(stack.contents(), vec!["dialog"]);
    }

    #[test]
    fn set_replaces_content_in_place() {
        let stack = LayerStack::new();
        let _first = stack.push("a");
        let second = stack.push("b");
        second.set("b2");
        assert_eq!(stack.contents(), vec!["a", "b2"]);
    }

    #[test]
    fn set_after_stack_drop_is_a_noop() {
        let stack = LayerStack::new();
        let handle = stack.push("a");
        drop(stack);
        handle.set("b");
    }
}
