//! A button group that allows several buttons to be selected at once.
//!
//! Controlled like [`ButtonGroup`](crate::ButtonGroup): toggles report the
//! next selection list through the change callback and the owner pushes the
//! accepted list back with [`MultiButtonGroup::set_values`].

use crate::button_group::ButtonSpec;

pub struct MultiButtonGroup<V> {
    buttons: Vec<ButtonSpec<V>>,
    values: Vec<V>,
    allow_empty: bool,
    on_change: Box<dyn FnMut(&[V])>,
}

impl<V: Clone + PartialEq> MultiButtonGroup<V> {
    pub fn new(buttons: Vec<ButtonSpec<V>>, on_change: impl FnMut(&[V]) + 'static) -> Self {
        Self {
            buttons,
            values: Vec::new(),
            allow_empty: true,
            on_change: Box::new(on_change),
        }
    }

    pub fn with_values(mut self, values: Vec<V>) -> Self {
        self.values = values;
        self
    }

    /// When off, the last selected value cannot be toggled away.
    pub fn allow_empty(mut self, allow_empty: bool) -> Self {
        self.allow_empty = allow_empty;
        self
    }

    /// Owner-side update after a change was accepted.
    pub fn set_values(&mut self, values: Vec<V>) {
        self.values = values;
    }

    pub fn values(&self) -> &[V] {
        &self.values
    }

    pub fn buttons(&self) -> &[ButtonSpec<V>] {
        &self.buttons
    }

    pub fn is_selected(&self, value: &V) -> bool {
        self.values.contains(value)
    }

    /// A click on the button carrying `new_value`: unselect it when it is
    /// selected (unless it is the last selection and the group must not be
    /// empty), select it otherwise.
    pub fn toggle_select(&mut self, new_value: &V) {
        let mut next = self.values.clone();
        if let Some(index) = next.iter().position(|v| v == new_value) {
            if next.len() > 1 || self.allow_empty {
                next.remove(index);
            }
        } else {
            next.push(new_value.clone());
        }
        (self.on_change)(&next);
    }
}
