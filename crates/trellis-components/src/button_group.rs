//! An exclusive group of buttons, like radio buttons without the radio.
//!
//! The group is controlled: [`ButtonGroup::toggle_select`] reports the next
//! selection through the change callback, and the owner pushes the accepted
//! value back with [`ButtonGroup::set_value`].

/// One button in a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonSpec<V> {
    /// Value reported when this button is selected.
    pub value: V,
    /// Display text for the button.
    pub label: String,
    /// Title text shown on hover.
    pub title: Option<String>,
}

impl<V> ButtonSpec<V> {
    pub fn new(value: V, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// At most one button selected at a time; exactly one when `allow_empty` is
/// off.
pub struct ButtonGroup<V> {
    buttons: Vec<ButtonSpec<V>>,
    value: Option<V>,
    allow_empty: bool,
    on_change: Box<dyn FnMut(Option<&V>)>,
}

impl<V: Clone + PartialEq> ButtonGroup<V> {
    pub fn new(
        buttons: Vec<ButtonSpec<V>>,
        on_change: impl FnMut(Option<&V>) + 'static,
    ) -> Self {
        Self {
            buttons,
            value: None,
            allow_empty: true,
            on_change: Box::new(on_change),
        }
    }

    pub fn with_value(mut self, value: V) -> Self {
        self.value = Some(value);
        self
    }

    /// When off, exactly one button must stay selected; clicking the
    /// selected button again keeps it selected.
    pub fn allow_empty(mut self, allow_empty: bool) -> Self {
        self.allow_empty = allow_empty;
        self
    }

    /// Owner-side update after a change was accepted.
    pub fn set_value(&mut self, value: Option<V>) {
        self.value = value;
    }

    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    pub fn buttons(&self) -> &[ButtonSpec<V>] {
        &self.buttons
    }

    pub fn is_selected(&self, value: &V) -> bool {
        self.value.as_ref() == Some(value)
    }

    /// A click on the button carrying `new_value`: select it, or unselect
    /// when it was already selected and the group may be empty.
    pub fn toggle_select(&mut self, new_value: &V) {
        if self.allow_empty {
            let next = if self.value.as_ref() != Some(new_value) {
                Some(new_value)
            } else {
                None
            };
            (self.on_change)(next);
        } else {
            (self.on_change)(Some(new_value));
        }
    }
}
