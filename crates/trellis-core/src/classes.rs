//! Decoration state for transitioning children.
//!
//! A [`ClassList`] is the ordered set of transition-related class names
//! currently applied to a child's visual representation. The coordinator
//! owns one per tracked child and reports every mutation to the host
//! through `on_decoration_change`.

use std::fmt;

/// Which transition a class name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    Enter,
    Leave,
}

impl TransitionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TransitionKind::Enter => "enter",
            TransitionKind::Leave => "leave",
        }
    }

    /// Base class name for this transition, e.g. `fade-enter`.
    pub fn base_class(self, prefix: &str) -> String {
        format!("{prefix}-{}", self.as_str())
    }

    /// Active class name for this transition, e.g. `fade-enter-active`.
    ///
    /// The active class is always derived from the base class so the pair
    /// can be removed together once the transition completes.
    pub fn active_class(self, prefix: &str) -> String {
        format!("{prefix}-{}-active", self.as_str())
    }
}

/// Ordered, duplicate-free set of class names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    classes: Vec<String>,
}

impl ClassList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `class` unless it is already present. Returns whether the list
    /// changed.
    pub fn add(&mut self, class: impl Into<String>) -> bool {
        let class = class.into();
        if self.contains(&class) {
            return false;
        }
        self.classes.push(class);
        true
    }

    /// Removes `class` if present. Returns whether the list changed.
    pub fn remove(&mut self, class: &str) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| c != class);
        self.classes.len() != before
    }

    pub fn contains(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.classes
    }

    pub fn clear(&mut self) {
        self.classes.clear();
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.classes.join(" "))
    }
}
