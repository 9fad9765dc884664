//! Tooltip visibility and placement state.
//!
//! The owner shows and hides the tooltip (usually from hover or focus
//! handlers on the target element) and reads the placement descriptor when
//! rendering. Where exactly the bubble and its arrow land is the
//! renderer's problem, not ours.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalPosition {
    Left,
    #[default]
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalAlign {
    #[default]
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalPosition {
    Top,
    #[default]
    Bottom,
}

/// Which side of the target the tooltip attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Placement {
    pub horizontal_position: HorizontalPosition,
    pub horizontal_align: HorizontalAlign,
    pub vertical_position: VerticalPosition,
}

pub struct Tooltip {
    visible: bool,
    placement: Placement,
}

impl Tooltip {
    pub fn new(placement: Placement) -> Self {
        Self {
            visible: false,
            placement,
        }
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}

impl Default for Tooltip {
    fn default() -> Self {
        Self::new(Placement::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_hidden() {
        let tooltip = Tooltip::default();
        assert!(!tooltip.is_visible());
    }

    #[test]
    fn show_and_hide_toggle_visibility() {
        let mut tooltip = Tooltip::default();
        tooltip.show();
        assert!(tooltip.is_visible());
        tooltip.hide();
        assert!(!tooltip.is_visible());
    }

    #[test]
    fn placement_is_preserved() {
        let placement = Placement {
            horizontal_position: HorizontalPosition::Left,
            horizontal_align: HorizontalAlign::Right,
            vertical_position: VerticalPosition::Top,
        };
        assert_eq!(Tooltip::new(placement).placement(), placement);
    }
}
