//! Presentational component state for the trellis toolkit.
//!
//! Every type here is a behavioral wrapper: it owns the state and the
//! callback protocol of one widget and leaves rendering, layout, and
//! styling to the host. The animated pieces of the toolkit live in
//! `trellis-core`; these are the quiet ones.

pub mod blur_input;
pub mod button_group;
pub mod drag_target;
pub mod layer;
pub mod modal;
pub mod multi_button_group;
pub mod time_ago;
pub mod tooltip;

pub use blur_input::BlurInput;
pub use button_group::{ButtonGroup, ButtonSpec};
pub use drag_target::DragTarget;
pub use layer::{LayerHandle, LayerId, LayerStack};
pub use modal::{Backdrop, Modal};
pub use multi_button_group::MultiButtonGroup;
pub use time_ago::{format_relative, TimeAgo};
pub use tooltip::{
    HorizontalAlign, HorizontalPosition, Placement, Tooltip, VerticalPosition,
};

// The interval service the refreshing widgets build on.
pub use trellis_core::{set_interval, IntervalRegistration};
