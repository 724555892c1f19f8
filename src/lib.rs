pub mod core;
pub mod terminal;
pub mod ui;
pub mod widgets;

pub use crate::core::NodeId;
pub use crate::core::config::{ColumnKind, ColumnSpec, PickerConfig, PickerSetup};
pub use crate::core::error::PickerError;
pub use crate::core::value::Value;
pub use crate::terminal::pointer;
pub use crate::terminal::terminal_event;
pub use crate::ui::span;
pub use crate::ui::style;
pub use crate::widgets::components::wheel_picker;
pub use crate::widgets::components::wheel_picker::WheelPicker;
pub use crate::widgets::shared::calendar;
pub use crate::widgets::traits::{
    Drawable, InteractionResult, Interactive, RenderContext, WidgetAction,
};
