use crate::core::NodeId;
use crate::core::error::PickerError;
use crate::core::value::Value;
use crate::terminal::pointer::PointerEvent;
use crate::ui::span::SpanLine;

// ---------------------------------------------------------------------------
// Render context & output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    pub focused_id: Option<String>,
}

impl RenderContext {
    pub fn focused(id: impl Into<String>) -> Self {
        Self {
            focused_id: Some(id.into()),
        }
    }

    pub fn is_focused(&self, id: &str) -> bool {
        self.focused_id.as_deref().is_some_and(|focused| focused == id)
    }
}

#[derive(Debug, Clone, Default)]
pub struct DrawOutput {
    pub lines: Vec<SpanLine>,
}

// ---------------------------------------------------------------------------
// Drawable — every node can draw itself
// ---------------------------------------------------------------------------

pub trait Drawable: Send {
    fn id(&self) -> &str;
    fn label(&self) -> &str {
        ""
    }
    fn draw(&self, ctx: &RenderContext) -> DrawOutput;
}

// ---------------------------------------------------------------------------
// Widget actions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ValueChange {
    pub target: NodeId,
    pub value: Value,
}

impl ValueChange {
    pub fn new(target: impl Into<NodeId>, value: Value) -> Self {
        Self {
            target: target.into(),
            value,
        }
    }
}

/// Actions emitted by widgets in `InteractionResult`.
/// These flow upward from widgets to the host.
#[derive(Debug, Clone)]
pub enum WidgetAction {
    ValueChanged { change: ValueChange },
}

// ---------------------------------------------------------------------------
// InteractionResult
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct InteractionResult {
    pub handled: bool,
    pub request_render: bool,
    pub actions: Vec<WidgetAction>,
}

impl InteractionResult {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn consumed() -> Self {
        Self {
            handled: true,
            request_render: false,
            actions: Vec::new(),
        }
    }

    pub fn handled() -> Self {
        Self {
            handled: true,
            request_render: true,
            actions: Vec::new(),
        }
    }

    pub fn with_action(action: WidgetAction) -> Self {
        Self {
            handled: true,
            request_render: true,
            actions: vec![action],
        }
    }

    pub fn merge(&mut self, other: Self) {
        self.handled |= other.handled;
        self.request_render |= other.request_render;
        self.actions.extend(other.actions);
    }
}

// ---------------------------------------------------------------------------
// Interactive — pointer-driven nodes
// ---------------------------------------------------------------------------

pub trait Interactive: Send {
    /// Handles one gesture event. `Inconsistency` errors mean a broken
    /// widget invariant; hosts should treat them as fatal rather than
    /// retry.
    fn on_pointer(&mut self, event: &PointerEvent) -> Result<InteractionResult, PickerError>;

    /// One cooperative animation step, delivered by the host loop.
    fn on_tick(&mut self) -> Result<InteractionResult, PickerError> {
        Ok(InteractionResult::ignored())
    }

    // --- value ---

    fn value(&self) -> Option<Value> {
        None
    }
    fn set_value(&mut self, _value: Value) {}

    // --- validation ---

    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

pub trait InteractiveNode: Drawable + Interactive {}
impl<T> InteractiveNode for T where T: Drawable + Interactive {}
