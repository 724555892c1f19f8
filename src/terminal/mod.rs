pub mod pointer;
pub mod terminal;
pub mod terminal_event;

pub use pointer::{PointerEvent, PointerPhase, PointerTracker};
pub use terminal::Terminal;
pub use terminal_event::{KeyCode, KeyEvent, MouseEvent, MouseKind, TerminalEvent};
