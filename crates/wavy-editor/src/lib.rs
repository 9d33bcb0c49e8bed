pub mod animation;
pub mod config;
pub mod drag;
pub mod editor;
pub mod export;
pub mod input;
pub mod pan;
pub mod shortcuts;

pub use animation::{Animator, Clock, FrameHandle, FrameScheduler, ManualClock, ManualScheduler};
pub use config::EditorConfig;
pub use drag::{DragController, DragState, RingMutation};
pub use editor::{Editor, EditorStats, Optimality};
pub use export::{ExportError, ExportTarget, MemoryExport};
pub use input::{InputEvent, Modifiers};
pub use shortcuts::{ShortcutAction, ShortcutMap};
