use thiserror::Error;

use crate::model::{InputModality, WindowId};

/// Reasons a window-manager step was skipped.
///
/// These never reach façade callers; [`crate::WindowManager`] logs them and carries on.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WmError {
    /// The id was never registered.
    #[error("window `{0}` is not registered")]
    UnknownWindow(WindowId),
    /// The window exists but is not open.
    #[error("window `{0}` is not open")]
    WindowClosed(WindowId),
    /// A drag could not start.
    #[error("drag rejected for {modality:?}: {reason}")]
    DragRejected {
        /// Input device that pressed.
        modality: InputModality,
        /// Why the drag did not arm.
        reason: &'static str,
    },
}
