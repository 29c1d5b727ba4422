//! Types shared by the dialogs: result codes, message boxes, fixed sizes.

/// How a modal dialog ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogResult {
    /// Completed successfully.
    Accepted,
    /// Closed by the user.
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Information,
    Warning,
}

/// A modal message box to show the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub body: String,
}

impl Notice {
    pub fn information(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Information,
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn warning(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Fixed dialog size in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialogSize {
    pub width: f32,
    pub height: f32,
}

impl DialogSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}
