//! Transient notifications shown after submits, deletes, and failures.
//!
//! DESIGN
//! ======
//! The stack is bounded; pushing past `TOAST_LIMIT` drops the oldest entry.
//! Ids are monotonic so a delayed auto-dismiss never removes a newer toast.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

pub const TOAST_LIMIT: usize = 3;

/// Milliseconds a toast stays visible before auto-dismiss.
pub const TOAST_TTL_MS: u32 = 5_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastVariant {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub variant: ToastVariant,
    pub title: String,
    pub description: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct ToastState {
    next_id: u64,
    pub items: Vec<Toast>,
}

impl ToastState {
    /// Push a toast and return its id.
    pub fn push(&mut self, variant: ToastVariant, title: impl Into<String>, description: Option<String>) -> u64 {
        self.next_id += 1;
        self.items.push(Toast {
            id: self.next_id,
            variant,
            title: title.into(),
            description,
        });
        if self.items.len() > TOAST_LIMIT {
            let excess = self.items.len() - TOAST_LIMIT;
            self.items.drain(..excess);
        }
        self.next_id
    }

    pub fn success(&mut self, title: impl Into<String>) -> u64 {
        self.push(ToastVariant::Success, title, None)
    }

    pub fn error(&mut self, title: impl Into<String>, description: impl Into<String>) -> u64 {
        self.push(ToastVariant::Error, title, Some(description.into()))
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|t| t.id != id);
    }
}
