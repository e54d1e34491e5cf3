//! Containment for faults raised while rendering a card subtree.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Wraps one card subtree. A fault raised during rendering is caught,
/// logged, and replaced with the fallback view. The flag then stays set
/// until the boundary is recreated, so the faulty subtree is never
/// re-attempted within the boundary's lifetime.
#[derive(Debug, Default)]
pub struct FaultBoundary {
    tripped: bool,
}

impl FaultBoundary {
    pub fn new() -> Self {
        Self { tripped: false }
    }

    pub fn is_tripped(&self) -> bool {
        self.tripped
    }

    /// Renders the wrapped subtree, or the fallback once tripped.
    ///
    /// `ctx` is the drawing context both closures paint into (an
    /// `egui::Ui` in the app). A panic inside `render` trips the boundary
    /// and falls through to `fallback` in the same call; faults raised
    /// outside `render` (fetching, event handling) never reach here.
    pub fn show<C, R>(
        &mut self,
        label: &str,
        ctx: &mut C,
        render: impl FnOnce(&mut C) -> R,
        fallback: impl FnOnce(&mut C) -> R,
    ) -> R {
        if !self.tripped {
            match catch_unwind(AssertUnwindSafe(|| render(ctx))) {
                Ok(rendered) => return rendered,
                Err(payload) => {
                    self.tripped = true;
                    tracing::error!(
                        boundary = label,
                        fault = panic_detail(payload.as_ref()),
                        "render fault contained; boundary switched to fallback view"
                    );
                }
            }
        }
        fallback(ctx)
    }
}

fn panic_detail(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}
