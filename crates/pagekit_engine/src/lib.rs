//! Pagekit engine: document model, virtual event loop and effect execution.
mod document;
mod event_loop;
mod observer;
mod page;
mod render;
mod submit;

pub use document::{Document, DocumentError, Viewport};
pub use event_loop::FRAME_INTERVAL_MS;
pub use observer::{IntersectionEntry, VisibilityObserver};
pub use page::Page;
pub use render::{
    CLASS_ACTIVE, CLASS_NOTIFICATION, CLASS_NOTIFICATION_CLOSE, CLASS_REVEALED,
    CLASS_REVEAL_PENDING, CLASS_RIPPLE,
};
pub use submit::{SimulatedSubmitter, Submitter};
