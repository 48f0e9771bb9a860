//! Overmark Editor Library
//!
//! Selection, gestures, and transform orchestration for the Overmark
//! annotation engine: everything between a pointer event and a mutated
//! layer document. Rendering, panels, and host integration stay in the
//! front end.

pub mod clipboard;
pub mod collaborators;
pub mod editor;
pub mod handles;
pub mod repaint;
pub mod selection;
pub mod transform;

pub use clipboard::Clipboard;
pub use collaborators::{
    BoundsProvider, BuiltinTransform, NullBoundsProvider, NullObserver, SelectionObserver,
    TransformProvider,
};
pub use editor::{Editor, Gesture};
pub use handles::{Corner, Edge, Handle, HandleKind};
pub use repaint::RepaintScheduler;
pub use selection::Selection;
