//! Overmark Core Library
//!
//! Layer data model, hit testing, and document storage for the
//! Overmark annotation engine. Everything here is headless: a canvas
//! front end supplies pointer coordinates and draws whatever the
//! document says.

pub mod document;
pub mod error;
pub mod geometry;
pub mod layers;
pub mod style;

pub use document::LayerDocument;
pub use error::DocumentError;
pub use layers::{Layer, LayerId};
pub use style::{LayerStyle, SerializableColor};
