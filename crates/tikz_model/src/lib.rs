//! TikZ Model - document, style and undo model of a TikZ diagram editor
//!
//! A [`Document`] owns nodes and paths. Each of them carries a style that
//! cascades through parent styles to the shared document style and finally
//! to hard-coded defaults. Every edit is recorded on an undo stack and
//! announced to subscribed listeners.

mod color;
mod document;
mod entity;
mod error;
mod events;
mod meta_pos;
mod node;
mod path;
mod property;
mod style;
mod style_edit;
mod transaction;
mod types;
mod uid;
mod undo;
mod value;
mod visitor;

pub use color::*;
pub use document::*;
pub use entity::*;
pub use error::*;
pub use events::{DocumentEvent, ListenerId};
pub use meta_pos::*;
pub use node::*;
pub use path::*;
pub use property::*;
pub use style::*;
pub use style_edit::*;
pub use transaction::*;
pub use types::*;
pub use uid::*;
pub use value::*;
pub use visitor::*;
