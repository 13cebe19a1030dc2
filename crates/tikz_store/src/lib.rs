//! TikZ Store - persistence, TikZ export and settings
//!
//! Documents are saved as JSON keyed by node and path ids and exported as
//! a `tikzpicture` environment. Both directions walk the document with a
//! [`tikz_model::Visitor`].

mod deserializer;
mod error;
mod file_io;
mod format;
mod serializer;
mod settings;
mod tikz_export;

pub use deserializer::*;
pub use error::*;
pub use file_io::*;
pub use format::*;
pub use serializer::*;
pub use settings::*;
pub use tikz_export::*;
