//! Fwx IR - Interned identifiers for the forwardx object model.
//!
//! Every method name, field name, symbol and map key in the object model is a
//! [`Name`]: a 32-bit handle into a sharded, process-wide [`StringInterner`].
//! Interned strings are never freed, so a `Name` can hand out `&'static str`.

mod interner;
mod name;

pub use interner::{global_interner, InternError, StringInterner};
pub use name::Name;
