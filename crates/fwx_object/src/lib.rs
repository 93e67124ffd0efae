//! Fwx Object - Dynamic object model for forwardx.
//!
//! This crate provides the host capabilities method forwarding builds on:
//! - Runtime values (`Value`, `ProcValue`, `Heap`)
//! - Types and instances with per-type and per-instance method tables
//!   (`TypeRef`, `ObjectRef`, `MethodTable`, `Method`)
//! - Message dispatch by name with an optional trailing block (`send`)
//! - Per-thread send depth limit (`set_max_send_depth`)
//! - Dispatch errors (`EvalError`, `EvalResult`) and their constructors
//!
//! # Method resolution
//!
//! Methods defined on a single instance shadow methods of its type, which
//! shadow methods of supertypes. Built-ins come after user methods, and
//! `method_missing` is consulted last.

mod dispatch;
pub mod errors;
mod method_table;
mod object;
mod stack;
mod value;

pub use dispatch::{find_user_method, respond_to, send};
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use method_table::{Arity, Method, MethodBody, MethodTable};
pub use object::{Ancestors, Instance, ObjectRef, TypeObject, TypeRef};
pub use stack::{
    ensure_sufficient_stack, max_send_depth, send_depth, set_max_send_depth, DEFAULT_MAX_SEND_DEPTH,
};
pub use value::{Heap, ProcBody, ProcValue, Value};

pub use fwx_ir::Name;
