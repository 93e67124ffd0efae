//! Message dispatch.
//!
//! [`send`] resolves a method name against a receiver in this order:
//!
//! 1. User-defined methods: an instance's own table, then its type's
//!    ancestor chain; for a type value, the type-level tables.
//! 2. Built-ins (`__send__`, `__id__`, `class`, `respond_to?`, and the
//!    lookup/length/call primitives of maps, lists, strings and procs).
//! 3. A user-defined `method_missing`, called with the method name as a
//!    symbol followed by the original arguments.
//!
//! Anything left over is a `no method` error naming the receiver's type.

use std::sync::LazyLock;

use fwx_ir::Name;

use crate::errors::{key_not_found, no_such_method, type_mismatch, wrong_arg_count};
use crate::method_table::Method;
use crate::stack::{ensure_sufficient_stack, SendFrame};
use crate::{EvalError, EvalResult, ProcValue, Value};

/// Pre-interned names of the built-in methods.
struct BuiltinNames {
    send: Name,
    id: Name,
    class: Name,
    respond_to: Name,
    method_missing: Name,
    get: Name,
    index: Name,
    fetch: Name,
    len: Name,
    call: Name,
}

static NAMES: LazyLock<BuiltinNames> = LazyLock::new(|| BuiltinNames {
    send: Name::intern("__send__"),
    id: Name::intern("__id__"),
    class: Name::intern("class"),
    respond_to: Name::intern("respond_to?"),
    method_missing: Name::intern("method_missing"),
    get: Name::intern("get"),
    index: Name::intern("[]"),
    fetch: Name::intern("fetch"),
    len: Name::intern("len"),
    call: Name::intern("call"),
});

/// Built-in method selected for a receiver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Builtin {
    Send,
    Id,
    Class,
    RespondTo,
    Get,
    Fetch,
    Len,
    Call,
}

/// Send `method` to `receiver` with `args` and an optional trailing block.
///
/// Errors raised by the invoked method propagate unchanged. A send nested
/// deeper than [`max_send_depth`](crate::max_send_depth) fails with
/// `StackOverflow` instead of running.
pub fn send(
    receiver: &Value,
    method: Name,
    args: &[Value],
    block: Option<&ProcValue>,
) -> EvalResult {
    let _frame = SendFrame::enter()?;
    tracing::trace!(
        %method,
        receiver = %receiver.type_name(),
        argc = args.len(),
        block = block.is_some(),
        "send"
    );
    ensure_sufficient_stack(|| dispatch(receiver, method, args, block))
}

fn dispatch(
    receiver: &Value,
    method: Name,
    args: &[Value],
    block: Option<&ProcValue>,
) -> EvalResult {
    if let Some(user_method) = find_user_method(receiver, method) {
        return user_method.invoke(receiver, args, block);
    }

    if let Some(builtin) = resolve_builtin(receiver, method) {
        return eval_builtin(builtin, receiver, method, args, block);
    }

    if let Some(hook) = find_user_method(receiver, NAMES.method_missing) {
        let mut hook_args = Vec::with_capacity(args.len() + 1);
        hook_args.push(Value::Symbol(method));
        hook_args.extend_from_slice(args);
        return hook.invoke(receiver, &hook_args, block);
    }

    Err(no_such_method(method.as_str(), &receiver.type_name()))
}

/// Find a user-defined method without considering built-ins or `method_missing`.
pub fn find_user_method(receiver: &Value, name: Name) -> Option<Method> {
    match receiver {
        Value::Object(obj) => obj.find_method(name),
        Value::Type(ty) => ty.find_type_method(name),
        _ => None,
    }
}

/// Whether `receiver` understands `name` directly (`method_missing` excluded).
pub fn respond_to(receiver: &Value, name: Name) -> bool {
    find_user_method(receiver, name).is_some() || resolve_builtin(receiver, name).is_some()
}

fn resolve_builtin(receiver: &Value, name: Name) -> Option<Builtin> {
    let n = &*NAMES;
    let builtin = if name == n.send {
        Builtin::Send
    } else if name == n.id && receiver.object_id().is_some() {
        Builtin::Id
    } else if name == n.class && matches!(receiver, Value::Object(_)) {
        Builtin::Class
    } else if name == n.respond_to {
        Builtin::RespondTo
    } else if (name == n.get || name == n.index)
        && matches!(receiver, Value::Map(_) | Value::List(_))
    {
        Builtin::Get
    } else if name == n.fetch && matches!(receiver, Value::Map(_)) {
        Builtin::Fetch
    } else if name == n.len && matches!(receiver, Value::Map(_) | Value::List(_) | Value::Str(_)) {
        Builtin::Len
    } else if name == n.call && matches!(receiver, Value::Proc(_)) {
        Builtin::Call
    } else {
        return None;
    };
    Some(builtin)
}

fn eval_builtin(
    builtin: Builtin,
    receiver: &Value,
    method: Name,
    args: &[Value],
    block: Option<&ProcValue>,
) -> EvalResult {
    match builtin {
        Builtin::Send => {
            let (target, rest) = args
                .split_first()
                .ok_or_else(|| wrong_arg_count(method.as_str(), 1, 0))?;
            let target_name = expect_name(target)?;
            send(receiver, target_name, rest, block)
        }
        Builtin::Id => {
            expect_args(method, 0, args)?;
            let id = receiver
                .object_id()
                .ok_or_else(|| no_such_method(method.as_str(), &receiver.type_name()))?;
            Ok(Value::int(i64::from_ne_bytes(id.to_ne_bytes())))
        }
        Builtin::Class => {
            expect_args(method, 0, args)?;
            receiver
                .class_of()
                .map(|ty| Value::Type(ty.clone()))
                .ok_or_else(|| no_such_method(method.as_str(), &receiver.type_name()))
        }
        Builtin::RespondTo => {
            expect_args(method, 1, args)?;
            let queried = expect_name(&args[0])?;
            Ok(Value::Bool(respond_to(receiver, queried)))
        }
        Builtin::Get => {
            expect_args(method, 1, args)?;
            lookup_entry(receiver, &args[0]).map(|entry| entry.unwrap_or(Value::Nil))
        }
        Builtin::Fetch => {
            expect_args(method, 1, args)?;
            lookup_entry(receiver, &args[0])?
                .ok_or_else(|| key_not_found(&args[0].display_value()))
        }
        Builtin::Len => {
            expect_args(method, 0, args)?;
            let len = match receiver {
                Value::Map(map) => map.len(),
                Value::List(items) => items.len(),
                Value::Str(s) => s.chars().count(),
                _ => return Err(no_such_method(method.as_str(), &receiver.type_name())),
            };
            Ok(Value::int(i64::try_from(len).unwrap_or(i64::MAX)))
        }
        Builtin::Call => match receiver {
            Value::Proc(p) => p.call(args),
            _ => Err(no_such_method(method.as_str(), &receiver.type_name())),
        },
    }
}

/// Keyed lookup on a map (symbol or string key) or a list (integer index,
/// negative counts from the end). `Ok(None)` means the entry is absent.
fn lookup_entry(receiver: &Value, key: &Value) -> Result<Option<Value>, EvalError> {
    match receiver {
        Value::Map(map) => Ok(key.as_name().and_then(|k| map.get(&k).cloned())),
        Value::List(items) => {
            let index = key
                .as_int()
                .ok_or_else(|| type_mismatch("int", &key.type_name()))?;
            let position = if index < 0 {
                usize::try_from(index.unsigned_abs())
                    .ok()
                    .and_then(|back| items.len().checked_sub(back))
            } else {
                usize::try_from(index).ok()
            };
            Ok(position.and_then(|i| items.get(i).cloned()))
        }
        _ => Err(type_mismatch("map or list", &receiver.type_name())),
    }
}

fn expect_args(method: Name, expected: usize, args: &[Value]) -> Result<(), EvalError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(wrong_arg_count(method.as_str(), expected, args.len()))
    }
}

fn expect_name(value: &Value) -> Result<Name, EvalError> {
    value
        .as_name()
        .ok_or_else(|| type_mismatch("symbol or str", &value.type_name()))
}
