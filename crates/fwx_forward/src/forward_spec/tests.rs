use super::*;
use fwx_object::{ProcValue, TypeRef};
use pretty_assertions::assert_eq;

fn name(s: &str) -> Name {
    Name::intern(s)
}

/// Type with a `delegate` field holding an object whose `echo` returns
/// its arguments as a list.
fn forwarder_with_delegate() -> (TypeRef, Value) {
    let target_ty = TypeRef::new("Target");
    target_ty.define_method("echo", Arity::AtLeast(0), |_, args, _| {
        Ok(Value::list(args.to_vec()))
    });

    let ty = TypeRef::new("Forwarder");
    let obj = ty.new_instance();
    obj.set_field("delegate", Value::from(target_ty.new_instance()));
    (ty, Value::from(obj))
}

#[test]
fn test_into_method_is_variadic_and_named() {
    let spec = ForwardSpec::new(ReceiverSpec::Identity, name("len"), name("size"));
    let method = spec.into_method();
    assert_eq!(method.name(), name("size"));
    assert_eq!(method.arity(), Arity::AtLeast(0));
}

#[test]
fn test_forwards_arguments_unchanged() {
    let (_, this) = forwarder_with_delegate();
    let method =
        ForwardSpec::new(ReceiverSpec::Named(name("delegate")), name("echo"), name("e"))
            .into_method();

    let result = method.invoke(&this, &[Value::int(1), Value::int(2)], None);
    assert_eq!(result.ok(), Some(Value::list(vec![Value::int(1), Value::int(2)])));
}

#[test]
fn test_keyed_prepends_key() {
    let (_, this) = forwarder_with_delegate();
    let method = ForwardSpec::keyed(
        ReceiverSpec::Named(name("delegate")),
        name("echo"),
        Value::symbol("a"),
        name("a"),
    )
    .into_method();

    let result = method.invoke(&this, &[Value::int(9)], None);
    assert_eq!(
        result.ok(),
        Some(Value::list(vec![Value::symbol("a"), Value::int(9)]))
    );
}

#[test]
fn test_keyed_spec_reads_table() {
    let ty = TypeRef::new("Keyed");
    let obj = ty.new_instance();
    obj.set_field("table", Value::map([("a", Value::int(1))]));
    let method = ForwardSpec::keyed(
        ReceiverSpec::Named(name("table")),
        name("get"),
        Value::symbol("a"),
        name("b"),
    )
    .into_method();

    assert_eq!(method.invoke(&Value::from(obj), &[], None).ok(), Some(Value::int(1)));
}

#[test]
fn test_receiver_resolved_per_call() {
    let (_, this) = forwarder_with_delegate();
    let method = ForwardSpec::new(ReceiverSpec::Named(name("delegate")), name("len"), name("l"))
        .into_method();

    let obj = this.as_object().cloned();
    if let Some(obj) = &obj {
        obj.set_field("delegate", Value::string("abc"));
    }
    assert_eq!(method.invoke(&this, &[], None).ok(), Some(Value::int(3)));

    if let Some(obj) = &obj {
        obj.set_field("delegate", Value::list(vec![Value::Nil]));
    }
    assert_eq!(method.invoke(&this, &[], None).ok(), Some(Value::int(1)));
}

#[test]
fn test_block_is_passed_through() {
    let target_ty = TypeRef::new("Yielder");
    target_ty.define_method("each", Arity::Exact(0), |_, _, block| match block {
        Some(b) => b.call(&[Value::int(5)]),
        None => Ok(Value::Nil),
    });
    let ty = TypeRef::new("Forwarder");
    let obj = ty.new_instance();
    obj.set_field("items", Value::from(target_ty.new_instance()));

    let method = ForwardSpec::new(ReceiverSpec::Named(name("items")), name("each"), name("each"))
        .into_method();
    let block = ProcValue::new(1, |_, args| {
        Ok(Value::int(args[0].as_int().unwrap_or(0) * 10))
    });

    let result = method.invoke(&Value::from(obj), &[], Some(&block));
    assert_eq!(result.ok(), Some(Value::int(50)));
}

#[test]
fn test_receiver_failure_propagates() {
    let ty = TypeRef::new("Forwarder");
    let this = Value::from(ty.new_instance());
    let method = ForwardSpec::new(ReceiverSpec::Named(name("missing")), name("zz"), name("zz"))
        .into_method();

    let err = method.invoke(&this, &[], None).err().map(|e| e.to_string());
    assert_eq!(err, Some("no method 'zz' on type nil".to_string()));
}

#[test]
fn test_install_defines_on_target() {
    let (ty, this) = forwarder_with_delegate();
    ForwardSpec::new(ReceiverSpec::Named(name("delegate")), name("echo"), name("fwd"))
        .install(&InstallTarget::Type(ty.clone()));

    assert!(ty.methods().contains(name("fwd")));
    let result = send(&this, name("fwd"), &[Value::int(3)], None);
    assert_eq!(result.ok(), Some(Value::list(vec![Value::int(3)])));
}

#[test]
fn test_keyed_forwarder_with_caller_arguments_through_send() {
    let (ty, this) = forwarder_with_delegate();
    ForwardSpec::keyed(
        ReceiverSpec::Named(name("delegate")),
        name("echo"),
        Value::symbol("k"),
        name("keyed_echo"),
    )
    .install(&InstallTarget::Type(ty));

    let result = send(
        &this,
        name("keyed_echo"),
        &[Value::int(1), Value::string("two"), Value::Nil],
        None,
    );
    assert_eq!(
        result.ok(),
        Some(Value::list(vec![
            Value::symbol("k"),
            Value::int(1),
            Value::string("two"),
            Value::Nil,
        ]))
    );
}
