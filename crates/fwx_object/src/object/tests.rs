use super::*;
use pretty_assertions::assert_eq;

fn returns(
    s: &'static str,
) -> impl Fn(&Value, &[Value], Option<&ProcValue>) -> EvalResult + Send + Sync + 'static {
    move |_, _, _| Ok(Value::string(s))
}

fn call(method: Option<Method>, this: &Value) -> Option<EvalResult> {
    method.map(|m| m.invoke(this, &[], None))
}

#[test]
fn test_instance_method_inherited() {
    let base = TypeRef::new("Base");
    base.define_method("greet", Arity::Exact(0), returns("base"));
    let derived = base.subclass("Derived");

    let obj = derived.new_instance();
    let this = Value::from(obj.clone());
    assert_eq!(
        call(obj.find_method(Name::intern("greet")), &this),
        Some(Ok(Value::string("base")))
    );
}

#[test]
fn test_subclass_override_wins() {
    let base = TypeRef::new("Base");
    base.define_method("greet", Arity::Exact(0), returns("base"));
    let derived = base.subclass("Derived");
    derived.define_method("greet", Arity::Exact(0), returns("derived"));

    let this = Value::Nil;
    assert_eq!(
        call(derived.find_method(Name::intern("greet")), &this),
        Some(Ok(Value::string("derived")))
    );
    assert_eq!(
        call(base.find_method(Name::intern("greet")), &this),
        Some(Ok(Value::string("base")))
    );
}

#[test]
fn test_type_methods_inherited_and_overridden() {
    let base = TypeRef::new("ClassMethodForwarder");
    base.define_type_method("m", Arity::Exact(0), returns("forwarded"));
    let sub = base.subclass("ClassMethodForwarderA");
    let plain_sub = base.subclass("Plain");
    sub.define_type_method("m", Arity::Exact(0), returns("forwarded to A"));

    let m = Name::intern("m");
    assert_eq!(
        call(sub.find_type_method(m), &Value::Nil),
        Some(Ok(Value::string("forwarded to A")))
    );
    assert_eq!(
        call(plain_sub.find_type_method(m), &Value::Nil),
        Some(Ok(Value::string("forwarded")))
    );
    // Type-level methods are not instance methods.
    assert!(base.find_method(m).is_none());
}

#[test]
fn test_singleton_method_scoped_to_instance() {
    let ty = TypeRef::new("Forwarder");
    let a = ty.new_instance();
    let b = ty.new_instance();
    a.define_singleton_method("only_a", Arity::Exact(0), returns("a"));

    let name = Name::intern("only_a");
    assert!(a.find_method(name).is_some());
    assert!(b.find_method(name).is_none());
    assert!(ty.find_method(name).is_none());
    assert!(ty.methods().is_empty());
}

#[test]
fn test_singleton_method_shadows_type_method() {
    let ty = TypeRef::new("Forwarder");
    ty.define_method("who", Arity::Exact(0), returns("type"));
    let obj = ty.new_instance();
    obj.define_singleton_method("who", Arity::Exact(0), returns("instance"));

    assert_eq!(
        call(obj.find_method(Name::intern("who")), &Value::Nil),
        Some(Ok(Value::string("instance")))
    );
}

#[test]
fn test_fields_default_to_nil() {
    let obj = TypeRef::new("Holder").new_instance();
    let rec = Name::intern("rec");

    assert_eq!(obj.field(rec), Value::Nil);
    assert!(!obj.has_field(rec));

    assert_eq!(obj.set_field("rec", Value::int(1)), None);
    assert_eq!(obj.set_field("rec", Value::int(2)), Some(Value::int(1)));
    assert_eq!(obj.field(rec), Value::int(2));
}

#[test]
fn test_ancestors_order() {
    let a = TypeRef::new("A");
    let b = a.subclass("B");
    let c = b.subclass("C");

    let names: Vec<&str> = c.ancestors().map(|t| t.name().as_str()).collect();
    assert_eq!(names, vec!["C", "B", "A"]);
    assert!(c.is_subtype_of(&a));
    assert!(!a.is_subtype_of(&c));
}

#[test]
fn test_ids_are_unique() {
    let ty = TypeRef::new("T");
    let a = ty.new_instance();
    let b = ty.new_instance();
    assert_ne!(a.id(), b.id());
    assert_ne!(a.id(), ty.id());
    assert_eq!(a.class().name(), Name::intern("T"));
}
