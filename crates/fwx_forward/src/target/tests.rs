use super::*;
use fwx_object::{Arity, Name};
use pretty_assertions::assert_eq;

fn noop(name: &str) -> Method {
    Method::new(name, Arity::AtLeast(0), |_, _, _| Ok(Value::Nil))
}

#[test]
fn test_type_target_installs_shared_method() {
    let ty = TypeRef::new("Forwarder");
    let target = ty.install_target();
    assert!(matches!(target, Ok(InstallTarget::Type(_))));

    if let Ok(target) = target {
        target.install(noop("m1"));
    }
    assert!(ty.methods().contains(Name::intern("m1")));
    assert!(ty.new_instance().find_method(Name::intern("m1")).is_some());
}

#[test]
fn test_instance_target_is_private_to_instance() {
    let ty = TypeRef::new("Forwarder");
    let a = ty.new_instance();
    let b = ty.new_instance();

    if let Ok(target) = a.install_target() {
        target.install(noop("m1"));
    }
    assert!(a.find_method(Name::intern("m1")).is_some());
    assert!(b.find_method(Name::intern("m1")).is_none());
    assert!(ty.methods().is_empty());
}

#[test]
fn test_value_targets() {
    let ty = TypeRef::new("Forwarder");
    assert!(matches!(
        Value::from(ty.clone()).install_target(),
        Ok(InstallTarget::Type(_))
    ));
    assert!(matches!(
        Value::from(ty.new_instance()).install_target(),
        Ok(InstallTarget::Instance(_))
    ));
    assert_eq!(
        Value::int(1).install_target().map_err(|e| e.to_string()).map(|_| ()),
        Err("can't define singleton method on int".to_string())
    );
}

#[test]
fn test_install_replaces_same_name() {
    let ty = TypeRef::new("Forwarder");
    let target = InstallTarget::Type(ty.clone());
    assert!(target.install(noop("m")).is_none());
    assert!(target.install(noop("m")).is_some());
    assert_eq!(ty.methods().len(), 1);
}

#[test]
fn test_display() {
    let ty = TypeRef::new("Shown");
    assert_eq!(InstallTarget::Type(ty).to_string(), "type Shown");
}
