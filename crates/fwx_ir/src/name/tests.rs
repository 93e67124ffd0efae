use super::*;
use pretty_assertions::assert_eq;
use std::collections::HashMap;

#[test]
fn test_intern_is_stable() {
    let a = Name::intern("forwarded");
    let b = Name::from("forwarded");
    assert_eq!(a, b);
    assert_eq!(a.as_str(), "forwarded");
}

#[test]
fn test_distinct_strings_distinct_names() {
    assert_ne!(Name::intern("m1"), Name::intern("mm1"));
}

#[test]
fn test_empty_name() {
    assert_eq!(Name::intern(""), Name::EMPTY);
    assert_eq!(Name::EMPTY.as_str(), "");
}

#[test]
fn test_display_and_debug() {
    let name = Name::intern("rec");
    assert_eq!(format!("{name}"), "rec");
    assert_eq!(format!("{name:?}"), ":rec");
}

#[test]
fn test_name_as_hashmap_key() {
    let mut map: HashMap<Name, u32> = HashMap::new();
    map.insert(Name::intern("a"), 1);
    map.insert(Name::intern("b"), 2);

    assert_eq!(map.get(&Name::intern("a")), Some(&1));
    assert_eq!(map.get(&Name::intern("b")), Some(&2));
    assert_eq!(map.get(&Name::intern("c")), None);
}

#[test]
fn test_shard_and_local_roundtrip() {
    let name = Name::new(3, 42);
    assert_eq!(name.shard(), 3);
    assert_eq!(name.local(), 42);
}
