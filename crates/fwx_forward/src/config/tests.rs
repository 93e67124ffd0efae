use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_defaults() {
    let config = ForwardConfig::default();
    assert_eq!(config.class_marker().as_str(), "class");
    assert_eq!(config.identity_marker().as_str(), "identity");
    assert_eq!(config.key_method().as_str(), "get");
    assert!(config.is_excluded(Name::intern("__send__")));
    assert!(config.is_excluded(Name::intern("__id__")));
    assert!(!config.is_excluded(Name::intern("m1")));
}

#[test]
fn test_shared_default_matches_default() {
    assert_eq!(ForwardConfig::shared_default(), &ForwardConfig::default());
}

#[test]
fn test_builder_overrides() {
    let config = ForwardConfig::builder()
        .class_marker("type")
        .identity_marker("self")
        .key_method("[]")
        .build();

    assert_eq!(config.class_marker(), Name::intern("type"));
    assert_eq!(config.identity_marker(), Name::intern("self"));
    assert_eq!(config.key_method(), Name::intern("[]"));
    assert_eq!(config.excluded().len(), 2);
}

#[test]
fn test_builder_exclusions() {
    let config = ForwardConfig::builder()
        .clear_exclusions()
        .exclude("secret")
        .exclude("secret")
        .build();

    assert_eq!(config.excluded(), &[Name::intern("secret")]);
    assert!(!config.is_excluded(Name::intern("__send__")));
}
