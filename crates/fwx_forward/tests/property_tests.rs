//! Property-based tests for forwarding setup.
//!
//! Over generated method names, verify:
//! 1. Bulk setup never installs the excluded identity primitives
//! 2. Bulk setup installs exactly the other requested names
//! 3. Renamed setup installs only the exposed name

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use std::collections::BTreeSet;

use fwx_forward::{ForwardConfig, Forwarding};
use fwx_object::{send, Arity, Name, TypeRef, Value};
use proptest::prelude::*;

// -- Strategies --

fn method_name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9_]{0,10}").expect("valid regex")
}

/// Names mixed with the excluded primitives.
fn bulk_names_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop_oneof![
            4 => method_name_strategy(),
            1 => Just("__send__".to_string()),
            1 => Just("__id__".to_string()),
        ],
        0..12,
    )
}

fn excluded() -> [Name; 2] {
    [Name::intern("__send__"), Name::intern("__id__")]
}

proptest! {
    #[test]
    fn bulk_setup_skips_exclusions(names in bulk_names_strategy()) {
        let ty = TypeRef::new("Bulk");
        Forwarding::global()
            .forward_all(&ty, "rec", names.iter().map(String::as_str))
            .unwrap();

        for name in excluded() {
            prop_assert!(!ty.methods().contains(name));
        }

        let expected: BTreeSet<&str> = names
            .iter()
            .map(String::as_str)
            .filter(|n| !matches!(*n, "__send__" | "__id__"))
            .collect();
        let installed: BTreeSet<&str> = ty
            .methods()
            .names()
            .into_iter()
            .map(|n| n.as_str())
            .collect();
        prop_assert_eq!(installed, expected);
    }

    #[test]
    fn keyed_bulk_setup_skips_exclusions(names in bulk_names_strategy()) {
        let ty = TypeRef::new("KeyedBulk");
        Forwarding::global()
            .forward_as_key_all(&ty, "table", names.iter().map(String::as_str))
            .unwrap();

        for name in excluded() {
            prop_assert!(!ty.methods().contains(name));
        }
    }

    #[test]
    fn cleared_exclusions_install_everything(names in bulk_names_strategy()) {
        let ty = TypeRef::new("Unfiltered");
        let engine = Forwarding::new(ForwardConfig::builder().clear_exclusions().build());
        engine
            .forward_all(&ty, "rec", names.iter().map(String::as_str))
            .unwrap();

        let expected: BTreeSet<&str> = names.iter().map(String::as_str).collect();
        prop_assert_eq!(ty.methods().len(), expected.len());
    }

    #[test]
    fn rename_installs_only_exposed_name(
        method in method_name_strategy(),
        exposed in method_name_strategy(),
    ) {
        prop_assume!(method != exposed);

        let target = TypeRef::new("Target");
        let label = Value::string(method.clone());
        target.define_method(method.as_str(), Arity::AtLeast(0), move |_, _, _| {
            Ok(label.clone())
        });

        let ty = TypeRef::new("Renamer");
        Forwarding::global()
            .forward_as(&ty, target.new_instance(), method.as_str(), exposed.as_str())
            .unwrap();

        prop_assert_eq!(ty.methods().names(), vec![Name::intern(&exposed)]);
        let result = send(&Value::from(ty.new_instance()), Name::intern(&exposed), &[], None);
        prop_assert_eq!(result.ok(), Some(Value::string(method.clone())));
    }
}
