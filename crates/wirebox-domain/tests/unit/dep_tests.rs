//! Unit tests for dependency handles

use std::ptr::NonNull;
use wirebox_domain::{ComponentId, Dep};

struct Primary;

#[test]
fn test_dep_derefs_to_target() {
    let value = String::from("wired");
    // SAFETY: `value` outlives the handle.
    let dep: Dep<String> = unsafe { Dep::from_raw(NonNull::from(&value)) };

    assert_eq!(dep.len(), 5);
    assert_eq!(&*dep, "wired");
    assert_eq!(dep.as_ptr(), NonNull::from(&value));
}

#[test]
fn test_dep_component_id_includes_qualifier() {
    assert_eq!(Dep::<u32>::component_id(), ComponentId::of::<u32>());
    assert_eq!(
        Dep::<u32, Primary>::component_id(),
        ComponentId::annotated::<Primary, u32>()
    );
}

#[test]
fn test_dep_over_trait_object() {
    let value = 7_u8;
    let as_debug: &dyn std::fmt::Debug = &value;
    // SAFETY: `value` outlives the handle.
    let dep: Dep<dyn std::fmt::Debug> = unsafe { Dep::from_raw(NonNull::from(as_debug)) };

    assert_eq!(format!("{dep:?}"), "Dep(7)");
}
