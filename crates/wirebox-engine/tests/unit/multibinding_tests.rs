//! Unit tests for multibinding descriptors

use wirebox_domain::{ComponentId, Dep};
use wirebox_engine::{BindingKind, Multibinding};

trait Listener {}

struct Console;

impl Listener for Console {}

struct Startup;

#[test]
fn test_instance_contributes_under_its_type() {
    let console = Console;
    let multibinding = Multibinding::instance::<dyn Listener>(&console);

    assert_eq!(multibinding.id(), ComponentId::of::<dyn Listener>());
    assert_eq!(multibinding.kind(), BindingKind::Instance);
    assert!(multibinding.dependencies().is_empty());
}

#[test]
fn test_factory_records_dependencies() {
    let multibinding = Multibinding::factory(|(level,): (Dep<u8>,)| u32::from(*level));

    assert_eq!(multibinding.id(), ComponentId::of::<u32>());
    assert_eq!(multibinding.kind(), BindingKind::Factory);
    assert_eq!(multibinding.dependencies(), [ComponentId::of::<u8>()]);
}

#[test]
fn test_annotated_boxed_factory() {
    let multibinding = Multibinding::boxed_factory(|(): ()| -> Option<Box<dyn Listener>> {
        Some(Box::new(Console))
    })
    .annotated::<Startup>();

    assert_eq!(multibinding.id(), ComponentId::annotated::<Startup, dyn Listener>());
    assert_eq!(multibinding.kind(), BindingKind::BoxedFactory);
    assert!(format!("{multibinding:?}").contains("BoxedFactory"));
}
