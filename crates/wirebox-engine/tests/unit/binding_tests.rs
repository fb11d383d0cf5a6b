//! Unit tests for binding descriptors

use wirebox_domain::{ComponentId, Dep};
use wirebox_engine::{Binding, BindingKind, Injectable};

struct Engine;

impl Injectable for Engine {
    type Deps = ();

    fn inject((): ()) -> Self {
        Self
    }
}

struct Car {
    _engine: Dep<Engine>,
    _name: Dep<String, Brand>,
}

impl Injectable for Car {
    type Deps = (Dep<Engine>, Dep<String, Brand>);

    fn inject((engine, name): Self::Deps) -> Self {
        Self {
            _engine: engine,
            _name: name,
        }
    }
}

trait Vehicle {}

impl Vehicle for Car {}

fn car_as_vehicle(car: &Car) -> &dyn Vehicle {
    car
}

struct Brand;

#[test]
fn test_constructor_declares_its_dependencies_in_order() {
    let binding = Binding::constructor::<Car>();

    assert_eq!(binding.id(), ComponentId::of::<Car>());
    assert_eq!(binding.kind(), BindingKind::Constructor);
    assert_eq!(
        binding.dependencies(),
        [
            ComponentId::of::<Engine>(),
            ComponentId::annotated::<Brand, String>()
        ]
    );
    assert!(binding.needs_allocation());
}

#[test]
fn test_instance_needs_no_arena_space() {
    let engine = Engine;
    let binding = Binding::instance(&engine);

    assert_eq!(binding.kind(), BindingKind::Instance);
    assert!(binding.dependencies().is_empty());
    assert!(!binding.needs_allocation());
}

#[test]
fn test_boxed_factory_is_owned_outside_the_region() {
    let binding = Binding::boxed_factory(|(_name,): (Dep<String, Brand>,)| {
        Some(Box::new(Engine))
    });

    assert_eq!(binding.id(), ComponentId::of::<Engine>());
    assert_eq!(binding.kind(), BindingKind::BoxedFactory);
    assert_eq!(binding.dependencies(), [ComponentId::annotated::<Brand, String>()]);
    assert!(!binding.needs_allocation());
}

#[test]
fn test_interface_depends_on_its_concrete_type() {
    let binding = Binding::interface::<dyn Vehicle, Car>(car_as_vehicle);

    assert_eq!(binding.id(), ComponentId::of::<dyn Vehicle>());
    assert_eq!(binding.kind(), BindingKind::Interface);
    assert_eq!(binding.dependencies(), [ComponentId::of::<Car>()]);
    assert!(!binding.needs_allocation());
}

#[test]
fn test_annotated_changes_only_the_identifier() {
    let binding = Binding::factory(|(): ()| 5_u8).annotated::<Brand>();

    assert_eq!(binding.id(), ComponentId::annotated::<Brand, u8>());
    assert_eq!(binding.kind(), BindingKind::Factory);
    assert!(binding.needs_allocation());
}

#[test]
fn test_binding_kind_display() {
    assert_eq!(BindingKind::BoxedFactory.to_string(), "boxed factory");
    assert_eq!(BindingKind::Interface.to_string(), "interface");
}

#[test]
fn test_binding_debug_lists_dependencies() {
    let rendered = format!("{:?}", Binding::constructor::<Car>());
    assert!(rendered.contains("Constructor"));
    assert!(rendered.contains("Engine"));
}
