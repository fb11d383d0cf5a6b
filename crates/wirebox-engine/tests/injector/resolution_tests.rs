//! Resolution and memoization tests

use crate::test_utils::{EventLog, Tracked, init_tracing};
use std::cell::RefCell;
use wirebox_domain::{ComponentId, Dep};
use wirebox_engine::{Binding, Injectable, InjectorBuilder};

thread_local! {
    static CONSTRUCTED: RefCell<Vec<&'static str>> = const { RefCell::new(Vec::new()) };
}

fn record(name: &'static str) {
    CONSTRUCTED.with_borrow_mut(|log| log.push(name));
}

fn constructed() -> Vec<&'static str> {
    CONSTRUCTED.with_borrow(Clone::clone)
}

fn reset() {
    CONSTRUCTED.with_borrow_mut(Vec::clear);
}

// ============================================================================
// A / B / I fixtures
// ============================================================================

struct A;

impl Injectable for A {
    type Deps = ();

    fn inject((): ()) -> Self {
        record("A");
        Self
    }
}

struct B {
    a: Dep<A>,
}

impl Injectable for B {
    type Deps = (Dep<A>,);

    fn inject((a,): Self::Deps) -> Self {
        record("B");
        Self { a }
    }
}

trait I {
    fn describe(&self) -> &'static str;
}

impl I for B {
    fn describe(&self) -> &'static str {
        "B over A"
    }
}

fn b_as_i(b: &B) -> &dyn I {
    b
}

// ============================================================================
// Multi-interface fixtures
// ============================================================================

trait Reader {
    fn read(&self) -> String;
}

trait Writer {
    fn write(&self, line: &str) -> String;
}

struct File {
    path: String,
}

impl Reader for File {
    fn read(&self) -> String {
        format!("read {}", self.path)
    }
}

impl Writer for File {
    fn write(&self, line: &str) -> String {
        format!("{line} -> {}", self.path)
    }
}

fn file_as_reader(file: &File) -> &dyn Reader {
    file
}

fn file_as_writer(file: &File) -> &dyn Writer {
    file
}

struct Primary;
struct Replica;

#[test]
fn test_a_b_i_scenario_constructs_each_component_once() {
    init_tracing();
    reset();
    let injector = InjectorBuilder::new()
        .register(Binding::constructor::<A>())
        .register(Binding::constructor::<B>())
        .register(Binding::interface::<dyn I, B>(b_as_i))
        .build()
        .unwrap();
    assert!(constructed().is_empty());

    let i = injector.get::<dyn I>().unwrap();
    assert_eq!(i.describe(), "B over A");
    assert_eq!(constructed(), vec!["A", "B"]);

    let again = injector.get::<dyn I>().unwrap();
    let b = injector.get::<B>().unwrap();
    let a = injector.get::<A>().unwrap();
    assert!(std::ptr::addr_eq(i, again));
    assert!(std::ptr::addr_eq(i, b));
    assert!(std::ptr::eq(&*b.a, a));
    assert_eq!(constructed(), vec!["A", "B"]);
}

#[test]
fn test_memoized_component_keeps_its_address() {
    reset();
    let injector = InjectorBuilder::new()
        .register(Binding::constructor::<A>())
        .build()
        .unwrap();

    let first = injector.get_pointer::<A>().unwrap();
    let second = injector.get_pointer::<A>().unwrap();
    assert_eq!(first, second);
    assert_eq!(constructed(), vec!["A"]);
}

#[test]
fn test_dependencies_are_constructed_left_to_right() {
    struct Left(Tracked);
    struct Right(Tracked);
    struct Top {
        _left: Dep<Left>,
        _right: Dep<Right>,
        _tracked: Tracked,
    }

    let log = EventLog::new();
    let (l, r, t) = (log.clone(), log.clone(), log.clone());
    let injector = InjectorBuilder::new()
        .register(Binding::factory(move |(left, right): (Dep<Left>, Dep<Right>)| Top {
            _left: left,
            _right: right,
            _tracked: Tracked::new("top", &t),
        }))
        .register(Binding::factory(move |(): ()| Right(Tracked::new("right", &r))))
        .register(Binding::factory(move |(): ()| Left(Tracked::new("left", &l))))
        .build()
        .unwrap();

    injector.get::<Top>().unwrap();
    assert_eq!(log.with_prefix("new:"), vec!["left", "right", "top"]);
}

#[test]
fn test_one_concrete_behind_several_interfaces() {
    let injector = InjectorBuilder::new()
        .register(Binding::factory(|(): ()| File {
            path: "/tmp/journal".to_owned(),
        }))
        .register(Binding::interface::<dyn Reader, File>(file_as_reader))
        .register(Binding::interface::<dyn Writer, File>(file_as_writer))
        .build()
        .unwrap();

    let writer = injector.get::<dyn Writer>().unwrap();
    let reader = injector.get::<dyn Reader>().unwrap();
    let file = injector.get::<File>().unwrap();

    assert_eq!(reader.read(), "read /tmp/journal");
    assert_eq!(writer.write("entry"), "entry -> /tmp/journal");
    assert!(std::ptr::addr_eq(reader, file));
    assert!(std::ptr::addr_eq(writer, file));
    assert_eq!(injector.stats().placed, 1);
}

#[test]
fn test_interface_adapter_may_be_a_closure() {
    let injector = InjectorBuilder::new()
        .register(Binding::factory(|(): ()| File {
            path: "/var/log/app".to_owned(),
        }))
        .register(Binding::interface::<dyn Reader, File>(|file| file))
        .build()
        .unwrap();

    let reader = injector.get::<dyn Reader>().unwrap();
    assert_eq!(reader.read(), "read /var/log/app");
    assert!(std::ptr::addr_eq(reader, injector.get::<File>().unwrap()));
}

#[test]
fn test_instance_binding_returns_the_callers_object() {
    let log = EventLog::new();
    let external = Tracked::new("external", &log);
    {
        let injector = InjectorBuilder::new()
            .register(Binding::instance(&external))
            .build()
            .unwrap();
        let bound = injector.get::<Tracked>().unwrap();
        assert!(std::ptr::eq(bound, &external));
        assert_eq!(injector.stats().arena_capacity, 0);
    }
    assert_eq!(log.events(), vec!["new:external"]);
}

#[test]
fn test_instance_binding_of_trait_object() {
    let file = File {
        path: "/etc/hosts".to_owned(),
    };
    let injector = InjectorBuilder::new()
        .register(Binding::instance::<dyn Reader>(&file))
        .build()
        .unwrap();

    assert_eq!(injector.get::<dyn Reader>().unwrap().read(), "read /etc/hosts");
}

#[test]
fn test_get_cloned_copies_the_component() {
    let injector = InjectorBuilder::new()
        .register(Binding::factory(|(): ()| String::from("shared")))
        .build()
        .unwrap();

    let mut copy = injector.get_cloned::<String>().unwrap();
    copy.push_str(" and changed");
    assert_eq!(injector.get::<String>().unwrap(), "shared");
}

#[test]
fn test_annotated_bindings_are_distinct_components() {
    let injector = InjectorBuilder::new()
        .register(Binding::factory(|(): ()| 8080_u16))
        .register(Binding::factory(|(): ()| 5432_u16).annotated::<Primary>())
        .register(Binding::factory(|(): ()| 5433_u16).annotated::<Replica>())
        .build()
        .unwrap();

    assert_eq!(*injector.get::<u16>().unwrap(), 8080);
    assert_eq!(*injector.get_annotated::<Primary, u16>().unwrap(), 5432);
    assert_eq!(*injector.get_annotated::<Replica, u16>().unwrap(), 5433);
    assert_eq!(
        *injector
            .get_by_id::<u16>(ComponentId::annotated::<Replica, u16>())
            .unwrap(),
        5433
    );
}

#[test]
fn test_qualified_dependency_and_interface_target() {
    struct Pool {
        port: u16,
    }

    impl Reader for Pool {
        fn read(&self) -> String {
            format!("port {}", self.port)
        }
    }

    fn pool_as_reader(pool: &Pool) -> &dyn Reader {
        pool
    }

    struct Service {
        primary: Dep<Pool, Primary>,
        replica: Dep<dyn Reader, Replica>,
    }

    let injector = InjectorBuilder::new()
        .register(Binding::factory(|(): ()| Pool { port: 1 }).annotated::<Primary>())
        .register(Binding::factory(|(): ()| Pool { port: 2 }).annotated::<Replica>())
        .register(
            Binding::interface_to::<dyn Reader, Pool>(
                ComponentId::annotated::<Replica, Pool>(),
                pool_as_reader,
            )
            .annotated::<Replica>(),
        )
        .register(Binding::factory(
            |(primary, replica): (Dep<Pool, Primary>, Dep<dyn Reader, Replica>)| Service {
                primary,
                replica,
            },
        ))
        .build()
        .unwrap();

    let service = injector.get::<Service>().unwrap();
    assert_eq!(service.primary.port, 1);
    assert_eq!(service.replica.read(), "port 2");
}

#[test]
fn test_find_distinguishes_unbound_from_bound() {
    let injector = InjectorBuilder::new()
        .register(Binding::factory(|(): ()| 3_i64))
        .build()
        .unwrap();

    assert!(injector.find::<String>().unwrap().is_none());
    assert_eq!(injector.find::<i64>().unwrap(), Some(&3));
}

#[test]
fn test_provider_defers_construction() {
    reset();
    let injector = InjectorBuilder::new()
        .register(Binding::constructor::<A>())
        .register(Binding::constructor::<B>())
        .build()
        .unwrap();

    let provider = injector.provider::<B>().unwrap();
    assert!(constructed().is_empty());

    let first = provider.get().unwrap();
    let second = provider.clone().get().unwrap();
    assert!(std::ptr::eq(first, second));
    assert_eq!(constructed(), vec!["A", "B"]);
}

#[test]
fn test_resolve_all_constructs_everything() {
    reset();
    let injector = InjectorBuilder::new()
        .register(Binding::constructor::<A>())
        .register(Binding::constructor::<B>())
        .register(Binding::interface::<dyn I, B>(b_as_i))
        .build()
        .unwrap();

    let before = injector.stats();
    assert_eq!(before.bindings, 3);
    assert_eq!(before.constructed, 0);

    injector.resolve_all().unwrap();
    let after = injector.stats();
    assert_eq!(after.constructed, 3);
    assert_eq!(after.placed, 2);
    assert!(after.arena_used <= after.arena_capacity);
    assert_eq!(constructed(), vec!["A", "B"]);
}

#[test]
fn test_stats_count_instances_as_constructed() {
    let value = 1_u8;
    let injector = InjectorBuilder::new()
        .register(Binding::instance(&value))
        .register(Binding::factory(|(): ()| 2_u16))
        .build()
        .unwrap();

    let stats = injector.stats();
    assert_eq!(stats.bindings, 2);
    assert_eq!(stats.constructed, 1);
    assert_eq!(stats.placed, 0);
}
