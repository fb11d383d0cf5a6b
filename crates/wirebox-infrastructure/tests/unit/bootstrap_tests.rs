//! Bootstrap tests

use wirebox_domain::EngineOptions;
use wirebox_engine::Binding;
use wirebox_infrastructure::bootstrap::configured_builder;
use wirebox_infrastructure::config::AppConfig;

#[test]
fn test_configured_builder_carries_engine_options() {
    let mut config = AppConfig::default();
    config.engine = EngineOptions {
        max_resolution_depth: 3,
        contain_teardown_panics: false,
    };

    let injector = configured_builder(&config)
        .register(Binding::factory(|(): ()| 42_u32))
        .build()
        .unwrap();

    assert_eq!(injector.options(), config.engine);
    assert_eq!(*injector.get::<u32>().unwrap(), 42);
}
