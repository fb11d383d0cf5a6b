//! Error context extension tests

use std::io;
use wirebox_domain::Error;
use wirebox_infrastructure::error_ext::ErrorContext;

fn failing_io() -> Result<(), io::Error> {
    Err(io::Error::new(io::ErrorKind::NotFound, "no such file"))
}

#[test]
fn test_io_context_keeps_the_source() {
    let error = failing_io().io_context("Failed to read wirebox.toml").unwrap_err();

    match error {
        Error::Io { message, source } => {
            assert_eq!(message, "Failed to read wirebox.toml: no such file");
            assert!(source.is_some());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_config_context_maps_to_configuration() {
    let error = failing_io().config_context("Bad config").unwrap_err();
    assert!(matches!(error, Error::Configuration { .. }));
    assert!(error.to_string().starts_with("Configuration error: Bad config"));
}

#[test]
fn test_context_is_lazy() {
    let ok: Result<u8, io::Error> = Ok(3);
    let value = ok
        .with_context(|| -> String { panic!("context must not be built on success") })
        .unwrap();
    assert_eq!(value, 3);

    let error = failing_io().with_context(|| "while wiring").unwrap_err();
    assert!(matches!(error, Error::Internal { .. }));
    assert!(error.to_string().contains("while wiring: no such file"));
}

#[test]
fn test_plain_context() {
    let error = failing_io().context("loading").unwrap_err();
    assert_eq!(error.to_string(), "Internal error: loading: no such file");
}
