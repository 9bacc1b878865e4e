//! Tests for the tracing setup.

use std::sync::Mutex;

use cxn_core::tracing::setup::{init_tracing, LOG_ENV_VAR};

static TRACING_MUTEX: Mutex<()> = Mutex::new(());

#[test]
fn init_accepts_per_module_filters() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var(LOG_ENV_VAR, "cxn_annotator::pipeline=debug,cxn_core=warn");
    init_tracing();
    std::env::remove_var(LOG_ENV_VAR);
}

#[test]
fn init_is_idempotent() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    init_tracing();
    init_tracing();
    init_tracing();
}

#[test]
fn garbage_filter_falls_back() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var(LOG_ENV_VAR, "this_is=not=a=filter");
    init_tracing();
    std::env::remove_var(LOG_ENV_VAR);
}
