//! Integration tests for logger behavior.

use grade_target::logger::{
    disable_verbose, enable_verbose, is_verbose_enabled, set_level, set_level_from_str, Level,
};
use grade_target::{debug, error, info, verbose, warn};

#[test]
fn level_parse_accepts_valid() {
    assert!(set_level_from_str("error"));
    assert!(set_level_from_str("warn"));
    assert!(set_level_from_str("info"));
    assert!(set_level_from_str("debug"));
}

#[test]
fn level_parse_rejects_invalid() {
    assert!(!set_level_from_str("invalid"));
    assert!(!set_level_from_str(""));
}

#[test]
fn logs_do_not_panic() {
    set_level(Level::Debug);
    info!("info integration");
    warn!("warn integration");
    error!("error integration");
    debug!("debug integration {}", 42);
}

#[test]
fn verbose_toggle() {
    enable_verbose();
    assert!(is_verbose_enabled());
    verbose!("verbose integration");
    disable_verbose();
    assert!(!is_verbose_enabled());
}
