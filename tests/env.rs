//! Environment lookup through the public constructors.
//!
//! Kept in its own test binary: it mutates process environment variables,
//! and this file holds a single test so nothing else observes them.

use readysrv::{Checks, NoopLogger, ReadyServer};

#[test]
fn constructors_read_flex_readysrv_variables() {
    std::env::set_var("FLEX_READYSRV_ADDR", "127.0.0.1:9911");
    std::env::set_var("FLEX_READYSRV_READINESS_PATH", "/env/ready");
    std::env::set_var("FLEX_READYSRV_LIVENESS_PATH", "/env/live");

    let from_env = ReadyServer::new(Checks::new());
    let settings = from_env.settings();
    assert_eq!(settings.address, "127.0.0.1:9911");
    assert_eq!(settings.readiness_path, "/env/ready");
    assert_eq!(settings.liveness_path, "/env/live");

    let explicit = ReadyServer::builder(Checks::new())
        .address("127.0.0.1:9912")
        .logger(NoopLogger)
        .build();
    assert_eq!(explicit.settings().address, "127.0.0.1:9912");
    assert_eq!(explicit.settings().readiness_path, "/env/ready");

    std::env::set_var("FLEX_READYSRV_ADDR", "");
    let blank = ReadyServer::builder(Checks::new()).logger(NoopLogger).build();
    assert_eq!(blank.settings().address, "0.0.0.0:3674");

    std::env::remove_var("FLEX_READYSRV_ADDR");
    std::env::remove_var("FLEX_READYSRV_READINESS_PATH");
    std::env::remove_var("FLEX_READYSRV_LIVENESS_PATH");
}
