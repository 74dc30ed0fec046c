//! Subscriber installation from settings.

use commerce::api_object;
use commerce::log::logging_initialize;

#[test]
fn logging_initialize_is_repeatable() {
    logging_initialize().unwrap();
    logging_initialize().unwrap();

    let mut o = api_object!({"id": "log-me"});
    o.set("bad", f64::NAN);
    assert_eq!(o.to_string(), "(invalid JSON)");
    tracing::info!(object = ?o, "rendered after logging setup");
}
