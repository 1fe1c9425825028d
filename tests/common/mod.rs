#![allow(dead_code, clippy::unwrap_used)]

use std::sync::Once;

use ratgeo::geometry::Point;
use ratgeo::math::parse_decimal;
use ratgeo::Rational;

static TRACING: Once = Once::new();

/// Installs a test subscriber once; `RUST_LOG=ratgeo=trace` shows the merge fold.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let env_filter = tracing_subscriber::EnvFilter::from_default_env()
            .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into());
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_test_writer()
            .try_init();
    });
}

pub fn dec(text: &str) -> Rational {
    parse_decimal(text).unwrap()
}

pub fn pt(x: i64, y: i64, z: i64) -> Point {
    Point::from_ints(x, y, z)
}

pub fn ptd(x: &str, y: &str, z: &str) -> Point {
    Point::new(dec(x), dec(y), dec(z))
}
