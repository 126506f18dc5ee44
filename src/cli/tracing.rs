use tracing::Level;
use tracing_subscriber::prelude::*;

pub(crate) fn init(level: Level) {
    let tracing_layer = tracing_subscriber::fmt::layer();
    let filter = tracing_subscriber::filter::Targets::new()
        .with_target("reqwest", Level::INFO.min(level))
        .with_target("redis", Level::INFO.min(level))
        .with_default(level);

    tracing_subscriber::registry()
        .with(tracing_layer)
        .with(filter)
        .init();
}

/// Parse a level name such as `DEBUG` or `warn`, falling back to `INFO`.
pub(crate) fn parse_level(name: Option<&str>) -> Level {
    name.and_then(|name| name.trim().parse().ok())
        .unwrap_or(Level::INFO)
}
