//! Tracing subscriber setup.

use tracing_subscriber::{fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "relay_bot=info,relay_processing=info,relay_immich_client=info,\
relay_core=info,teloxide=warn,reqwest=warn,hyper=warn";

/// Install the global subscriber. `RUST_LOG` overrides the default filter;
/// `LOG_FORMAT=json` switches to JSON lines.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .event_format(Format::default().compact().with_target(false)),
            )
            .init();
    }
}
