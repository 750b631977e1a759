use relay_core::Config;
use relay_immich_client::ImmichClient;

/// Shared, read-only state handed to every handler.
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    pub immich: ImmichClient,
}

impl AppState {
    pub fn new(config: Config, immich: ImmichClient) -> Self {
        Self { config, immich }
    }
}
