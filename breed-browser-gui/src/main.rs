mod app;

use breed_browser_core::{BrowserConfig, DogApiClient};

fn init_logging() {
    // Default to info level, but allow override via RUST_LOG
    // Example: RUST_LOG=breed_browser_core::controller=debug
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "breed_browser_core=info,breed_browser_gui=info".into()),
        )
        .init();
}

fn main() -> iced::Result {
    init_logging();

    let config = match BrowserConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    let client = match DogApiClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Failed to create API client: {}", e);
            std::process::exit(1);
        }
    };

    log::info!("Browsing breeds from {}", client.base_url());

    iced::application("Dog Breeds Directory", app::update, app::view)
        .run_with(move || app::initialize(config, client))
}
