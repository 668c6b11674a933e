use tradeintel::{
    arguments::{patterns, print_debug_info, print_help},
    config,
    logger::{self, LogTag},
    paths, shipments, webserver,
};

/// Main entry point for the shipment search service
///
/// Startup order matters: directories must exist before the logger opens its
/// file sink, and configuration must be loaded before the store opens.
#[tokio::main]
async fn main() {
    if let Err(e) = paths::ensure_all_directories() {
        eprintln!("Failed to create required directories: {}", e);
        std::process::exit(1);
    }

    logger::init();

    if patterns::is_help_requested() {
        print_help();
        std::process::exit(0);
    }

    logger::info(LogTag::System, "🚀 tradeintel starting up...");
    print_debug_info();

    if let Err(e) = config::load_config() {
        logger::error(LogTag::Config, &format!("Failed to load configuration: {}", e));
        logger::flush();
        std::process::exit(1);
    }

    if let Err(e) = shipments::database::init_global_database() {
        logger::error(LogTag::Database, &format!("Failed to open shipment store: {}", e));
        logger::flush();
        std::process::exit(1);
    }

    if let Err(e) = ctrlc::set_handler(|| {
        logger::warning(LogTag::System, "Shutdown requested (Ctrl-C)");
        webserver::shutdown();
    }) {
        logger::warning(
            LogTag::System,
            &format!("Could not install Ctrl-C handler: {}", e),
        );
    }

    if let Err(e) = webserver::start_server().await {
        logger::error(LogTag::Webserver, &format!("Webserver failed: {}", e));
        logger::flush();
        std::process::exit(1);
    }

    logger::info(LogTag::System, "Shutdown complete");
    logger::flush();
}
