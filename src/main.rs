use log::{info, Level};

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    let _ = console_log::init_with_level(Level::Info);

    info!("Starting page interactions");
    portfolio_interactions::start();
}
