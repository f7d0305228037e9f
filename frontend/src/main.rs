use log::{error, info};

mod config;
mod controller;
mod dom;
mod events;
mod presentation;
mod state;
mod tracking;

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting page interactions");
    if let Err(err) = controller::start() {
        error!("Page interactions disabled: {:?}", err);
    }
}
