/// spin3d - a user-configured rotating cube in a window
///
/// Prompts for face color, cube size, rotation angle, and rotation speed,
/// then opens an 800x600 window.
/// Controls:
///   - Space: toggle rotation
///   - Esc / window close: quit

use spin3d_window::config;

fn main() {
    env_logger::init();

    let config = match config::prompt_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to read input: {}", err);
            std::process::exit(1);
        }
    };
    log::info!("starting with {:?}", config);

    if let Err(err) = spin3d_window::run(config) {
        eprintln!("Event loop error: {}", err);
        std::process::exit(1);
    }
}
