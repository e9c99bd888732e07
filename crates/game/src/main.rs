use game::app::bootstrap;
use tracing::error;

fn main() {
    let wiring = match bootstrap::build_app() {
        Ok(wiring) => wiring,
        Err(message) => {
            error!(error = %message, "startup_failed");
            std::process::exit(1);
        }
    };

    if let Err(err) = engine::run_app(wiring.config, wiring.sprites, wiring.scene) {
        error!(error = %err, "app_failed");
        std::process::exit(1);
    }
}
