//! Smoke test: a single cube spinning under a red point light

use atomviz::Program;

fn main() {
    env_logger::init();
    log::info!("Starting smoke test");

    if let Err(e) = atomviz::run(Program::SmokeTest) {
        log::error!("Event loop error: {}", e);
        std::process::exit(1);
    }
}
