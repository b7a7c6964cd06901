//! Atom visualization
//!
//! Drag with the left mouse button to orbit, scroll to zoom, R to reset the
//! camera, F for fullscreen, Escape to quit.

use atomviz::Program;

fn main() {
    // Initialize logging
    env_logger::init();
    log::info!("Starting atomviz");

    if let Err(e) = atomviz::run(Program::Atom) {
        log::error!("Event loop error: {}", e);
        std::process::exit(1);
    }
}
