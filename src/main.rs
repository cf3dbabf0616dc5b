use std::error::Error;

use learngl::app::AppHandler;
use learngl::error::AppError;
use learngl::settings::Settings;
use winit::event_loop::{ControlFlow, EventLoop};

fn run() -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut handler = AppHandler::new(Settings::load());
    event_loop.run_app(&mut handler)?;

    handler.finish()
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        log::error!("{e}");
        let mut source = e.source();
        while let Some(cause) = source {
            log::error!("  caused by: {cause}");
            source = cause.source();
        }
        std::process::exit(-1);
    }
}
