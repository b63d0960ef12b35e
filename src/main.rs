use std::time::Duration;

use clap::Parser;

use retro_desk::cli::{Cli, HostConfig};
use retro_desk::desktop::{Desktop, LAUNCHERS};
use retro_desk::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use retro_desk::event_loop::{ControlFlow, EventLoop};
use retro_desk::tracing_sub;

fn main() -> retro_desk::Result<()> {
    let cli = Cli::parse();
    let config = HostConfig::try_from(&cli)?;
    tracing_sub::init(config.log_file.as_deref(), config.log_level)?;

    let mut output = ConsoleOutputDriver::new()?;
    output.enter()?;
    let (columns, rows) = output.size()?;
    tracing::info!(columns, rows, zoom = config.desktop.zoom, "desktop starting");

    let mut desktop = Desktop::new(config.desktop, config.projection, columns, rows);
    if let Some(readme) = LAUNCHERS.last() {
        desktop.launch(readme);
    }

    let mut dirty = true;
    let mut event_loop = EventLoop::new(ConsoleInputDriver::new(), Duration::from_millis(16));
    let result = event_loop.run(|_, event| {
        match event {
            Some(event) => dirty |= desktop.handle_event(&event),
            None if dirty => {
                output.draw(|frame| desktop.render(frame))?;
                dirty = false;
            }
            None => {}
        }
        Ok(if desktop.should_quit() {
            ControlFlow::Quit
        } else {
            ControlFlow::Continue
        })
    });

    output.exit()?;
    tracing::info!("desktop stopped");
    result.map_err(Into::into)
}
