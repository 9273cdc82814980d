use crate::app::App;
use crate::runtime::key_bindings::KeyBindings;
use crate::terminal::{Terminal, TerminalEvent};
use crate::ui::renderer::Renderer;
use std::io;
use std::time::{Duration, Instant};
use tracing::debug;

const IDLE_POLL: Duration = Duration::from_millis(120);

pub struct Runtime {
    app: App,
    terminal: Terminal,
    key_bindings: KeyBindings,
    renderer: Renderer,
}

impl Runtime {
    pub fn new(app: App, terminal: Terminal) -> Self {
        Self {
            app,
            terminal,
            key_bindings: KeyBindings::new(),
            renderer: Renderer::default(),
        }
    }

    /// Runs until the user exits or logs in. Returns the app for inspection.
    pub fn run(mut self) -> io::Result<App> {
        self.terminal.enter()?;
        self.app.mount(Instant::now());

        let run_result = self.event_loop();

        self.app.unmount();
        let exit_result = self.terminal.exit();
        run_result.and(exit_result)?;
        Ok(self.app)
    }

    fn event_loop(&mut self) -> io::Result<()> {
        self.render()?;

        while !self.app.should_exit() {
            if self.app.tick(Instant::now()) {
                self.render()?;
            }

            let timeout = self.app.poll_timeout(Instant::now(), IDLE_POLL);
            let event = self.terminal.poll_event(timeout)?;
            self.dispatch(event)?;
        }

        Ok(())
    }

    fn dispatch(&mut self, event: TerminalEvent) -> io::Result<()> {
        match event {
            TerminalEvent::Resize(size) => {
                debug!(width = size.width, height = size.height, "terminal resized");
                self.terminal.set_size(size);
                self.render()
            }
            TerminalEvent::Key(key) => {
                let command = self.key_bindings.resolve(key);
                if self.app.handle_command(command, Instant::now()) {
                    self.render()?;
                }
                Ok(())
            }
            TerminalEvent::Tick => Ok(()),
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let frame = self.renderer.render(&self.app, self.terminal.size());
        self.terminal.render(&frame)
    }
}
