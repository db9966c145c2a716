use std::io::{self, Write};
use std::path::Path;
use std::sync::mpsc;

use anyhow::Context;
use log::LevelFilter;
use shelf_core::{
    display_name, update, AppState, DropChannel, DropEvent, DropSource, FileHandle, Msg,
};
use shelf_engine::prepare_staging_dir;
use shelf_logging::{shelf_debug, shelf_info, shelf_warn};

use super::config::{load_config, AppConfig, CONFIG_FILENAME};
use super::effects::EffectRunner;
use super::{input, render};

/// Everything the single event loop reacts to.
#[derive(Debug)]
pub enum LoopEvent {
    Drop(DropEvent),
    Msg(Msg),
    Quit,
}

pub fn run_app() -> anyhow::Result<()> {
    let (config, config_error) = match load_config(Path::new(CONFIG_FILENAME)) {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };
    shelf_logging::initialize(config.log_destination, LevelFilter::Info, &config.log_file);
    if let Some(err) = config_error {
        shelf_warn!("Using default configuration: {}", err);
    }

    let staging_dir = config.staging_dir();
    prepare_staging_dir(&staging_dir)
        .with_context(|| format!("staging directory {}", staging_dir.display()))?;
    shelf_info!("Staging into {}", staging_dir.display());

    let (loop_tx, loop_rx) = mpsc::channel::<LoopEvent>();
    let runner = EffectRunner::new(staging_dir, loop_tx.clone())?;

    // The engine keeps a sender alive, so without stdin the loop would never
    // see a drop or a quit.
    input::spawn_stdin_listener(loop_tx.clone())
        .context("registering the native drop listener on stdin")?;
    let source = DropSource::select(true);

    let initial: Vec<String> = std::env::args().skip(1).collect();
    if let Some(event) = initial_drop(source.channel(), initial) {
        let _ = loop_tx.send(LoopEvent::Drop(event));
    }
    drop(loop_tx);

    let mut app = App::new(source, &runner, io::stdout());
    app.render()?;
    while let Ok(event) = loop_rx.recv() {
        if !app.handle(event)? {
            break;
        }
    }

    if config.clear_on_exit && !runner.shutdown(config.exit_timeout()) {
        shelf_warn!("Staged files were not cleared before exit");
    }
    Ok(())
}

/// Paths given on the command line, delivered on the channel `channel` accepts.
pub(crate) fn initial_drop(channel: DropChannel, paths: Vec<String>) -> Option<DropEvent> {
    if paths.is_empty() {
        return None;
    }
    let event = match channel {
        DropChannel::Native => DropEvent::NativeDrop(paths),
        DropChannel::DomFallback => DropEvent::DomDrop(
            paths
                .into_iter()
                .map(|path| FileHandle {
                    name: display_name(&path),
                    path: Some(path),
                    relative_path: None,
                })
                .collect(),
        ),
    };
    Some(event)
}

pub(crate) struct App<'a, W: Write> {
    state: AppState,
    source: DropSource,
    runner: &'a EffectRunner,
    out: W,
}

impl<'a, W: Write> App<'a, W> {
    pub(crate) fn new(source: DropSource, runner: &'a EffectRunner, out: W) -> Self {
        Self {
            state: AppState::new(),
            source,
            runner,
            out,
        }
    }

    /// Returns `false` once the loop should stop.
    pub(crate) fn handle(&mut self, event: LoopEvent) -> io::Result<bool> {
        match event {
            LoopEvent::Drop(drop_event) => {
                let outcome = self.source.handle(drop_event);
                if let Some(batch) = outcome.batch {
                    self.dispatch_msg(Msg::FilesDropped(batch))?;
                }
            }
            LoopEvent::Msg(msg) => self.dispatch_msg(msg)?,
            LoopEvent::Quit => {
                shelf_info!("Quit requested");
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn dispatch_msg(&mut self, msg: Msg) -> io::Result<()> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;
        self.runner.enqueue(effects);

        if was_dirty {
            self.render()?;
        }
        Ok(())
    }

    pub(crate) fn render(&mut self) -> io::Result<()> {
        let view = self.state.view();
        shelf_debug!(
            "Render generation={} rows={}",
            view.generation,
            view.rows.len()
        );
        self.out.write_all(render::render(&view).as_bytes())?;
        self.out.flush()
    }
}
