use crate::config::{Config, DirectoryConfig};
use crate::directory::{Directory, RenderWorker};
use crate::retailer::Retailer;
use crate::shutdown::ShutdownHandle;
use crate::ui::app::App;
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::handle_key;
use crate::ui::layout::list_rect;
use crate::ui::listing::CARD_HEIGHT;
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;
use std::io;
use std::sync::mpsc::{RecvTimeoutError, Sender};
use std::time::Instant;

/// What the startup fetch produced.
pub enum Startup {
    Loaded(Vec<Retailer>),
    /// Shown as a banner over an empty directory.
    Failed(String),
}

pub fn run(config: &Config, startup: Startup, shutdown: ShutdownHandle) -> io::Result<()> {
    let (mut terminal, guard) = setup_terminal()?;
    let events = EventHandler::new(config.ui.tick_rate(), shutdown.clone());
    let renderer = spawn_renderer(&config.directory, events.sender());
    let mut app = App::new(
        Directory::new(&config.directory, renderer),
        config.ui.sentinel_margin,
    );

    match startup {
        Startup::Loaded(retailers) => app.load(retailers, Instant::now()),
        Startup::Failed(message) => {
            app.load(Vec::new(), Instant::now());
            app.set_load_error(message);
        }
    }
    if let Ok((cols, rows)) = crossterm::terminal::size() {
        app.on_resize(visible_cards(cols, rows));
    }

    let idle_poll = config.ui.idle_poll();
    loop {
        terminal.draw(|frame| draw(frame, &app))?;
        if should_stop(&app, &shutdown) {
            break;
        }

        // A wait that ends without input is an idle period.
        let idle = match events.next(idle_poll) {
            Ok(AppEvent::Key(key)) => {
                handle_key(&mut app, key, Instant::now());
                false
            }
            Ok(AppEvent::Resize(cols, rows)) => {
                app.on_resize(visible_cards(cols, rows));
                false
            }
            Ok(AppEvent::PageRendered(rendered)) => {
                app.on_page_rendered(rendered, Instant::now());
                false
            }
            Ok(AppEvent::Tick) => true,
            Ok(AppEvent::Shutdown) => break,
            Err(RecvTimeoutError::Timeout) => true,
            Err(RecvTimeoutError::Disconnected) => break,
        };
        app.on_tick(Instant::now(), idle);
    }

    // Joins the render worker before the screen is restored.
    drop(app);
    drop(guard);
    Ok(())
}

/// A quit from the keyboard is forwarded to the shutdown handle so the
/// input thread stops as well.
fn should_stop(app: &App, shutdown: &ShutdownHandle) -> bool {
    if app.should_quit() {
        shutdown.signal();
    }
    shutdown.is_shutting_down()
}

fn visible_cards(cols: u16, rows: u16) -> usize {
    (list_rect(cols, rows).height / CARD_HEIGHT).max(1) as usize
}

fn spawn_renderer(settings: &DirectoryConfig, events: Sender<AppEvent>) -> Option<RenderWorker> {
    if !settings.background_render {
        tracing::warn!("Background rendering disabled by config, pages will render on demand");
        return None;
    }
    match RenderWorker::spawn(move |page| {
        let _ = events.send(AppEvent::PageRendered(page));
    }) {
        Ok(worker) => Some(worker),
        Err(err) => {
            tracing::warn!(error = %err, "Background rendering unavailable, pages will render on demand");
            None
        }
    }
}
