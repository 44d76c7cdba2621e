//! TUI module
//!
//! Terminal interface for EBillr: dashboard and settings screens built with
//! ratatui, with the live clock and connectivity checks running as
//! background tasks.

mod app;
mod keybindings;
mod theme;
pub mod views;

pub use app::*;
pub use theme::*;

use crate::app::AppContext;
use crate::live::{ConnectivityProbe, HttpProbe, LiveData, TimeSource, WorldTimeSource};
use crate::prefs::PreferenceStore;
use crate::profile::ProfileLoader;
use crate::theme::ColorSchemeSignal;
use crate::timer::IntervalTask;
use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, oneshot};

/// Period of the clock's minute tick
const CLOCK_TICK: Duration = Duration::from_secs(60);

/// Background tasks feeding live data; aborted when dropped
struct LiveTasks {
    _probe: IntervalTask,
    _clock: IntervalTask,
}

fn spawn_live_tasks(
    live: Arc<Mutex<LiveData>>,
    prefs: PreferenceStore,
    probe: Arc<dyn ConnectivityProbe>,
    source: Arc<dyn TimeSource>,
    probe_interval: Duration,
) -> LiveTasks {
    // Initial check, then the first clock lookup while still online
    {
        let live = Arc::clone(&live);
        let prefs = prefs.clone();
        let probe = Arc::clone(&probe);
        let source = Arc::clone(&source);
        tokio::spawn(async move {
            let country = prefs.load().country_entry();
            let mut live = live.lock().await;
            live.poll(probe.as_ref(), source.as_ref(), country).await;
            live.refresh(source.as_ref(), country).await;
        });
    }

    let clock_live = Arc::clone(&live);
    let clock = IntervalTask::spawn(CLOCK_TICK, move || {
        let live = Arc::clone(&clock_live);
        async move {
            live.lock().await.tick();
        }
    });

    let probe_task = IntervalTask::spawn(probe_interval, move || {
        let live = Arc::clone(&live);
        let prefs = prefs.clone();
        let probe = Arc::clone(&probe);
        let source = Arc::clone(&source);
        async move {
            let country = prefs.load().country_entry();
            let change = live
                .lock()
                .await
                .poll(probe.as_ref(), source.as_ref(), country)
                .await;
            if let Some(change) = change {
                tracing::info!("Connectivity changed: {:?}", change);
            }
        }
    });

    LiveTasks {
        _probe: probe_task,
        _clock: clock,
    }
}

/// Build the HTTP collaborators from the network configuration
fn live_collaborators(
    ctx: &AppContext,
) -> Result<(Arc<dyn ConnectivityProbe>, Arc<dyn TimeSource>)> {
    let network = &ctx.config.network;
    let timeout = Duration::from_secs(network.timeout_secs);
    let probe = HttpProbe::new(network.probe_url.clone(), timeout)?;
    let source = WorldTimeSource::new(network.time_service_url.clone(), timeout)?;
    Ok((Arc::new(probe), Arc::new(source)))
}

/// Run the TUI application
pub async fn run_tui(ctx: AppContext) -> Result<()> {
    let enable_mouse = ctx.config.ui.enable_mouse;
    let tick = Duration::from_millis(ctx.config.ui.tick_millis);

    let mut app = App::new(ctx.clone(), ColorSchemeSignal::detect());

    // Profile arrives in the background; the header shows a placeholder until then
    let (profile_tx, profile_rx) = oneshot::channel();
    let loader = ProfileLoader::new(
        ctx.profiles(),
        Duration::from_millis(ctx.config.profile.minimum_delay_millis),
    );
    tokio::spawn(async move {
        let _ = profile_tx.send(loader.fetch().await);
    });
    app.set_profile_receiver(profile_rx);

    let _live_tasks = match live_collaborators(&ctx) {
        Ok((probe, source)) => {
            app.watch_country(Arc::clone(&source));
            Some(spawn_live_tasks(
                app.live(),
                ctx.prefs.clone(),
                probe,
                source,
                Duration::from_secs(ctx.config.network.probe_interval_secs),
            ))
        }
        Err(e) => {
            tracing::warn!("Live clock disabled: {:#}", e);
            None
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if enable_mouse {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    tracing::debug!("TUI initialized, entering main loop");

    let result = run_loop(&mut terminal, &mut app, tick);

    tracing::debug!("TUI shutting down");

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    if enable_mouse {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    terminal.show_cursor()?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tick: Duration,
) -> Result<()> {
    loop {
        app.poll_background();
        terminal.draw(|f| app.render(f))?;

        if event::poll(tick)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key(key) {
                    return Ok(());
                }
            }
        }
    }
}
