use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use paintkit::{default_config_path, event_bus, init_logging, Config, BUILD_DATE, VERSION};
use paintkit_core::{emit, AppEvent, ErrorEvent};
use paintkit_shell::{
    channel, run_console, server, spawn_autosave, ActivityLog, AutosaveConfig, Notifier,
    TabDefaults, Workbench,
};

/// `--config <path>` if given, else the per-user default.
fn config_path() -> anyhow::Result<PathBuf> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            return args
                .next()
                .map(PathBuf::from)
                .context("--config needs a path");
        }
    }
    Ok(default_config_path()?)
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    tracing::info!("PaintKit {} (built {})", VERSION, BUILD_DATE);

    let path = config_path()?;
    let config = Config::load_or_default(&path)
        .with_context(|| format!("loading {}", path.display()))?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("paintkit-worker")
        .build()?;

    let bus = event_bus();
    let _notifier = Notifier::start(bus);
    let _activity_log = if config.logging.activity_log {
        match ActivityLog::start(&config.logging.directory, bus) {
            Ok(log) => Some(log),
            Err(e) => {
                tracing::warn!("Activity log disabled: {}", e);
                None
            }
        }
    } else {
        None
    };

    let (dispatcher, ui_loop) = channel::<Workbench>();
    let mut workbench = Workbench::new(TabDefaults::from_config(&config));
    workbench.new_tab()?;

    let timeout = Duration::from_millis(config.server.snapshot_timeout_ms);

    let autosave = config.autosave.enabled.then(|| {
        let _guard = runtime.enter();
        spawn_autosave(
            dispatcher.clone(),
            AutosaveConfig::from_settings(&config.autosave, timeout),
            bus,
        )
    });

    if config.server.enabled {
        let settings = config.server.clone();
        let app = server::router(dispatcher.clone(), &settings.route, timeout);
        runtime.spawn(async move {
            let served = match server::bind(&settings).await {
                Ok(listener) => server::serve(listener, app).await,
                Err(e) => Err(e),
            };
            if let Err(e) = served {
                tracing::error!("Snapshot server stopped: {}", e);
                let _ = emit!(AppEvent::Error(ErrorEvent::new("http", e.to_string())));
            }
        });
    }

    let interrupt = dispatcher.clone();
    runtime.spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupted");
            interrupt.shutdown();
        }
    });

    let console = dispatcher.clone();
    let save_now = autosave.as_ref().map(|handle| handle.trigger());
    std::thread::Builder::new()
        .name("console".to_string())
        .spawn(move || {
            let stdin = std::io::stdin();
            if let Err(e) = run_console(stdin.lock(), std::io::stdout(), &console, save_now, timeout)
            {
                tracing::error!("Console failed: {}", e);
                console.shutdown();
            }
        })?;
    drop(dispatcher);

    ui_loop.run(&mut workbench);

    let unsaved = workbench.unsaved_tabs();
    if !unsaved.is_empty() {
        tracing::warn!("Exiting with unsaved changes in {}", unsaved.join(", "));
    }
    drop(autosave);
    runtime.shutdown_timeout(Duration::from_secs(1));
    Ok(())
}
