use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use paintkit_core::{thread_safe, AppEvent, AutosaveEvent, EventBus, EventFilter};
use paintkit_shell::server;
use paintkit_shell::{
    channel, save_once, spawn_autosave, AutosaveConfig, TabDefaults, UiDispatcher, Workbench,
};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::runtime::Runtime;

const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

fn leaked_bus() -> &'static EventBus {
    Box::leak(Box::new(EventBus::new()))
}

fn workbench(bus: &'static EventBus, tabs: usize) -> Workbench {
    let defaults = TabDefaults {
        width: 40,
        height: 30,
        ..TabDefaults::default()
    };
    let mut wb = Workbench::with_event_bus(defaults, bus);
    for _ in 0..tabs {
        wb.new_tab().unwrap();
    }
    wb
}

fn autosave_config(path: PathBuf) -> AutosaveConfig {
    AutosaveConfig {
        interval_ticks: 2,
        tick: Duration::from_millis(10),
        path,
        notifications: true,
        show_countdown: true,
        snapshot_timeout: Duration::from_secs(5),
    }
}

async fn http(addr: std::net::SocketAddr, request: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request.as_bytes()).await.unwrap();
    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    String::from_utf8_lossy(&response).into_owned()
}

#[test]
fn test_save_once_writes_png_of_active_tab() {
    let rt = Runtime::new().unwrap();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("autosave.png");
    let config = autosave_config(path.clone());
    let (dispatcher, ui) = channel::<Workbench>();

    let task = rt.spawn(async move {
        let event = save_once(&dispatcher, &config).await;
        dispatcher.shutdown();
        event
    });
    let mut wb = workbench(leaked_bus(), 1);
    ui.run(&mut wb);

    let event = rt.block_on(task).unwrap();
    assert_eq!(
        event,
        Some(AutosaveEvent::Saved {
            tab: "Canvas 1".to_string(),
            path: path.clone()
        })
    );
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(PNG_MAGIC));
}

#[test]
fn test_save_once_without_tab_is_skipped() {
    let rt = Runtime::new().unwrap();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("autosave.png");
    let config = autosave_config(path.clone());
    let (dispatcher, ui) = channel::<Workbench>();

    let task = rt.spawn(async move {
        let event = save_once(&dispatcher, &config).await;
        dispatcher.shutdown();
        event
    });
    let mut wb = workbench(leaked_bus(), 0);
    ui.run(&mut wb);

    let event = rt.block_on(task).unwrap();
    assert!(matches!(event, Some(AutosaveEvent::Skipped { .. })));
    assert!(!path.exists());
}

#[test]
fn test_save_once_times_out_on_stalled_ui() {
    let rt = Runtime::new().unwrap();
    let dir = TempDir::new().unwrap();
    let mut config = autosave_config(dir.path().join("autosave.png"));
    config.snapshot_timeout = Duration::from_millis(20);
    // nobody runs the loop
    let (dispatcher, _ui) = channel::<Workbench>();

    let event = rt.block_on(save_once(&dispatcher, &config));
    match event {
        Some(AutosaveEvent::Skipped { reason }) => assert!(reason.contains("20")),
        other => panic!("expected a skipped cycle, got {:?}", other),
    }
}

#[test]
fn test_periodic_autosave_publishes_notification() {
    let rt = Runtime::new().unwrap();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("periodic.png");
    let bus = leaked_bus();
    let seen = thread_safe(Vec::new());
    let sink = Arc::clone(&seen);
    bus.subscribe(EventFilter::All, move |event| sink.lock().push(event));

    let (dispatcher, ui) = channel::<Workbench>();
    let handle = {
        let _guard = rt.enter();
        spawn_autosave(dispatcher.clone(), autosave_config(path.clone()), bus)
    };

    let watched = path.clone();
    let watcher: UiDispatcher<Workbench> = dispatcher;
    rt.spawn(async move {
        for _ in 0..500 {
            if watched.exists() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        // let the publish after the write land
        tokio::time::sleep(Duration::from_millis(50)).await;
        watcher.shutdown();
    });

    let mut wb = workbench(bus, 1);
    ui.run(&mut wb);
    handle.stop();

    assert!(std::fs::read(&path).unwrap().starts_with(PNG_MAGIC));
    assert!(seen
        .lock()
        .iter()
        .any(|e| matches!(e, AppEvent::Autosave(AutosaveEvent::Saved { .. }))));
}

#[test]
fn test_save_now_skips_the_countdown() {
    let rt = Runtime::new().unwrap();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("now.png");
    let mut config = autosave_config(path.clone());
    config.interval_ticks = 10_000;

    let (dispatcher, ui) = channel::<Workbench>();
    let handle = {
        let _guard = rt.enter();
        spawn_autosave(dispatcher.clone(), config, leaked_bus())
    };
    handle.save_now();

    let watched = path.clone();
    rt.spawn(async move {
        for _ in 0..500 {
            if watched.exists() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        dispatcher.shutdown();
    });

    let mut wb = workbench(leaked_bus(), 1);
    ui.run(&mut wb);
    assert!(path.exists());
    assert!(handle.remaining() > 9_000);
}

#[test]
fn test_canvas_endpoint_serves_png_and_rejects_post() {
    let rt = Runtime::new().unwrap();
    let (dispatcher, ui) = channel::<Workbench>();
    let app = server::router(dispatcher.clone(), "/canvas", Duration::from_secs(5));

    let client = rt.spawn(async move {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(server::serve(listener, app));

        let get = http(
            addr,
            "GET /canvas HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        )
        .await;
        let post = http(
            addr,
            "POST /canvas HTTP/1.1\r\nHost: localhost\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await;
        let missing = http(
            addr,
            "GET /other HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        )
        .await;
        dispatcher.shutdown();
        (get, post, missing)
    });

    let mut wb = workbench(leaked_bus(), 1);
    ui.run(&mut wb);
    let (get, post, missing) = rt.block_on(client).unwrap();

    assert!(get.starts_with("HTTP/1.1 200"));
    assert!(get.to_ascii_lowercase().contains("content-type: image/png"));
    assert!(get.contains("PNG"));
    assert!(post.starts_with("HTTP/1.1 405"));
    assert!(missing.starts_with("HTTP/1.1 404"));
}

#[test]
fn test_canvas_endpoint_only_answers_get() {
    let rt = Runtime::new().unwrap();
    let (dispatcher, ui) = channel::<Workbench>();
    let app = server::router(dispatcher.clone(), "/canvas", Duration::from_secs(5));

    let client = rt.spawn(async move {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(server::serve(listener, app));

        let mut responses = Vec::new();
        for method in ["HEAD", "PUT", "DELETE", "OPTIONS"] {
            let request = format!(
                "{} /canvas HTTP/1.1\r\nHost: localhost\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                method
            );
            responses.push((method, http(addr, &request).await));
        }
        dispatcher.shutdown();
        responses
    });

    let mut wb = workbench(leaked_bus(), 1);
    ui.run(&mut wb);
    for (method, response) in rt.block_on(client).unwrap() {
        assert!(
            response.starts_with("HTTP/1.1 405"),
            "{} answered {:?}",
            method,
            response.lines().next()
        );
        assert!(response.to_ascii_lowercase().contains("allow: get"));
    }
}

#[test]
fn test_canvas_endpoint_on_stalled_ui_is_500() {
    let rt = Runtime::new().unwrap();
    // nobody runs the loop
    let (dispatcher, _ui) = channel::<Workbench>();
    let app = server::router(dispatcher, "/canvas", Duration::from_millis(20));

    let response = rt.block_on(async move {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(server::serve(listener, app));
        http(
            addr,
            "GET /canvas HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        )
        .await
    });
    assert!(response.starts_with("HTTP/1.1 500"));
}

#[test]
fn test_save_once_reports_write_failure() {
    let rt = Runtime::new().unwrap();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("no-such-dir").join("autosave.png");
    let config = autosave_config(path.clone());
    let (dispatcher, ui) = channel::<Workbench>();

    let task = rt.spawn(async move {
        let event = save_once(&dispatcher, &config).await;
        dispatcher.shutdown();
        event
    });
    let mut wb = workbench(leaked_bus(), 1);
    ui.run(&mut wb);

    match rt.block_on(task).unwrap() {
        Some(AutosaveEvent::Failed { tab, error }) => {
            assert_eq!(tab, "Canvas 1");
            assert!(error.contains("no-such-dir"));
        }
        other => panic!("expected a failed cycle, got {:?}", other),
    }
}

#[test]
fn test_canvas_endpoint_without_tab_is_500() {
    let rt = Runtime::new().unwrap();
    let (dispatcher, ui) = channel::<Workbench>();
    let app = server::router(dispatcher.clone(), "/canvas", Duration::from_secs(5));

    let client = rt.spawn(async move {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(server::serve(listener, app));
        let response = http(
            addr,
            "GET /canvas HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        )
        .await;
        dispatcher.shutdown();
        response
    });

    let mut wb = workbench(leaked_bus(), 0);
    ui.run(&mut wb);
    let response = rt.block_on(client).unwrap();
    assert!(response.starts_with("HTTP/1.1 500"));
}
