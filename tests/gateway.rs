//! End-to-end tests: HTTP request in, control-protocol round trip out.

use std::time::{Duration, Instant};

use tokio::net::TcpListener;

use common::Behavior;

mod common;

#[tokio::test]
async fn command_reply_is_returned_verbatim() {
    let backend = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let backend_port = backend.local_addr().unwrap().port();
    common::start_control_backend(backend, Behavior::Reply("status:ok"));

    let (addr, shutdown) = common::start_gateway(common::gateway_config(backend_port)).await;

    let res = common::http_client()
        .get(format!("http://{addr}/?command=get_all_info"))
        .send()
        .await
        .expect("gateway unreachable");

    assert_eq!(res.status(), 200);
    assert_eq!(
        res.headers()["content-type"].to_str().unwrap(),
        "text/plain"
    );
    assert_eq!(res.text().await.unwrap(), "status:ok");

    shutdown.trigger();
}

#[tokio::test]
async fn restart_commands_land_on_the_control_port() {
    let (primary, control, backend_port) = common::bind_adjacent_pair().await;
    common::start_control_backend(primary, Behavior::Reply("primary"));
    common::start_control_backend(control, Behavior::Reply("ordered"));

    let (addr, shutdown) = common::start_gateway(common::gateway_config(backend_port)).await;
    let client = common::http_client();

    let res = client
        .get(format!("http://{addr}/?command=restart_now"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.text().await.unwrap(), "ordered");

    // An ordinary command still goes to the primary port.
    let res = client
        .get(format!("http://{addr}/?command=get_state"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.text().await.unwrap(), "primary");

    shutdown.trigger();
}

#[tokio::test]
async fn no_backend_yields_bad_gateway_without_waiting() {
    // Bind then drop to get a port nothing listens on.
    let backend = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let backend_port = backend.local_addr().unwrap().port();
    drop(backend);

    let (addr, shutdown) = common::start_gateway(common::gateway_config(backend_port)).await;

    let start = Instant::now();
    let res = common::http_client()
        .get(format!("http://{addr}/?command=get_state"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 502);
    assert_eq!(res.text().await.unwrap(), "");
    assert!(
        start.elapsed() < Duration::from_millis(200),
        "connection refusal must not wait for the deadline"
    );

    shutdown.trigger();
}

#[tokio::test]
async fn silent_backend_yields_gateway_timeout_after_the_deadline() {
    let backend = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let backend_port = backend.local_addr().unwrap().port();
    common::start_control_backend(backend, Behavior::Silent);

    let (addr, shutdown) = common::start_gateway(common::gateway_config(backend_port)).await;

    let start = Instant::now();
    let res = common::http_client()
        .get(format!("http://{addr}/?command=get_state"))
        .send()
        .await
        .unwrap();
    let elapsed = start.elapsed();

    assert_eq!(res.status(), 504);
    assert!(elapsed >= Duration::from_millis(230), "timed out early: {elapsed:?}");
    assert!(elapsed < Duration::from_millis(600), "timed out late: {elapsed:?}");

    shutdown.trigger();
}

#[tokio::test]
async fn player_commands_get_the_extended_deadline() {
    // The backend answers after 350 ms: past the 250 ms default tier but
    // within the 500 ms extended tier.
    let backend = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let backend_port = backend.local_addr().unwrap().port();
    common::start_control_backend(
        backend,
        Behavior::DelayedReply(Duration::from_millis(350), "player:info"),
    );

    let (addr, shutdown) = common::start_gateway(common::gateway_config(backend_port)).await;
    let client = common::http_client();

    let res = client
        .get(format!("http://{addr}/?command=player%20get_all_info"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "player:info");

    let res = client
        .get(format!("http://{addr}/?command=get_state"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 504);

    shutdown.trigger();
}

#[tokio::test]
async fn unrecognized_paths_get_nack_with_status_ok() {
    let (addr, shutdown) = common::start_gateway(common::gateway_config(9980)).await;

    let res = common::http_client()
        .get(format!("http://{addr}/unknown/path"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(
        res.headers()["content-type"].to_str().unwrap(),
        "text/plain"
    );
    assert_eq!(res.text().await.unwrap(), "NACK\n");

    shutdown.trigger();
}

#[tokio::test]
async fn css_asset_is_served_with_its_content_type() {
    let doc_root = std::env::temp_dir().join(format!("command-gateway-css-{}", std::process::id()));
    std::fs::create_dir_all(doc_root.join("styles")).unwrap();
    let css = "body { background: #123; }\n";
    std::fs::write(doc_root.join("styles/app.css"), css).unwrap();

    let mut config = common::gateway_config(9980);
    config.assets.doc_root = doc_root.clone();
    let (addr, shutdown) = common::start_gateway(config).await;

    let res = common::http_client()
        .get(format!("http://{addr}/styles/app.css"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["content-type"].to_str().unwrap(), "text/css");
    assert_eq!(res.text().await.unwrap(), css);

    shutdown.trigger();
    std::fs::remove_dir_all(doc_root).ok();
}

#[tokio::test]
async fn missing_asset_is_not_found() {
    let doc_root = std::env::temp_dir().join(format!("command-gateway-404-{}", std::process::id()));
    std::fs::create_dir_all(&doc_root).unwrap();

    let mut config = common::gateway_config(9980);
    config.assets.doc_root = doc_root.clone();
    let (addr, shutdown) = common::start_gateway(config).await;

    let res = common::http_client()
        .get(format!("http://{addr}/index.html"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);

    shutdown.trigger();
    std::fs::remove_dir_all(doc_root).ok();
}

#[tokio::test]
async fn concurrent_sessions_stay_independent() {
    let (primary, control, backend_port) = common::bind_adjacent_pair().await;
    common::start_control_backend(primary, Behavior::Reply("answer"));
    // Control port never answers; restart commands will time out.
    common::start_control_backend(control, Behavior::Silent);

    let (addr, shutdown) = common::start_gateway(common::gateway_config(backend_port)).await;
    let client = common::http_client();

    let mut tasks = Vec::new();
    for i in 0..10 {
        let client = client.clone();
        let url = if i % 2 == 0 {
            format!("http://{addr}/?command=get_state")
        } else {
            format!("http://{addr}/?command=restart_now")
        };
        tasks.push(tokio::spawn(async move {
            let res = client.get(url).send().await.unwrap();
            (i, res.status().as_u16())
        }));
    }

    for task in tasks {
        let (i, status) = task.await.unwrap();
        if i % 2 == 0 {
            assert_eq!(status, 200, "session {i}");
        } else {
            assert_eq!(status, 504, "session {i}");
        }
    }

    // The gateway is still healthy after the mixed batch.
    let res = client
        .get(format!("http://{addr}/?command=get_state"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    shutdown.trigger();
}
