//! In-process HTTP servers for client tests.

use std::net::SocketAddr;
use std::sync::mpsc;
use std::thread;

/// Serve `router` on an ephemeral local port from a background thread.
///
/// The blocking client must not run inside a tokio runtime, so the server
/// gets its own runtime on its own thread.
pub(crate) fn spawn_server(router: axum::Router) -> SocketAddr {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("test runtime");
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("bind test listener");
            tx.send(listener.local_addr().expect("local addr"))
                .expect("report test address");
            axum::serve(listener, router).await.expect("serve test router");
        });
    });
    rx.recv().expect("test server address")
}
