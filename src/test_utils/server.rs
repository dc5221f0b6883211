use axum::Router;

/// Serve `router` on a random local port and return its base URL, e.g. `http://127.0.0.1:4321`.
pub(crate) async fn spawn_test_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Could not bind test server");
    let address = listener
        .local_addr()
        .expect("Could not get test server address");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Test server stopped unexpectedly");
    });

    format!("http://{address}")
}
