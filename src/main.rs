#[tokio::main]
async fn main() {
    // Startup and serve errors are already logged by the server.
    if portal_client::run_with_config().await.is_err() {
        std::process::exit(1);
    }
}
