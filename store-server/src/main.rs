use store_server::{Config, Server, ServerState, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Environment: dotenv + logging
    setup_environment()?;

    tracing::info!("GSM Store server starting...");

    // 2. Configuration
    let config = Config::from_env();

    // 3. State: database, migrations, notification worker
    let (state, notifier_service) = ServerState::initialize(&config).await?;

    // 4. Serve until shutdown
    let server = Server::with_state(state);
    let result = server.run().await;

    // 5. Drain and stop the notification worker
    notifier_service.shutdown().await;

    if let Err(e) = result {
        tracing::error!("Server error: {e}");
        return Err(e.into());
    }
    Ok(())
}
