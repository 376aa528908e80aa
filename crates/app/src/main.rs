use engine::{Currency, Engine};

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "quota={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let currency = Currency::try_from(settings.app.currency.as_str())?;
    let engine = Engine::builder().build();

    let addr = format!("{}:{}", settings.server.bind, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%currency, "starting quota on {addr}");

    server::run_with_listener(engine, currency, listener).await?;

    Ok(())
}
