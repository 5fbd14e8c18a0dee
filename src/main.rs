use anyhow::Context;
use tracing_subscriber::fmt::writer::MakeWriterExt;

use hostcloak::{config, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let data_dir = config::data_dir().context("resolving data directory")?;
    std::fs::create_dir_all(&data_dir).context("creating data directory")?;

    let file_appender = tracing_appender::rolling::daily(data_dir.join("logs"), "hostcloak.log");
    let (file_writer, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(file_writer.and(std::io::stdout))
        .init();

    let settings = match config::load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("[Config] falling back to defaults: {}", e);
            config::Settings::default()
        }
    };

    server::start_server(settings).await
}
