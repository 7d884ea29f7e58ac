//! Service entry-point: loads settings, starts the directory server and
//! waits for it to stop.

use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use user_directory::server::{DirectoryServer, ServerSettings};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load()
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))?;
    let mut server = DirectoryServer::new(settings.to_config()?);
    server.start()?;
    server.run_until_stopped().await?;
    info!("user directory stopped");
    Ok(())
}
