use anyhow::Context;
use timetable_solver::config::ServerConfig;
use timetable_solver::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env().context("reading server configuration")?;

    server::run_server(config).await
}
