use researcher::{build_researcher, init, server::run_server, Configuration};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init();
    tracing::info!("Starting healthcare research service");

    let config = Configuration::from_env();
    let researcher = build_researcher(&config);

    run_server(config, researcher).await
}
