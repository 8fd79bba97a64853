use clap::Parser;
use oceanstat_connectors::rpc::AnalysisServer;
use oceanstat_core::StatisticsEngine;
use oceanstat_server::cli::ServeArgs;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    oceanstat_server::init_logging();
    let args = ServeArgs::parse();

    log::info!("OceanStat analysis service v{}", oceanstat_core::VERSION);
    let server = AnalysisServer::bind(args.server_config(), StatisticsEngine::new()).await?;

    server
        .serve_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::error!("Failed to listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await?;

    log::info!("Shutdown complete");
    Ok(())
}
