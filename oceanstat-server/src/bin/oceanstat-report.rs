use clap::Parser;
use oceanstat_connectors::export::CsvExportSource;
use oceanstat_connectors::rpc::AnalysisClient;
use oceanstat_connectors::upstream::UpstreamClient;
use oceanstat_connectors::AsyncConnector;
use oceanstat_core::DataSource;
use oceanstat_server::cli::ReportArgs;
use oceanstat_server::report::{format_section, rule};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    oceanstat_server::init_logging();
    let args = ReportArgs::parse();

    println!("Ocean Monitoring Data Analysis");
    println!("{}", rule());

    if let Some(config) = args.upstream_config() {
        println!("Connecting to collection server at {}...", config.server_addr);
        let mut upstream = UpstreamClient::new(config);
        match upstream.connect().await {
            Ok(()) => {
                println!("Connected");
                if let Err(e) = upstream.disconnect().await {
                    log::warn!("Collector disconnect failed: {}", e);
                }
            }
            Err(e) => println!("Collection server unavailable ({e}), continuing with existing export"),
        }
    }

    println!("\nReading export {}...", args.export.display());
    let mut source = CsvExportSource::new(&args.export);
    if !args.all_types {
        source = source.with_known_types();
    }
    let grouped = match source.readings() {
        Ok(grouped) => grouped,
        Err(e) => {
            eprintln!("No export available: {e}");
            eprintln!("Export the collector's sensor data first, then run this report again.");
            return Err(e.into());
        }
    };
    let stats = source.stats();
    println!(
        "Loaded {} readings ({} rows skipped)",
        stats.records_read,
        stats.short_rows + stats.non_numeric + stats.filtered
    );

    if grouped.is_empty() {
        println!("No valid sensor data found");
        return Ok(());
    }

    println!("\nRunning statistical analysis against {}...", args.analysis_addr);
    println!("{}", rule());

    let mut client = AnalysisClient::new(args.client_config());
    client.connect().await?;

    let mut failures = 0usize;
    for (data_type, values) in grouped.iter() {
        match client.analyze(data_type, values).await {
            Ok(response) => print!("\n{}", format_section(data_type, &response)),
            Err(e) => {
                failures += 1;
                log::error!("Analysis failed for {}: {}", data_type, e);
                if !client.is_connected() {
                    client.connect().await?;
                }
            }
        }
    }
    client.disconnect().await?;

    println!("\n{}", rule());
    if failures == 0 {
        println!("Analysis complete for {} data types", grouped.len());
    } else {
        println!("Analysis finished with {} of {} data types failing", failures, grouped.len());
    }
    Ok(())
}
