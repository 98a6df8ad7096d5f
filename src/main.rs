use clap::Parser;
use log::error;
use repo_stats::api::Error;
use repo_stats_app::Args;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();
    env_logger::init();
    let args = Args::parse();

    let mut aggregator = repo_stats_app::aggregator(&args)?;
    let outcome = aggregator.stats().await;
    if let Err(err) = &outcome {
        error!("Error getting stats: {}", err);
    }
    println!("{}", repo_stats_app::render(aggregator.result())?);

    outcome.map(|_| ())
}
