use clap::{Parser, Subcommand};

use tuberev_analysis::RevenueAssumptions;
use tuberev_youtube::YoutubeClient;

#[derive(Debug, Parser)]
#[command(name = "tuberev-cli")]
#[command(about = "Channel revenue analysis from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Analyze a channel by URL, handle, or search text.
    Analyze {
        /// Channel URL, @handle, or free-text search query.
        query: String,
        /// How many recent uploads to include.
        #[arg(long)]
        max_videos: Option<u32>,
        /// Emit the full result as pretty-printed JSON.
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze {
            query,
            max_videos,
            json,
        } => analyze(&query, max_videos, json).await,
    }
}

async fn analyze(query: &str, max_videos: Option<u32>, json: bool) -> anyhow::Result<()> {
    let config = tuberev_core::load_app_config_from_env()?;
    let client = YoutubeClient::new(&config.youtube_api_key, config.youtube_timeout_secs)?
        .retry_policy(
            config.youtube_max_retries,
            config.youtube_retry_backoff_base_ms,
        );

    let max_videos = max_videos
        .unwrap_or(config.max_videos_default)
        .clamp(1, config.max_videos_cap);

    let channel = tuberev_youtube::resolve(&client, query).await?;
    let (summary, videos) = tuberev_youtube::collect(&client, &channel, max_videos).await?;
    let stats = tuberev_analysis::aggregate(&summary, &videos);
    let revenue = tuberev_analysis::estimate(&summary, &stats, &RevenueAssumptions::default());

    if json {
        let out = serde_json::json!({
            "channel": summary,
            "stats": stats,
            "revenue": revenue,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{} ({})", summary.display_name, summary.id);
    println!("  subscribers:      {}", summary.subscriber_count);
    println!("  total views:      {}", summary.total_view_count);
    println!("  videos analyzed:  {}", stats.video_count);
    println!("  average views:    {:.0}", stats.average_views);
    println!("  engagement:       {:.2}%", stats.engagement_rate_percent);
    println!(
        "  category:         {} (CPM {:.0})",
        revenue.category, revenue.applied_cpm
    );
    println!("  tier:             {}", revenue.subscriber_tier);
    println!("  monthly ads:      {:.0} KRW", revenue.monthly_ad_revenue);
    println!("  monthly sponsor:  {:.0} KRW", revenue.monthly_sponsorship);
    println!("  monthly members:  {:.0} KRW", revenue.monthly_membership);
    println!("  monthly total:    {:.0} KRW", revenue.total_monthly);
    println!("  annual estimate:  {:.0} KRW", revenue.annual_estimate);

    Ok(())
}
