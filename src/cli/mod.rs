use std::time::Duration;

use anyhow::{anyhow, Context};
use clap::{Arg, ArgAction, Command};
use std::env;
use tracing::{error, info};

use crate::{
    services::AnthropicClient,
    types::{Budget, TripInput},
    Planner,
};

/// CLI entry point for the tripcraft tool
pub async fn run() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let matches = Command::new("tripcraft")
        .version("0.1.0")
        .about("Generate a family trip itinerary with Claude")
        .arg(
            Arg::new("destination")
                .help("Destination city or region (e.g., \"Rome, Italy\")")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("start-date")
                .short('s')
                .long("start-date")
                .value_name("DATE")
                .help("Trip start date, ISO-8601 (e.g., 2024-05-01)")
                .required(true),
        )
        .arg(
            Arg::new("end-date")
                .short('e')
                .long("end-date")
                .value_name("DATE")
                .help("Trip end date, inclusive")
                .required(true),
        )
        .arg(
            Arg::new("adults")
                .short('a')
                .long("adults")
                .value_name("COUNT")
                .help("Number of adults traveling")
                .default_value("2"),
        )
        .arg(
            Arg::new("kid-age")
                .long("kid-age")
                .value_name("AGE")
                .help("Age of one accompanying child; repeat per child")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("budget")
                .short('b')
                .long("budget")
                .value_name("TIER")
                .help("Spending tier: budget, moderate, or luxury")
                .default_value("moderate"),
        )
        .arg(
            Arg::new("interest")
                .short('i')
                .long("interest")
                .value_name("INTEREST")
                .help("Interest to weight the plan toward; repeat as needed")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("nap-start")
                .long("nap-start")
                .value_name("TIME")
                .help("Daily nap window start (e.g., \"1:00 PM\")"),
        )
        .arg(
            Arg::new("nap-end")
                .long("nap-end")
                .value_name("TIME")
                .help("Daily nap window end"),
        )
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("MODEL")
                .help("The Anthropic model to use")
                .default_value("claude-sonnet-4-6"),
        )
        .arg(
            Arg::new("api-key")
                .short('k')
                .long("api-key")
                .value_name("KEY")
                .help("Anthropic API key (or set ANTHROPIC_API_KEY env var)"),
        )
        .arg(
            Arg::new("base-url")
                .short('u')
                .long("base-url")
                .value_name("URL")
                .help("Anthropic API base URL (or set ANTHROPIC_BASE_URL env var)"),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .value_name("SECONDS")
                .help("Request timeout in seconds")
                .default_value("120"),
        )
        .arg(
            Arg::new("max-tokens")
                .long("max-tokens")
                .value_name("COUNT")
                .help("Maximum output tokens for the generation call")
                .default_value("16000"),
        )
        .get_matches();

    // Get API key from argument or environment
    let api_key = matches
        .get_one::<String>("api-key")
        .cloned()
        .or_else(|| env::var("ANTHROPIC_API_KEY").ok())
        .ok_or_else(|| {
            anyhow!("Anthropic API key is required. Set ANTHROPIC_API_KEY environment variable or use --api-key")
        })?;

    let kids_ages = matches
        .get_many::<String>("kid-age")
        .unwrap_or_default()
        .map(|age| age.parse::<u8>().context("invalid --kid-age value"))
        .collect::<anyhow::Result<Vec<u8>>>()?;

    let budget = matches
        .get_one::<String>("budget")
        .unwrap()
        .parse::<Budget>()
        .map_err(|err| anyhow!(err))?;

    let interests = matches
        .get_many::<String>("interest")
        .unwrap_or_default()
        .cloned()
        .collect::<Vec<String>>();

    let input = TripInput {
        destination: matches.get_one::<String>("destination").unwrap().clone(),
        start_date: matches.get_one::<String>("start-date").unwrap().clone(),
        end_date: matches.get_one::<String>("end-date").unwrap().clone(),
        adults: matches.get_one::<String>("adults").unwrap().parse()?,
        kids_ages,
        budget,
        interests,
        nap_start: matches.get_one::<String>("nap-start").cloned(),
        nap_end: matches.get_one::<String>("nap-end").cloned(),
    };

    let timeout_seconds: u64 = matches.get_one::<String>("timeout").unwrap().parse()?;
    let max_tokens: u32 = matches.get_one::<String>("max-tokens").unwrap().parse()?;

    let mut client = AnthropicClient::new(api_key);
    if let Some(base_url) = matches
        .get_one::<String>("base-url")
        .cloned()
        .or_else(|| env::var("ANTHROPIC_BASE_URL").ok())
    {
        client.set_base_url(base_url);
    }

    let planner = Planner::with_backend(Box::new(client))
        .with_model(matches.get_one::<String>("model").unwrap().as_str())
        .with_max_tokens(max_tokens)
        .with_timeout(Duration::from_secs(timeout_seconds));

    info!("Generating itinerary for {}", input.destination);
    info!(
        "Using model: {}",
        matches.get_one::<String>("model").unwrap()
    );

    match planner.generate(&input).await {
        Ok(itinerary) => {
            println!("{}", serde_json::to_string_pretty(&itinerary)?);
            info!("Itinerary generation completed successfully");
        }
        Err(e) => {
            error!("Itinerary generation failed: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
