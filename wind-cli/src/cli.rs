use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use inquire::{CustomType, InquireError, Text};
use wind_core::{Config, WeatherReport, lookup, provider::client_from_config, render_report};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "wind",
    version,
    about = "Current weather and 7-day forecast for any city",
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// City to look up, e.g. `wind Boulder, CO`. Defaults to the configured city.
    pub city: Vec<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Clone, Default, Args)]
pub struct OutputArgs {
    /// Print the decoded report as JSON instead of text.
    #[arg(long)]
    pub json: bool,

    /// HTTP timeout in seconds for each request.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the default city and request timeout.
    Configure,

    /// Prompt for cities one after another until the prompt is left empty.
    Interactive {
        #[command(flatten)]
        output: OutputArgs,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;

        match self.command {
            Some(Command::Configure) => configure(config),
            Some(Command::Interactive { output }) => {
                interactive(&with_overrides(config, &output), &output).await
            }
            None => {
                let query = city_query(&self.city, &config);
                let config = with_overrides(config, &self.output);
                let report = fetch(&config, &query).await?;
                print!("{}", format_report(&report, &self.output)?);
                Ok(())
            }
        }
    }
}

/// Positional words joined with spaces, or the configured default city.
fn city_query(words: &[String], config: &Config) -> String {
    let joined = words.join(" ");
    if joined.trim().is_empty() {
        config.default_city().to_string()
    } else {
        joined
    }
}

fn with_overrides(mut config: Config, output: &OutputArgs) -> Config {
    if let Some(secs) = output.timeout {
        config.timeout_secs = Some(secs);
    }
    config
}

async fn fetch(config: &Config, query: &str) -> anyhow::Result<WeatherReport> {
    tracing::debug!(query, timeout_secs = config.timeout().as_secs(), "starting lookup");
    let client = client_from_config(config)?;
    Ok(lookup(&client, &client, query).await?)
}

fn format_report(report: &WeatherReport, output: &OutputArgs) -> anyhow::Result<String> {
    if output.json {
        serde_json::to_string_pretty(report)
            .map(|json| json + "\n")
            .context("Failed to serialize report to JSON")
    } else {
        let today = chrono::Local::now().date_naive();
        Ok(render_report(report, today))
    }
}

async fn interactive(config: &Config, output: &OutputArgs) -> anyhow::Result<()> {
    println!("Enter a city to get the weather. Leave empty or press Esc to quit.");

    loop {
        let city = match Text::new("City").with_placeholder("Boulder, CO").prompt_skippable() {
            Ok(Some(city)) if !city.trim().is_empty() => city,
            Ok(_) | Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                break;
            }
            Err(e) => return Err(e).context("Failed to read city"),
        };

        // Each query is an independent lookup; failures are shown and the prompt continues.
        match fetch(config, &city).await.and_then(|r| format_report(&r, output)) {
            Ok(text) => print!("{text}"),
            Err(e) => eprintln!("Error: {e}"),
        }
    }

    Ok(())
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let city = Text::new("Default city:")
        .with_default(config.default_city())
        .with_help_message("Used when `wind` is run without a city")
        .prompt()
        .context("Failed to read default city")?;

    let timeout = CustomType::<u64>::new("HTTP timeout (seconds):")
        .with_default(config.timeout().as_secs())
        .with_error_message("Please enter a whole number of seconds")
        .prompt()
        .context("Failed to read timeout")?;

    config.set_default_city(city.trim());
    config.timeout_secs = Some(timeout);

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());

    Ok(())
}
