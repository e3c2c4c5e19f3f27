use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{info, warn};

use ev_reach::analysis::{AnalysisRequest, ErrorKind, RouteAnalyzer, StationBackend};
use ev_reach::autobahn::{AutobahnClient, AutobahnConfig, MockStationSource};
use ev_reach::cache::{CacheConfig, CachedGeocoder, CachedStationSource};
use ev_reach::config::{API_KEY_VAR, Settings};
use ev_reach::directions::{DirectionsConfig, GoogleDirectionsClient};
use ev_reach::geocode::{NominatimClient, NominatimConfig};
use ev_reach::history::JsonLinesRouteLog;

/// Check whether an electric vehicle can drive between two cities along a
/// motorway, and report the stretches that are out of range.
#[derive(Parser, Debug)]
#[command(name = "ev-reach", version)]
struct Cli {
    /// Origin city
    #[arg(long)]
    from: String,

    /// Destination city
    #[arg(long)]
    to: String,

    /// Motorway identifier, e.g. A2
    #[arg(long)]
    road: String,

    /// Distance the vehicle can still travel, in km
    #[arg(long)]
    current_range: f64,

    /// Range after a full charge, in km (defaults to EV_REACH_DEFAULT_MAX_RANGE_KM or 400)
    #[arg(long)]
    max_range: Option<f64>,

    /// Read station listings from `{ROAD}.json` files in this directory instead of the Autobahn API
    #[arg(long, value_name = "DIR")]
    station_fixtures: Option<PathBuf>,

    /// Append the outcome to this history file
    #[arg(long, value_name = "PATH")]
    history: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(exit_status(None));
        }
    };

    let analyzer = match build_analyzer(&cli, &settings) {
        Ok(analyzer) => analyzer,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(exit_status(None));
        }
    };

    let mut request = AnalysisRequest::new(&cli.from, &cli.to, &cli.road, cli.current_range);
    request.max_range_km = cli.max_range;

    match analyzer.analyze(request).await {
        Ok(report) => match serde_json::to_string_pretty(&report) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("error: failed to serialize report: {e}");
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(exit_status(Some(e.kind())))
        }
    }
}

/// Process exit status for a failure: 2 when the request was at fault, 1 for
/// everything else, including configuration and start-up failures (`None`).
fn exit_status(kind: Option<ErrorKind>) -> u8 {
    match kind {
        Some(kind) if kind.is_user_error() => 2,
        _ => 1,
    }
}

type Analyzer = RouteAnalyzer<
    CachedGeocoder<NominatimClient>,
    GoogleDirectionsClient,
    StationBackend,
    JsonLinesRouteLog,
>;

fn build_analyzer(
    cli: &Cli,
    settings: &Settings,
) -> Result<Analyzer, Box<dyn std::error::Error>> {
    let timeout_secs = settings.request_timeout.as_secs();
    let cache_config = CacheConfig::default();

    let mut nominatim_config = NominatimConfig::new().with_timeout(timeout_secs);
    if let Some(url) = &settings.nominatim_url {
        nominatim_config = nominatim_config.with_base_url(url);
    }
    let geocoder = CachedGeocoder::new(NominatimClient::new(nominatim_config)?, &cache_config);

    let api_key = settings.api_key.clone().unwrap_or_else(|| {
        warn!("{API_KEY_VAR} not set; route lookups will fail");
        String::new()
    });
    let mut directions_config = DirectionsConfig::new(api_key).with_timeout(timeout_secs);
    if let Some(url) = &settings.directions_url {
        directions_config = directions_config.with_base_url(url);
    }
    let directions = GoogleDirectionsClient::new(directions_config)?;

    let stations = match &cli.station_fixtures {
        Some(dir) => {
            let mock = MockStationSource::new(dir)?;
            info!(
                dir = %dir.display(),
                roads = mock.available_roads().len(),
                "using station fixtures"
            );
            StationBackend::Fixtures(mock)
        }
        None => {
            let mut autobahn_config = AutobahnConfig::new().with_timeout(timeout_secs);
            if let Some(url) = &settings.autobahn_url {
                autobahn_config = autobahn_config.with_base_url(url);
            }
            StationBackend::Live(CachedStationSource::new(
                AutobahnClient::new(autobahn_config)?,
                &cache_config,
            ))
        }
    };

    let history_path = cli
        .history
        .clone()
        .unwrap_or_else(|| settings.history_path.clone());
    let log = JsonLinesRouteLog::new(history_path);

    Ok(RouteAnalyzer::new(
        geocoder,
        directions,
        stations,
        log,
        settings.analysis.clone(),
    )
    .with_timeout(settings.request_timeout))
}
