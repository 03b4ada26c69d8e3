use chrono::Local;
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::amap::{AmapClient, ClientConfig, PoiQuery, RouteOptions, TransportMode, WeatherKind};
use crate::config::SettingsStore;
use crate::coords::Coordinate;
use crate::credential::{self, ApiKey, TerminalPrompt};
use crate::error::{AmapError, Result};
use crate::format;
use crate::travel::{self, TravelPlan};

const AMAP_SERVICE: &str = "amap";

#[derive(Debug, Parser)]
#[command(name = "amap-travel")]
#[command(author, version, about = "Amap geocoding, POI search, route planning and travel guides", long_about = None)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Settings file (default: ~/.config/travel-planner/config.json)
    #[arg(long, global = true, env = "TRAVEL_PLANNER_CONFIG")]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Convert an address to coordinates, or coordinates to an address
    ///
    /// Example: amap-travel geocode --address "北京市朝阳区阜通东大街6号" --city 北京市
    /// Example: amap-travel geocode --longitude 116.481485 --latitude 39.990464
    Geocode(GeocodeArgs),

    /// Search points of interest by keyword
    ///
    /// Example: amap-travel poi --keywords 餐厅 --city 北京市 --radius 2000
    Poi(PoiArgs),

    /// Locate an IP address
    Ip {
        /// IP address to locate
        #[arg(long)]
        ip: String,
    },

    /// Plan a route between two locations
    ///
    /// Locations are either addresses or "longitude,latitude".
    /// Example: amap-travel route --origin 北京市 --destination "121.473701,31.230416" --mode driving
    /// Example: amap-travel route --origin 阜通东大街6号 --destination 望京SOHO --mode walking --geocode-city 北京市
    Route(RouteArgs),

    /// Weather forecast for a city (name or adcode)
    Weather {
        #[arg(long)]
        city: String,

        /// Current conditions instead of the forecast
        #[arg(long)]
        live: bool,
    },

    /// Manage stored API keys
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate a Markdown travel guide from a JSON travel plan
    Guide {
        /// Travel plan JSON file
        #[arg(short, long)]
        input: PathBuf,

        /// Output path (default: travel_guide_{destination}_{start_date}.md)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fetch the destination forecast from Amap when the plan has none
        #[arg(long)]
        with_weather: bool,
    },
}

#[derive(Debug, Args)]
pub struct GeocodeArgs {
    /// Address string to geocode
    #[arg(long, conflicts_with_all = ["longitude", "latitude"], required_unless_present_all = ["longitude", "latitude"])]
    pub address: Option<String>,

    /// City name (optional, improves accuracy)
    #[arg(long, requires = "address")]
    pub city: Option<String>,

    /// Longitude for reverse geocoding
    #[arg(long, requires = "latitude", allow_negative_numbers = true)]
    pub longitude: Option<f64>,

    /// Latitude for reverse geocoding
    #[arg(long, requires = "longitude", allow_negative_numbers = true)]
    pub latitude: Option<f64>,
}

#[derive(Debug, Args)]
pub struct PoiArgs {
    #[arg(long)]
    pub keywords: String,

    #[arg(long)]
    pub city: String,

    /// Center longitude (defaults to the city center)
    #[arg(long, requires = "latitude", allow_negative_numbers = true)]
    pub longitude: Option<f64>,

    /// Center latitude (defaults to the city center)
    #[arg(long, requires = "longitude", allow_negative_numbers = true)]
    pub latitude: Option<f64>,

    /// Search radius in meters
    #[arg(long, default_value_t = crate::amap::poi::DEFAULT_RADIUS)]
    pub radius: u32,

    /// Maximum number of results to display
    #[arg(long, default_value_t = 10)]
    pub limit: usize,
}

#[derive(Debug, Args)]
pub struct RouteArgs {
    /// Start location (address or "longitude,latitude")
    #[arg(long)]
    pub origin: String,

    /// End location (address or "longitude,latitude")
    #[arg(long)]
    pub destination: String,

    /// driving, walking, cycling, ebicycle or transit
    #[arg(long)]
    pub mode: String,

    /// Transit departure city (default: 全国)
    #[arg(long)]
    pub city: Option<String>,

    /// Transit arrival city (default: 全国)
    #[arg(long)]
    pub cityd: Option<String>,

    /// City hint used when geocoding address origins/destinations
    #[arg(long)]
    pub geocode_city: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Store an API key in the settings file
    SetKey {
        key: String,

        #[arg(long, default_value = AMAP_SERVICE)]
        service: String,
    },

    /// Show which API keys are configured
    Check,
}

fn settings_store(cli_path: Option<&PathBuf>) -> Result<SettingsStore> {
    match cli_path {
        Some(path) => Ok(SettingsStore::new(path.clone())),
        None => SettingsStore::default_location(),
    }
}

/// 进程内只解析一次 Key，之后随 client 传递
fn connect(settings: Option<&PathBuf>) -> Result<AmapClient> {
    let stored = || match settings_store(settings).and_then(|s| s.get_api_key(AMAP_SERVICE)) {
        Ok(key) => key,
        Err(e) => {
            log::warn!("读取配置文件失败，忽略: {}", e);
            None
        }
    };
    let api_key = credential::resolve(credential::env_value(), stored, &mut TerminalPrompt)?;
    AmapClient::new(api_key, ClientConfig::from_env())
}

fn geocode(client: &AmapClient, args: &GeocodeArgs) -> Result<String> {
    match (&args.address, args.longitude, args.latitude) {
        (Some(address), _, _) => {
            let result = client.geocode(address, args.city.as_deref())?;
            Ok(format::format_geocode(&result))
        }
        (None, Some(lon), Some(lat)) => {
            let result = client.reverse_geocode(Coordinate::new(lon, lat))?;
            Ok(format::format_regeocode(&result))
        }
        _ => Err(AmapError::Config(
            "Please provide either --address OR both --longitude and --latitude".to_string(),
        )),
    }
}

fn poi(client: &AmapClient, args: &PoiArgs) -> Result<String> {
    let mut query = PoiQuery::new(args.keywords.clone(), args.city.clone());
    query.radius = args.radius;
    if let (Some(lon), Some(lat)) = (args.longitude, args.latitude) {
        query.center = Some(Coordinate::new(lon, lat));
    }
    let result = client.search_poi(&query)?;
    Ok(format::format_pois(&result, args.limit))
}

fn route(client: &AmapClient, args: &RouteArgs, mode: TransportMode) -> Result<String> {
    let mut options = RouteOptions::default();
    if let Some(city) = &args.city {
        options.city = city.clone();
    }
    if let Some(cityd) = &args.cityd {
        options.city_destination = cityd.clone();
    }
    options.geocode_city = args.geocode_city.clone();

    let result = client.plan_route_with_mode(&args.origin, &args.destination, mode, &options)?;
    Ok(format!(
        "\n{} Route Result:\n{}\n{}",
        mode.display_name(),
        "=".repeat(50),
        format::format_route(&result)
    ))
}

fn config(store: &SettingsStore, action: &ConfigAction) -> Result<String> {
    match action {
        ConfigAction::SetKey { key, service } => {
            let key = key.trim();
            if key.is_empty() {
                return Err(AmapError::EmptyCredential);
            }
            let key = ApiKey::new(key);
            store.set_api_key(service, &key)?;
            Ok(format!("Saved {} key {} to {}", service, key.preview(), store.path().display()))
        }
        ConfigAction::Check => {
            let lines: Vec<String> = store
                .check_api_keys()?
                .into_iter()
                .map(|s| {
                    if s.configured {
                        format!("{:<8} configured ({})  {}", s.service, s.key_preview, s.name)
                    } else {
                        format!("{:<8} missing  {}", s.service, s.name)
                    }
                })
                .collect();
            Ok(lines.join("\n"))
        }
    }
}

fn guide(
    settings: Option<&PathBuf>,
    input: &Path,
    output: Option<&Path>,
    with_weather: bool,
) -> Result<String> {
    let mut plan = TravelPlan::from_file(input)?;

    if with_weather && plan.weather.is_none() {
        let destination = plan
            .destination
            .as_ref()
            .map(|d| d.0.clone())
            .filter(|d| !d.is_empty())
            .ok_or_else(|| AmapError::Config("travel plan has no destination".to_string()))?;
        let client = connect(settings)?;
        plan.weather = Some(client.weather(&destination, WeatherKind::Forecast)?);
    }

    let path = travel::write_markdown(&plan, output, Local::now().naive_local())?;
    Ok(format!("Generated: {}", path.display()))
}

pub fn execute(cli: &Cli, out: &mut dyn Write) -> Result<()> {
    let settings = cli.settings.as_ref();

    let text = match &cli.command {
        Commands::Config { action } => config(&settings_store(settings)?, action)?,
        Commands::Guide {
            input,
            output,
            with_weather,
        } => guide(settings, input, output.as_deref(), *with_weather)?,
        Commands::Route(args) => {
            // 未知出行方式在解析 Key 之前就失败
            let mode: TransportMode = args.mode.parse()?;
            route(&connect(settings)?, args, mode)?
        }
        Commands::Geocode(args) => geocode(&connect(settings)?, args)?,
        Commands::Poi(args) => poi(&connect(settings)?, args)?,
        Commands::Ip { ip } => {
            let location = connect(settings)?.locate_ip(ip)?;
            format::format_ip_location(ip, &location)
        }
        Commands::Weather { city, live } => {
            let kind = if *live {
                WeatherKind::Live
            } else {
                WeatherKind::Forecast
            };
            format::format_weather(&connect(settings)?.weather(city, kind)?)
        }
    };

    writeln!(out, "{}", text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_geocode_address_and_coordinates_conflict() {
        let result = Cli::try_parse_from([
            "amap-travel", "geocode", "--address", "北京市", "--longitude", "116.4", "--latitude", "39.9",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_geocode_requires_one_form() {
        assert!(Cli::try_parse_from(["amap-travel", "geocode"]).is_err());
        assert!(Cli::try_parse_from(["amap-travel", "geocode", "--longitude", "116.4"]).is_err());

        let cli = Cli::try_parse_from([
            "amap-travel", "geocode", "--longitude", "-73.98", "--latitude", "40.75",
        ])
        .unwrap();
        match cli.command {
            Commands::Geocode(args) => {
                assert_eq!(args.longitude, Some(-73.98));
                assert!(args.address.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_poi_coordinates_together() {
        assert!(Cli::try_parse_from([
            "amap-travel", "poi", "--keywords", "餐厅", "--city", "北京市", "--latitude", "39.9",
        ])
        .is_err());

        let cli = Cli::try_parse_from(["amap-travel", "poi", "--keywords", "餐厅", "--city", "北京市"]).unwrap();
        match cli.command {
            Commands::Poi(args) => {
                assert_eq!(args.radius, 1000);
                assert_eq!(args.limit, 10);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_route_geocode_city_hint() {
        let cli = Cli::try_parse_from([
            "amap-travel", "route", "--origin", "阜通东大街6号", "--destination", "116.41,39.91",
            "--mode", "walking", "--geocode-city", "北京市",
        ])
        .unwrap();
        match cli.command {
            Commands::Route(args) => {
                assert_eq!(args.geocode_city.as_deref(), Some("北京市"));
                assert!(args.city.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_mode_fails_before_credentials() {
        let cli = Cli::try_parse_from([
            "amap-travel", "route", "--origin", "北京市", "--destination", "上海市", "--mode", "flying",
        ])
        .unwrap();
        let mut out = Vec::new();
        let err = execute(&cli, &mut out).unwrap_err();
        assert!(matches!(err, AmapError::InvalidMode(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_config_commands_use_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let path_arg = path.to_str().unwrap();

        let cli = Cli::try_parse_from([
            "amap-travel", "--settings", path_arg, "config", "set-key", "abcd1234efgh",
        ])
        .unwrap();
        let mut out = Vec::new();
        execute(&cli, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("abcd..."));
        assert!(!text.contains("abcd1234efgh"));

        let cli = Cli::try_parse_from(["amap-travel", "--settings", path_arg, "config", "check"]).unwrap();
        let mut out = Vec::new();
        execute(&cli, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("amap     configured (abcd...)"));
        assert!(text.contains("weather  missing"));
    }

    #[test]
    fn test_guide_without_weather_needs_no_key() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("plan.json");
        let output = dir.path().join("guide.md");
        std::fs::write(&input, r#"{"title": "杭州旅游攻略", "destination": "杭州"}"#).unwrap();

        let cli = Cli::try_parse_from([
            "amap-travel",
            "guide",
            "--input",
            input.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ])
        .unwrap();
        let mut out = Vec::new();
        execute(&cli, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("Generated: "));
        assert!(std::fs::read_to_string(&output).unwrap().starts_with("# 杭州旅游攻略"));
    }
}
