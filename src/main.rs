use clap::{Parser, ValueEnum};
use dialoguer::{Select, theme::ColorfulTheme};
use linkreel::{
    Asset, Config, HttpShortener, Intent, LinkResolver, QualityVariant, ResolutionEvent,
    SelectionState, load_catalog,
};
use std::error::Error;
use std::io;
use std::path::PathBuf;
use std::process::{self, Command, Stdio};

#[derive(Parser)]
#[command(
    name = "linkreel",
    version,
    about = "Browse a movie and series catalog and resolve shortened download or player links"
)]
struct Cli {
    /// Path to the catalog JSON file
    catalog: PathBuf,

    /// How the resolved link should be presented
    #[arg(long, value_enum, default_value_t = IntentArg::Download)]
    intent: IntentArg,

    /// Open the resolved link with the system opener
    #[arg(long)]
    open: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum IntentArg {
    /// Produce a direct download link
    Download,
    /// Produce a deep link into an external player
    Play,
}

impl From<IntentArg> for Intent {
    fn from(arg: IntentArg) -> Self {
        match arg {
            IntentArg::Download => Intent::Download,
            IntentArg::Play => Intent::Play,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = Config::from_env()?;
    let assets = load_catalog(&cli.catalog)?;

    if assets.is_empty() {
        eprintln!("Catalog is empty: {}", cli.catalog.display());
        process::exit(1);
    }

    // Pick an asset from the catalog
    let titles: Vec<String> = assets
        .iter()
        .map(|a| {
            let kind = if a.is_series() { "series" } else { "movie" };
            format!("{} [{}]", a.title, kind)
        })
        .collect();
    let index = select("Select a title", &titles)?;
    let asset = &assets[index];

    // Narrow down to one quality variant
    let variant = if asset.is_series() {
        pick_series_variant(asset)?
    } else {
        pick_movie_variant(asset)?
    };

    let Some(variant) = variant else {
        eprintln!("No downloadable variants available for \"{}\".", asset.title);
        process::exit(1);
    };

    // Resolve the variant into a final URL
    let shortener = HttpShortener::new(config.api_url, config.api_key);
    let resolver = LinkResolver::new(config.base_url, shortener);
    let resolved = resolver.resolve_with_events(variant, cli.intent.into(), handle_resolution_event);

    println!("{}", resolved.url);

    if cli.open {
        open_in_browser(&resolved.url)?;
    }

    Ok(())
}

/// Handles resolution progress events and prints status output
fn handle_resolution_event(event: ResolutionEvent) {
    match event {
        ResolutionEvent::Started { quality } => {
            eprintln!("Resolving {} link...", quality);
        }
        ResolutionEvent::ShorteningFailed { reason, .. } => {
            eprintln!("Could not shorten the link ({}), using the direct link.", reason);
        }
        ResolutionEvent::Finished { .. } => {}
    }
}

/// Walks the season -> episode -> quality cascade for a series asset
///
/// Every pick only offers options that are currently visible on the
/// selection state, so the cascade cannot be driven out of order.
fn pick_series_variant(asset: &Asset) -> Result<Option<&QualityVariant>, Box<dyn Error>> {
    let state = SelectionState::new(asset)?;

    let seasons = state.season_numbers();
    if seasons.is_empty() {
        return Ok(None);
    }
    let items: Vec<String> = seasons.iter().map(|n| format!("Season {}", n)).collect();
    let state = state.choose_season(seasons[select("Select season", &items)?])?;

    let episodes = state.episode_numbers();
    if episodes.is_empty() {
        return Ok(None);
    }
    let items: Vec<String> = episodes.iter().map(|n| format!("Episode {}", n)).collect();
    let state = state.choose_episode(episodes[select("Select episode", &items)?])?;

    let qualities: Vec<String> = state
        .visible_variants()
        .iter()
        .map(|v| v.quality.clone())
        .collect();
    if qualities.is_empty() {
        return Ok(None);
    }
    let state = state.choose_quality(&qualities[select("Select quality", &qualities)?])?;

    Ok(state.current_variant())
}

/// Offers the flat quality list of a movie asset
fn pick_movie_variant(asset: &Asset) -> Result<Option<&QualityVariant>, Box<dyn Error>> {
    if asset.variants.is_empty() {
        return Ok(None);
    }

    let labels: Vec<&str> = asset.variants.iter().map(|v| v.quality.as_str()).collect();
    let index = select("Select quality", &labels)?;
    Ok(asset.variants.get(index))
}

/// Prompts the user to pick one of the given items
fn select<T: std::fmt::Display>(prompt: &str, items: &[T]) -> Result<usize, dialoguer::Error> {
    Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()
}

/// Opens the URL with the platform opener in a detached child process
fn open_in_browser(url: &str) -> io::Result<()> {
    let mut command = if cfg!(target_os = "windows") {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]).arg(url);
        c
    } else if cfg!(target_os = "macos") {
        let mut c = Command::new("open");
        c.arg(url);
        c
    } else {
        let mut c = Command::new("xdg-open");
        c.arg(url);
        c
    };

    command.stdout(Stdio::null()).stderr(Stdio::null()).spawn()?;
    Ok(())
}
