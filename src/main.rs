//! moodmix - mood and scene driven playlists from the command line
//!
//! Every command prints JSON to stdout; logs go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use moodmix::config::{Paths, UserConfig};
use moodmix::core::{
    MatchOptions, MatcherConfig, PlaylistGenerator, PlaylistOptions, Recommender, SongMatcher,
    SongSearch, TagExtractor,
};
use moodmix::models::{ScoredSong, SearchKind, Tag, TagDimension, TagMatchMode};
use moodmix::plugins::{ChatCompletionTagSource, TagSource};
use moodmix::stores::Catalog;
use moodmix::utils::dates::{current_daypart, format_track_duration};

/// moodmix - mood playlists and recommendations
#[derive(Parser, Debug)]
#[command(name = "moodmix")]
#[command(version)]
#[command(about = "Turn a mood or a scene into a playlist")]
struct Args {
    /// Enable debug mode
    #[arg(long, global = true)]
    debug: bool,

    /// Path to config directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Catalog JSON file to use instead of the bundled one
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// API key for online tag extraction, overrides the settings file
    #[arg(long, global = true, env = "MOODMIX_AI_KEY", hide_env_values = true)]
    ai_key: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract tags, title and description from text
    Extract { text: String },

    /// Build a playlist from a free-text request
    Playlist {
        text: String,
        #[arg(long)]
        length: Option<usize>,
        #[arg(long)]
        diversity: Option<f64>,
    },

    /// Match songs against a comma separated tag list
    Match {
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        min_score: Option<u32>,
        #[arg(long)]
        no_shuffle: bool,
    },

    /// Personalized recommendations from a history file
    Recommend {
        #[arg(long)]
        history: PathBuf,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Daily recommendation for the current (or given) hour
    Daily {
        #[arg(long)]
        history: PathBuf,
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..24))]
        hour: Option<u32>,
    },

    /// Songs similar to a catalog song
    Similar {
        id: String,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Search the catalog
    Search {
        #[arg(default_value = "")]
        query: String,
        /// title, artist, all, genre, mood or random
        #[arg(long, default_value = "all")]
        by: String,
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// Catalog songs carrying any (or all) of the given tags
    Filter {
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,
        /// Require every tag instead of any
        #[arg(long)]
        all: bool,
    },

    /// List the tag vocabulary
    Tags {
        /// Only tags that appear in the catalog
        #[arg(long)]
        used: bool,
    },

    /// Show extraction mode and catalog size
    Status,
}

/// Listening history as stored by the caller
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct History {
    #[serde(default)]
    recently_played: Vec<String>,
    #[serde(default)]
    favorites: Vec<String>,
}

#[derive(Serialize)]
struct TagEntry {
    tag: Tag,
    dimension: &'static str,
    label: &'static str,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::new(format!("{},reqwest=warn,hyper=warn", log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    let paths = Paths::new(args.config.clone())?;
    let mut config = UserConfig::load(&paths)?;
    if let Some(key) = args.ai_key.clone() {
        config.ai_api_key = key;
    }
    debug!("Config directory: {:?}", paths.config_dir());

    let catalog = Arc::new(match &args.catalog {
        Some(path) => Catalog::from_file(path)?,
        None => Catalog::builtin()?,
    });

    run(args.command, &config, catalog).await
}

async fn run(command: Command, config: &UserConfig, catalog: Arc<Catalog>) -> Result<()> {
    let mut rng = rand::thread_rng();
    let language = config.display_language;

    match command {
        Command::Extract { text } => {
            let extractor = build_extractor(config)?;
            print_json(&extractor.extract(&text).await)
        }
        Command::Playlist {
            text,
            length,
            diversity,
        } => {
            let mut options = PlaylistOptions::from_config(config);
            if let Some(length) = length {
                options.target_length = length;
            }
            if let Some(diversity) = diversity {
                options.diversity_factor = diversity;
            }

            let generator = PlaylistGenerator::new(
                build_extractor(config)?,
                SongMatcher::new(catalog, MatcherConfig::from_config(config)),
                options,
            );
            let playlist = generator.generate(&text, &mut rng).await;
            log_songs(&playlist.result.songs);
            print_json(&playlist)
        }
        Command::Match {
            tags,
            limit,
            min_score,
            no_shuffle,
        } => {
            let matcher = SongMatcher::new(catalog, MatcherConfig::from_config(config));
            let options = MatchOptions {
                limit,
                min_score,
                shuffle_ties: no_shuffle.then_some(false),
            };
            let tags: Vec<String> = tags
                .into_iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect();
            let result = matcher.match_tags(&tags, &options, &mut rng);
            log_songs(&result.songs);
            print_json(&result)
        }
        Command::Recommend { history, limit } => {
            let history = load_history(&history)?;
            let recommender = Recommender::new(Arc::clone(&catalog), language);
            let songs = recommender.personalized(
                &catalog.resolve_ids(&history.recently_played),
                &catalog.resolve_ids(&history.favorites),
                limit,
                &mut rng,
            );
            print_json(&songs)
        }
        Command::Daily { history, hour } => {
            let history = load_history(&history)?;
            let recommender = Recommender::new(Arc::clone(&catalog), language);
            let recent = catalog.resolve_ids(&history.recently_played);
            let favorites = catalog.resolve_ids(&history.favorites);
            let daily = match hour {
                Some(hour) => recommender.daily(&recent, &favorites, hour, &mut rng),
                None => recommender.daily_now(&recent, &favorites, &mut rng),
            };
            print_json(&daily)
        }
        Command::Similar { id, limit } => {
            let matcher = SongMatcher::new(catalog, MatcherConfig::from_config(config));
            print_json(&matcher.similar_by_id(&id, limit))
        }
        Command::Search { query, by, limit } => {
            let kind = SearchKind::from_str(&by)
                .with_context(|| format!("Unknown search kind '{}'", by))?;
            let search = SongSearch::new(catalog);
            print_json(&search.search_by(kind, &query, limit, &mut rng))
        }
        Command::Filter { tags, all } => {
            let mode = if all { TagMatchMode::All } else { TagMatchMode::Any };
            let tags: Vec<Tag> = tags.iter().filter_map(|t| Tag::parse(t.trim())).collect();
            print_json(&catalog.songs_by_tags(&tags, mode))
        }
        Command::Tags { used } => {
            let tags: Vec<Tag> = if used {
                catalog.all_tags()
            } else {
                TagDimension::all()
                    .iter()
                    .flat_map(|dimension| Tag::in_dimension(*dimension))
                    .collect()
            };
            let entries: Vec<TagEntry> = tags
                .into_iter()
                .map(|tag| TagEntry {
                    tag,
                    dimension: tag.dimension().as_str(),
                    label: tag.label(language),
                })
                .collect();
            print_json(&entries)
        }
        Command::Status => {
            let extractor = build_extractor(config)?;
            print_json(&serde_json::json!({
                "extractor": extractor.status(),
                "catalogSize": catalog.len(),
                "daypart": current_daypart(),
                "displayLanguage": language,
            }))
        }
    }
}

fn build_extractor(config: &UserConfig) -> Result<TagExtractor> {
    let source = ChatCompletionTagSource::from_config(config)
        .context("Failed to set up online tag source")?
        .map(|source| Arc::new(source) as Arc<dyn TagSource>);

    if source.is_some() {
        info!("Online tag extraction enabled ({})", config.ai_model);
    }

    Ok(TagExtractor::new(
        source,
        config.ai_timeout(),
        config.display_language,
    ))
}

fn load_history(path: &Path) -> Result<History> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read history file {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse history file {:?}", path))
}

fn log_songs(songs: &[ScoredSong]) {
    for scored in songs {
        debug!(
            "[{}] {} - {} ({})",
            scored.score,
            scored.song.title,
            scored.song.artist,
            format_track_duration(scored.song.duration)
        );
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let output = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", output);
    Ok(())
}
