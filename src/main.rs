use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};

use jiuzhou_site::context::Site;
use jiuzhou_site::data::RecordKind;
use jiuzhou_site::models::{AttendanceRecord, ContributionRecord, Language};
use jiuzhou_site::store::JsonFileStore;
use jiuzhou_site::view::{RenderedView, SeasonRecord, Selection};
use jiuzhou_site::{check, config, data, pages, report};

#[derive(Parser)]
#[command(name = "jiuzhou-site")]
#[command(about = "Members, attendance and contribution rankings for the Jiuzhou guild", long_about = None)]
struct Cli {
    /// Directory holding members.json, attendance.json and contribution.json
    #[arg(long, global = true, env = "JIUZHOU_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Preference store file
    #[arg(long, global = true, env = "JIUZHOU_STORE", default_value = config::DEFAULT_STORE_PATH)]
    store: PathBuf,

    /// Language for this run only; the stored preference is left alone
    #[arg(long, global = true)]
    lang: Option<Language>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Html,
}

#[derive(Subcommand)]
enum Commands {
    /// List members grouped by role
    Members,
    /// Show attendance for a season
    Attendance {
        #[arg(long)]
        season: Option<String>,
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Show the contribution ranking for a season
    Contribution {
        #[arg(long)]
        season: Option<String>,
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Show or persist the display language
    Lang {
        /// zh or en; omit to print the current setting
        code: Option<Language>,
        /// Switch to the other language
        #[arg(long, conflicts_with = "code")]
        toggle: bool,
    },
    /// Write static HTML pages for both languages
    Build {
        #[arg(long, default_value = "site")]
        out: PathBuf,
    },
    /// Append records from a CSV file to a season
    Import {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long)]
        season: String,
        #[arg(long, value_enum)]
        kind: RecordKind,
    },
    /// Write sample data files
    Seed {
        /// Overwrite existing data files
        #[arg(long)]
        force: bool,
    },
    /// Report data problems that rendering would silently absorb
    Check,
}

fn print_season_view<R: SeasonRecord>(
    page: pages::Page,
    view: &RenderedView,
    lang: Language,
    format: Format,
) {
    match format {
        Format::Text => print!("{}", report::build_table_report(&page.title(), view, lang)),
        Format::Html => print!(
            "{}",
            pages::season_section_html(page, R::COLUMNS, view, lang)
        ),
    }
}

async fn load_site(
    data_dir: &Path,
    store_path: &Path,
    lang: Option<Language>,
) -> Site<JsonFileStore> {
    let site_data = data::load_site_data(data_dir).await;
    let mut site = Site::setup(site_data, JsonFileStore::open(store_path));
    if let Some(lang) = lang {
        site.use_language(lang);
    }
    site
}

fn finish(site: Site<JsonFileStore>) {
    let store = site.teardown();
    debug!(store = %store.path().display(), "site released");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config::DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let data_dir = config::data_dir_or_default(cli.data_dir);
    info!(data_dir = %data_dir.display(), "using data directory");

    match cli.command {
        Commands::Members => {
            let site = load_site(&data_dir, &cli.store, cli.lang).await;
            print!("{}", report::build_members_report(&site.members(), site.language()));
            finish(site);
        }
        Commands::Attendance {
            season,
            search,
            format,
        } => {
            let site = load_site(&data_dir, &cli.store, cli.lang).await;
            let view = site.attendance(&Selection::new(season.as_deref(), &search));
            print_season_view::<AttendanceRecord>(
                pages::Page::Attendance,
                &view,
                site.language(),
                format,
            );
            finish(site);
        }
        Commands::Contribution {
            season,
            search,
            format,
        } => {
            let site = load_site(&data_dir, &cli.store, cli.lang).await;
            let view = site.contribution(&Selection::new(season.as_deref(), &search));
            print_season_view::<ContributionRecord>(
                pages::Page::Contribution,
                &view,
                site.language(),
                format,
            );
            finish(site);
        }
        Commands::Lang { code, toggle } => {
            let mut site = load_site(&data_dir, &cli.store, cli.lang).await;
            if toggle {
                let lang = site.toggle_language().context("failed to save language")?;
                println!("Language set to {lang}.");
            } else if let Some(lang) = code {
                site.set_language(lang).context("failed to save language")?;
                println!("Language set to {lang}.");
            } else {
                println!("{}", site.language());
            }
            finish(site);
        }
        Commands::Build { out } => {
            let site = load_site(&data_dir, &cli.store, cli.lang).await;
            let written = pages::build_site(&site, &out)
                .await
                .with_context(|| format!("failed to build site into {}", out.display()))?;
            println!("Wrote {} pages to {}.", written.len(), out.display());
            finish(site);
        }
        Commands::Import { csv, season, kind } => {
            let inserted = data::import_records(&data_dir, kind, &csv, &season)
                .await
                .with_context(|| format!("failed to import {}", csv.display()))?;
            println!("Inserted {inserted} records from {} into {season}.", csv.display());
        }
        Commands::Seed { force } => {
            let written = data::seed(&data_dir, force)
                .await
                .with_context(|| format!("failed to seed {}", data_dir.display()))?;
            if written.is_empty() {
                println!("Data files already present in {}.", data_dir.display());
            } else {
                println!("Seed data written to {}.", data_dir.display());
            }
        }
        Commands::Check => {
            let findings = check::check_data(&data_dir).await;
            print!("{}", check::format_findings(&findings));
        }
    }

    Ok(())
}
