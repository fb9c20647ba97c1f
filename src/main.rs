//! # Bestiary Command Line
//!
//! Builds an encounter from a catalog and a saved snapshot, applies edits
//! given on the command line, and prints the difficulty report.

use bestiary::{
    config, Ability, BestiaryError, BestiaryResult, ChallengeRating, Difficulty, EncounterEngine,
    EncounterSnapshot, Feature, HeroGroup, InMemoryCatalog, MonsterCatalog, MonsterFilter,
    MonsterGroup, MonsterId, MonsterRecord, PerHeroXp, XpThresholds, XpTier,
};
use clap::{Args as ClapArgs, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
#[cfg(feature = "dev-tools")]
use tracing::{error, info};
#[cfg(feature = "dev-tools")]
use tracing_subscriber::EnvFilter;

#[cfg(not(feature = "dev-tools"))]
use log::{error, info};

/// Command line arguments for Bestiary.
#[derive(Parser, Debug)]
#[command(name = "bestiary")]
#[command(about = "Monster catalog browsing and encounter difficulty for tabletop RPGs")]
#[command(version)]
struct Args {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build an encounter and print its difficulty report
    Report(ReportArgs),
    /// List catalog monsters matching a filter
    Monsters(MonstersArgs),
    /// Print one monster's stat sheet
    Show(ShowArgs),
}

#[derive(ClapArgs, Debug)]
struct ReportArgs {
    /// Monster catalog JSON file
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Saved encounter to start from
    #[arg(short, long)]
    encounter: Option<PathBuf>,

    /// Hero group as COUNTxLEVEL; replaces the saved party (repeatable)
    #[arg(long = "hero", value_name = "COUNTxLEVEL")]
    heroes: Vec<HeroGroup>,

    /// Monster id to add to the encounter (repeatable)
    #[arg(short, long = "add", value_name = "ID")]
    add: Vec<u32>,

    /// Write the resulting encounter to this file
    #[arg(long)]
    save: Option<PathBuf>,

    /// Character budget for the summary line
    #[arg(long, default_value_t = config::DEFAULT_SUMMARY_LENGTH)]
    summary_length: usize,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(ClapArgs, Debug)]
struct MonstersArgs {
    /// Monster catalog JSON file
    #[arg(short, long)]
    catalog: PathBuf,

    /// Lowest challenge rating, e.g. 1/4
    #[arg(long)]
    min_cr: Option<ChallengeRating>,

    /// Highest challenge rating
    #[arg(long)]
    max_cr: Option<ChallengeRating>,

    /// Monster type, e.g. undead
    #[arg(long = "type")]
    monster_type: Option<String>,

    /// Size category, e.g. Large
    #[arg(long)]
    size: Option<String>,
}

#[derive(ClapArgs, Debug)]
struct ShowArgs {
    /// Monster catalog JSON file
    #[arg(short, long)]
    catalog: PathBuf,

    /// Monster id
    id: u32,
}

/// Everything the report prints, in serializable form.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    heroes: Vec<HeroGroup>,
    monsters: Vec<MonsterGroup>,
    hero_xp_thresholds: XpThresholds,
    monster_total_xp: u64,
    monster_adjusted_xp: u64,
    multiplier: f64,
    per_hero: Option<PerHeroXp>,
    difficulty: Difficulty,
    summary: String,
}

fn main() -> BestiaryResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level);

    info!("Starting Bestiary v{}", bestiary::VERSION);

    let result = match args.command {
        Command::Report(report_args) => run_report(&report_args),
        Command::Monsters(monsters_args) => run_monsters(&monsters_args),
        Command::Show(show_args) => run_show(&show_args),
    };

    if let Err(e) = &result {
        error!("{}", e);
    }
    result
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) {
    #[cfg(feature = "dev-tools")]
    {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(log_level))
            .with_target(false)
            .init();
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        env_logger::Builder::new()
            .parse_filters(log_level)
            .format_target(false)
            .init();
    }
}

/// Builds the encounter, applies command-line edits, and prints the report.
fn run_report(args: &ReportArgs) -> BestiaryResult<()> {
    let report = build_report(args)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

/// Loads or creates the encounter, applies `--hero` and `--add`, writes
/// `--save`, and collects the derived values.
fn build_report(args: &ReportArgs) -> BestiaryResult<Report> {
    let mut engine = match &args.encounter {
        Some(path) => EncounterEngine::from_snapshot(EncounterSnapshot::load(path)?)?,
        None => EncounterEngine::with_default_party(),
    };

    if !args.heroes.is_empty() {
        engine.set_hero_groups(args.heroes.clone())?;
    }

    if !args.add.is_empty() {
        let catalog_path = args.catalog.as_ref().ok_or_else(|| {
            BestiaryError::validation("adding monsters requires --catalog")
        })?;
        let catalog = InMemoryCatalog::load(catalog_path)?;
        for &id in &args.add {
            engine.add_or_increment_monster(MonsterId(id), &catalog)?;
        }
    }

    let snapshot = engine.snapshot();
    if let Some(path) = &args.save {
        snapshot.save(path)?;
    }

    Ok(Report {
        summary: snapshot.summarize(args.summary_length),
        heroes: snapshot.heroes,
        monsters: snapshot.monsters,
        hero_xp_thresholds: engine.hero_xp_thresholds(),
        monster_total_xp: engine.monster_total_xp(),
        monster_adjusted_xp: engine.monster_adjusted_xp(),
        multiplier: engine.multiplier(),
        per_hero: engine.per_hero_xp(),
        difficulty: engine.difficulty(),
    })
}

fn print_report(report: &Report) {
    println!("Heroes");
    if report.heroes.is_empty() {
        println!("  (none)");
    }
    for group in &report.heroes {
        println!("  {}", group);
    }

    println!("Monsters");
    if report.monsters.is_empty() {
        println!("  (none)");
    }
    for group in &report.monsters {
        println!(
            "  {} (CR {}, XP {}) x {}",
            group.name, group.challenge_rating, group.xp, group.count
        );
    }

    let thresholds: Vec<String> = XpTier::ALL
        .iter()
        .map(|tier| format!("{} {}", tier, report.hero_xp_thresholds[tier.index()]))
        .collect();
    println!("XP thresholds  {}", thresholds.join("  "));
    println!(
        "Monster XP     total {}  adjusted {} (x{})",
        report.monster_total_xp, report.monster_adjusted_xp, report.multiplier
    );
    match report.per_hero {
        Some(share) => println!(
            "Per hero       total {}  adjusted {}",
            share.total, share.adjusted
        ),
        None => println!("Per hero       -"),
    }
    println!("Difficulty     {}", report.difficulty);
    println!("Summary        {}", report.summary);
}

/// Lists catalog monsters matching the filter flags.
fn run_monsters(args: &MonstersArgs) -> BestiaryResult<()> {
    let matches = find_monsters(args)?;
    if matches.is_empty() {
        println!("No monsters match the filter.");
        return Ok(());
    }

    for record in matches {
        println!(
            "{:>5}  {:<32} {:<10} {:<14} CR {:<4} XP {}",
            record.id, record.name, record.size, record.monster_type, record.challenge_rating, record.xp
        );
    }
    Ok(())
}

fn monster_filter(args: &MonstersArgs) -> MonsterFilter {
    let mut filter = MonsterFilter::new();
    if let Some(min_cr) = args.min_cr {
        filter.min_cr = min_cr;
    }
    if let Some(max_cr) = args.max_cr {
        filter.max_cr = max_cr;
    }
    filter.monster_type = args.monster_type.clone();
    filter.size = args.size.clone();
    filter
}

fn find_monsters(args: &MonstersArgs) -> BestiaryResult<Vec<MonsterRecord>> {
    let catalog = InMemoryCatalog::load(&args.catalog)?;
    let matches = catalog.query(&monster_filter(args))?;
    Ok(matches.into_iter().cloned().collect())
}

/// Prints the stat sheet for one catalog monster.
fn run_show(args: &ShowArgs) -> BestiaryResult<()> {
    let catalog = InMemoryCatalog::load(&args.catalog)?;
    let record = catalog.get(MonsterId(args.id))?;
    print!("{}", stat_sheet(&record));
    Ok(())
}

fn stat_sheet(record: &MonsterRecord) -> String {
    let mut lines = vec![record.name.clone()];

    let mut kind = format!("{} {}", record.size, record.monster_type);
    if let Some(subtype) = &record.subtype {
        kind.push_str(&format!(" ({})", subtype));
    }
    lines.push(kind.trim().to_string());

    if let Some(stats) = &record.stats {
        lines.push(format!("Armor Class {}", stats.armor_class));
        lines.push(format!("Hit Points {} ({})", stats.hit_points, stats.hit_dice));
        let scores: Vec<String> = Ability::ALL
            .iter()
            .map(|&ability| {
                format!(
                    "{} {} ({})",
                    ability.abbreviation(),
                    stats.abilities.score(ability),
                    stats.abilities.modifier(ability)
                )
            })
            .collect();
        lines.push(scores.join("  "));
    }

    lines.push(format!("Challenge {} ({} XP)", record.challenge_rating, record.xp));

    let sections: [(&str, &[Feature]); 3] = [
        ("Special Abilities", &record.special_abilities),
        ("Actions", &record.actions),
        ("Legendary Actions", &record.legendary_actions),
    ];
    for (heading, features) in sections {
        if features.is_empty() {
            continue;
        }
        lines.push(String::new());
        lines.push(heading.to_string());
        lines.extend(features.iter().map(|feature| format!("  {}", feature)));
    }

    let mut sheet = lines.join("\n");
    sheet.push('\n');
    sheet
}
