//! Loading and saving the demo catalog and encounter files.

use bestiary::{
    BestiaryResult, ChallengeRating, Difficulty, EncounterEngine, EncounterSnapshot,
    InMemoryCatalog, MonsterCatalog, MonsterFilter, MonsterId,
};
use std::path::PathBuf;

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos").join(name)
}

#[test]
fn test_demo_catalog_loads() -> BestiaryResult<()> {
    let catalog = InMemoryCatalog::load(demo("monsters.json"))?;

    assert_eq!(catalog.len(), 14);
    let owlbear = catalog.get(MonsterId(196))?;
    assert_eq!(owlbear.name, "Owlbear");
    assert_eq!(owlbear.stats.map(|s| s.armor_class), Some(13));
    assert_eq!(owlbear.actions.len(), 3);
    assert_eq!(catalog.iter().next().map(|r| r.name.as_str()), Some("Acolyte"));
    assert!(catalog.types().contains(&"undead"));
    assert_eq!(catalog.sizes().first(), Some(&"Tiny"));
    Ok(())
}

#[test]
fn test_demo_catalog_low_cr_undead() -> BestiaryResult<()> {
    let catalog = InMemoryCatalog::load(demo("monsters.json"))?;
    let filter = MonsterFilter::new()
        .with_cr_range(ChallengeRating::ZERO, ChallengeRating::new(1.0)?)
        .with_type("undead");

    let names: Vec<_> = catalog.query(&filter)?.into_iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Skeleton", "Warhorse Skeleton"]);
    Ok(())
}

#[test]
fn test_demo_encounter_is_deadly() -> BestiaryResult<()> {
    let engine = EncounterEngine::from_snapshot(EncounterSnapshot::load(demo("encounter.json"))?)?;

    assert_eq!(engine.monster_adjusted_xp(), 23300);
    assert_eq!(engine.difficulty(), Difficulty::Deadly);
    Ok(())
}

#[test]
fn test_save_and_load_round_trip() -> BestiaryResult<()> {
    let catalog = InMemoryCatalog::load(demo("monsters.json"))?;
    let mut engine = EncounterEngine::with_default_party();
    for id in [93, 93, 93, 241] {
        engine.add_or_increment_monster(MonsterId(id), &catalog)?;
    }

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("encounter.json");
    engine.snapshot().save(&path)?;

    let restored = EncounterEngine::from_snapshot(EncounterSnapshot::load(&path)?)?;
    assert_eq!(restored, engine);
    assert_eq!(restored.snapshot().summary(), "Heroes x 4 vs. Goblin x 3, Troll x 1");
    Ok(())
}

#[test]
fn test_missing_file_is_io_error() {
    let result = InMemoryCatalog::load(demo("does-not-exist.json"));
    assert!(matches!(result, Err(bestiary::BestiaryError::Io(_))));
}
