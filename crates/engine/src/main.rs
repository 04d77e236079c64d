//! Charsheet Engine - demo session against the in-memory adapters.

use std::collections::BTreeMap;
use std::sync::Arc;

use charsheet_domain::{
    CheckResult, InventoryLine, Item, ItemCategory, LevelUpRequest, StatUpdate, UserId,
};
use charsheet_engine::infrastructure::memory::{
    InMemoryCharacterRepo, InMemoryInventoryRepo, InMemoryStatusEffectCatalog,
};
use charsheet_engine::infrastructure::random::SystemRandom;
use charsheet_engine::infrastructure::settings::{load_dotenv_from_repo_root, RulesSettings};
use charsheet_engine::use_cases::character::{CreateCharacterRequest, HealRequest};
use charsheet_engine::App;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "charsheet_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = RulesSettings::from_env();
    let rules = settings.rest_rules()?;
    tracing::info!(
        stamina_die = %rules.stamina_die,
        composure_die = %rules.composure_die,
        "Starting Charsheet Engine demo"
    );

    let inventory = Arc::new(InMemoryInventoryRepo::new());
    let characters = Arc::new(InMemoryCharacterRepo::new(inventory.clone()));
    let catalog = Arc::new(InMemoryStatusEffectCatalog::with_emotions());
    let app = App::new(
        characters,
        inventory.clone(),
        catalog,
        Arc::new(SystemRandom::new()),
        rules,
    );
    let uc = &app.use_cases.character;
    let owner = UserId::new();

    let hero = uc
        .create
        .execute(
            owner,
            &CreateCharacterRequest {
                name: "Vera Lind".to_string(),
                skills: BTreeMap::from([
                    ("endurance".to_string(), 6),
                    ("self_control".to_string(), 7),
                    ("dexterity".to_string(), 5),
                    ("medicine".to_string(), 4),
                ]),
                branches: BTreeMap::from([("medic".to_string(), 2), ("scout".to_string(), 1)]),
            },
        )
        .await?;
    let id = hero.id();
    print_json("created", &hero)?;

    uc.update_stats
        .execute(
            id,
            owner,
            &StatUpdate {
                experience_points: Some(350),
                current_hp: Some(3),
                ..Default::default()
            },
        )
        .await?;

    let leveled = uc
        .level_up
        .execute(
            id,
            owner,
            &LevelUpRequest {
                hp_roll: 5,
                branch: "medic".to_string(),
                skill_points: BTreeMap::from([
                    ("medicine".to_string(), 2),
                    ("self_control".to_string(), 1),
                ]),
            },
        )
        .await?;
    print_json("level up", &leveled.summary)?;

    uc.update_stats
        .execute(
            id,
            owner,
            &StatUpdate {
                current_hp: Some(4),
                ..Default::default()
            },
        )
        .await?;
    let rested = uc.short_rest.execute(id, owner, 1).await?;
    print_json("short rest", &rested.outcome.breakdown())?;

    let medkit = inventory.add_line(
        &rested.character,
        InventoryLine::new(
            Item::new(
                "Field medkit",
                ItemCategory::General {
                    effect_formula: Some("2d4+Mod.Medicine".to_string()),
                },
            ),
            2,
        ),
    );
    let healed = uc
        .heal
        .execute(
            id,
            owner,
            &HealRequest::Medkit {
                inventory_item_id: medkit,
            },
        )
        .await?;
    println!("heal: +{} HP ({})", healed.healed, healed.breakdown);

    let shaken = uc
        .update_stats
        .execute(
            id,
            owner,
            &StatUpdate {
                current_pu: Some(0),
                check_result: Some(CheckResult::Failure),
                ..Default::default()
            },
        )
        .await?;
    println!(
        "composure check failed: {}",
        shaken.triggered_emotion.as_deref().unwrap_or("no new emotion")
    );

    let long = uc.long_rest.execute(id, owner).await?;
    print_json("long rest", &long.outcome)?;

    let sheet = uc.sheet.execute(id, owner).await?;
    print_json("sheet", &sheet)?;

    Ok(())
}

fn print_json(label: &str, value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{label}: {}", serde_json::to_string_pretty(value)?);
    Ok(())
}
