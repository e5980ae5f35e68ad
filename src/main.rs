//! Quest Chronicles command line
//!
//! Each subcommand loads one character, makes one change, and saves it.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use quest_chronicles::combat::{Battle, BattleState, Enemy};
use quest_chronicles::data::{ItemRegistry, ItemType, create_default_data_files};
use quest_chronicles::inventory::EquipSlot;
use quest_chronicles::quest::QuestRegistry;
use quest_chronicles::store::{CharacterStore, FileStore};
use quest_chronicles::{Character, GameConfig, GameError, Result};

/// Quest Chronicles - a text adventure RPG
#[derive(Parser, Debug)]
#[command(name = "quest-chronicles")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(short, long, default_value = "quest_chronicles.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a character (Warrior, Mage, Rogue or Cleric)
    New { name: String, class: String },
    /// List saved characters
    List,
    /// Print a character sheet as JSON
    Show { name: String },
    /// Delete a saved character
    Delete { name: String },
    /// Fight one battle with basic attacks
    Fight {
        name: String,
        /// goblin, orc or dragon; matched to level when omitted
        #[arg(short, long)]
        enemy: Option<String>,
    },
    /// Show active, completed and available quests
    Quests { name: String },
    Accept { name: String, quest: String },
    Complete { name: String, quest: String },
    Abandon { name: String, quest: String },
    Buy { name: String, item: String },
    Sell { name: String, item: String },
    Use { name: String, item: String },
    /// Equip a weapon or armor from the inventory
    Equip { name: String, item: String },
    /// Empty a slot (weapon or armor)
    Unequip { name: String, slot: String },
    /// Bring a dead character back at half health
    Revive { name: String },
}

struct Game {
    config: GameConfig,
    store: FileStore,
}

impl Game {
    fn items(&self) -> Result<ItemRegistry> {
        create_default_data_files(&self.config)?;
        ItemRegistry::load_from_file(&self.config.items_path())
    }

    fn quests(&self) -> Result<QuestRegistry> {
        create_default_data_files(&self.config)?;
        QuestRegistry::load_from_file(&self.config.quests_path())
    }

    /// Load `name`, apply `f`, save, and print what `f` reported
    fn update<F>(&self, name: &str, f: F) -> Result<()>
    where
        F: FnOnce(&mut Character) -> Result<String>,
    {
        let mut character = self.store.load(name)?;
        let message = f(&mut character)?;
        self.store.save(&character)?;
        println!("{}", message);
        Ok(())
    }

    fn run(&self, command: Command) -> Result<()> {
        match command {
            Command::New { name, class } => {
                if self.store.list().contains(&name) {
                    return Err(GameError::InvalidSaveData(format!("{} already exists", name)));
                }
                let character = Character::create(&name, &class)?;
                self.store.save(&character)?;
                println!("Created {} the {}.", character.name, character.class);
            }
            Command::List => {
                for name in self.store.list() {
                    println!("{}", name);
                }
            }
            Command::Show { name } => {
                let character = self.store.load(&name)?;
                let json = serde_json::to_string_pretty(&character).map_err(std::io::Error::from)?;
                println!("{}", json);
            }
            Command::Delete { name } => {
                self.store.delete(&name)?;
                println!("Deleted {}.", name);
            }
            Command::Fight { name, enemy } => self.fight(&name, enemy.as_deref())?,
            Command::Quests { name } => self.show_quests(&name)?,
            Command::Accept { name, quest } => {
                let quests = self.quests()?;
                self.update(&name, |c| {
                    c.accept_quest(&quest, &quests)?;
                    Ok(format!("Accepted quest '{}'.", quest))
                })?;
            }
            Command::Complete { name, quest } => {
                let quests = self.quests()?;
                self.update(&name, |c| {
                    let reward = c.complete_quest(&quest, &quests)?;
                    let levels = c.settle_level_ups()?;
                    Ok(format!(
                        "Completed '{}': +{} XP, +{} gold.{}",
                        quest,
                        reward.xp,
                        reward.gold,
                        level_up_note(c, levels)
                    ))
                })?;
            }
            Command::Abandon { name, quest } => self.update(&name, |c| {
                c.abandon_quest(&quest)?;
                Ok(format!("Abandoned quest '{}'.", quest))
            })?,
            Command::Buy { name, item } => {
                let items = self.items()?;
                let def = items.require(&item)?;
                self.update(&name, |c| {
                    c.purchase(&item, def)?;
                    Ok(format!("Bought {} for {} gold.", def.name, def.cost))
                })?;
            }
            Command::Sell { name, item } => {
                let items = self.items()?;
                let def = items.require(&item)?;
                self.update(&name, |c| {
                    let gold = c.sell(&item, def)?;
                    Ok(format!("Sold {} for {} gold.", def.name, gold))
                })?;
            }
            Command::Use { name, item } => {
                let items = self.items()?;
                let def = items.require(&item)?;
                self.update(&name, |c| c.use_item(&item, def))?;
            }
            Command::Equip { name, item } => {
                let items = self.items()?;
                let def = items.require(&item)?;
                self.update(&name, |c| match def.item_type {
                    ItemType::Weapon => c.equip_weapon(&item, def),
                    ItemType::Armor => c.equip_armor(&item, def),
                    ItemType::Consumable => Err(GameError::InvalidItemType(format!(
                        "'{}' is a consumable and cannot be equipped",
                        item
                    ))),
                })?;
            }
            Command::Unequip { name, slot } => {
                let slot: EquipSlot = slot.parse()?;
                self.update(&name, |c| {
                    Ok(match c.unequip(slot)? {
                        Some(item) => format!("Unequipped {}.", item),
                        None => format!("Nothing equipped in {} slot.", slot.as_str()),
                    })
                })?;
            }
            Command::Revive { name } => self.update(&name, |c| {
                Ok(if c.revive() {
                    format!("{} was revived with {} HP.", c.name, c.health)
                } else {
                    format!("{} is not dead.", c.name)
                })
            })?,
        }
        Ok(())
    }

    fn fight(&self, name: &str, enemy_type: Option<&str>) -> Result<()> {
        let mut character = self.store.load(name)?;
        let enemy = match enemy_type {
            Some(type_name) => Enemy::create(type_name)?,
            None => Enemy::for_level(character.level),
        };
        let mut rng = self.config.rng();

        let mut battle = Battle::new(&mut character, enemy)?;
        let result = battle.run(&mut rng)?;
        for line in battle.log() {
            println!("{}", line);
        }
        drop(battle);

        match result.outcome {
            BattleState::PlayerWon => {
                let levels = character.settle_level_ups()?;
                println!(
                    "Victory in {} turns! +{} XP, +{} gold.{}",
                    result.turns,
                    result.xp_gained,
                    result.gold_gained,
                    level_up_note(&character, levels)
                );
            }
            BattleState::EnemyWon => println!("{} was defeated.", character.name),
            BattleState::Escaped | BattleState::Active => {}
        }

        self.store.save(&character)
    }

    fn show_quests(&self, name: &str) -> Result<()> {
        let character = self.store.load(name)?;
        let quests = self.quests()?;

        let sections = [
            ("Active", character.active_quests(&quests)),
            ("Completed", character.completed_quests(&quests)),
            ("Available", character.available_quests(&quests)),
        ];
        for (heading, list) in sections {
            println!("{}:", heading);
            for quest in list {
                println!(
                    "  {} - {} (level {}, {} XP, {} gold)",
                    quest.id, quest.title, quest.required_level, quest.reward_xp, quest.reward_gold
                );
            }
        }
        println!("Progress: {:.1}%", character.completion_percentage(&quests));
        Ok(())
    }
}

fn level_up_note(character: &Character, levels: u32) -> String {
    match levels {
        0 => String::new(),
        _ => format!(" {} is now level {}!", character.name, character.level),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match GameConfig::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
    debug!("Using config {:?}", config);

    let game = Game { store: FileStore::new(&config.save_dir), config };
    match game.run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
