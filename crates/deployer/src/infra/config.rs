//! Roster file, an alternative to the built-in roster.
//!
//! ```toml
//! [[character]]
//! name = "Bawler Cat"
//! image-uri = "https://i.imgur.com/U3r98Ym.jpg"
//! hp = 100
//! attack-damage = 200
//!
//! [boss]
//! name = "Evil Dog"
//! image-uri = "https://i.imgur.com/GpGSo8x.jpg"
//! hp = 10000
//! attack-damage = 100
//! ```

use {
    crate::domain::{Fighter, Roster},
    anyhow::{Context, Result},
    serde::Deserialize,
    std::path::Path,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct File {
    #[serde(rename = "character")]
    characters: Vec<FighterConfig>,
    boss: FighterConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct FighterConfig {
    name: String,
    image_uri: String,
    hp: u64,
    attack_damage: u64,
}

impl From<FighterConfig> for Fighter {
    fn from(config: FighterConfig) -> Self {
        Self {
            name: config.name,
            image_uri: config.image_uri,
            hp: config.hp,
            attack_damage: config.attack_damage,
        }
    }
}

/// Loads and validates the roster file at `path`.
pub fn load(path: &Path) -> Result<Roster> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("I/O error while reading {path:?}"))?;
    parse(&data).with_context(|| format!("invalid roster file {path:?}"))
}

pub fn parse(data: &str) -> Result<Roster> {
    let file: File = toml::from_str(data)?;
    let roster = Roster {
        characters: file.characters.into_iter().map(Into::into).collect(),
        boss: file.boss.into(),
    };
    roster.validate()?;
    Ok(roster)
}
