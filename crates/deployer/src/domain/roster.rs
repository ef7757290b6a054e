use {crate::domain::script, std::fmt};

/// A playable character or the boss, as passed to the game's constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fighter {
    pub name: String,
    pub image_uri: String,
    pub hp: u64,
    pub attack_damage: u64,
}

impl Fighter {
    fn new(name: &str, image_uri: &str, hp: u64, attack_damage: u64) -> Self {
        Self {
            name: name.to_string(),
            image_uri: image_uri.to_string(),
            hp,
            attack_damage,
        }
    }
}

/// The deployment parameters: the characters players can mint and the boss
/// they fight. Character `i` is minted with selector `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    pub characters: Vec<Fighter>,
    pub boss: Fighter,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidRoster {
    #[error("roster has no characters")]
    Empty,
    #[error("character {index} is minted but the roster only has {len} characters")]
    MissingCharacter { index: u8, len: usize },
}

impl Roster {
    /// Checks that every character the call sequence mints exists.
    pub fn validate(&self) -> Result<(), InvalidRoster> {
        if self.characters.is_empty() {
            return Err(InvalidRoster::Empty);
        }
        let len = self.characters.len();
        match script::minted_characters().find(|index| usize::from(*index) >= len) {
            Some(index) => Err(InvalidRoster::MissingCharacter { index, len }),
            None => Ok(()),
        }
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self {
            characters: vec![
                Fighter::new("Bawler Cat", "https://i.imgur.com/U3r98Ym.jpg", 100, 200),
                Fighter::new("Mr. Meowington", "https://i.imgur.com/o7kkFES.jpg", 300, 100),
                Fighter::new("Yogi Cat", "https://i.imgur.com/cnRyNcm.jpg", 400, 100),
            ],
            boss: Fighter::new("Evil Dog", "https://i.imgur.com/GpGSo8x.jpg", 10_000, 100),
        }
    }
}

impl fmt::Display for Roster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self
            .characters
            .iter()
            .map(|character| character.name.as_str())
            .collect::<Vec<_>>();
        write!(f, "[{}] vs {}", names.join(", "), self.boss.name)
    }
}
