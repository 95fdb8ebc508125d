use std::collections::BTreeMap;

use gm_mechanics::rules::preset;
use gm_mechanics::{Clock, Quality};
use serde::{Deserialize, Serialize};

use super::{Config, Crew, Faction, Harm, LastRoll, MAX_STRESS, Player, RollKind};
use crate::error::{LedgerError, LedgerResult};

/// Where a clock lives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// The campaign's own clock list.
    #[default]
    Campaign,
    /// A named faction's clocks; the faction is created on first reference.
    Faction(String),
}

impl Scope {
    /// Campaign scope for `None`, faction scope otherwise.
    pub fn from_faction(faction: Option<String>) -> Self {
        faction.map_or(Self::Campaign, Self::Faction)
    }
}

/// One of the four campaign-wide counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Counter {
    /// Heat.
    Heat,
    /// Wanted level.
    Wanted,
    /// Reputation.
    Rep,
    /// Coin.
    Coin,
}

impl Counter {
    /// Parse a counter name case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "heat" => Some(Self::Heat),
            "wanted" => Some(Self::Wanted),
            "rep" => Some(Self::Rep),
            "coin" => Some(Self::Coin),
            _ => None,
        }
    }
}

impl std::str::FromStr for Counter {
    type Err = LedgerError;

    fn from_str(s: &str) -> LedgerResult<Self> {
        Self::parse(s).ok_or_else(|| LedgerError::InvalidArgument(format!("unknown counter: {s}")))
    }
}

/// Absolute counter values; `None` leaves a counter unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetaValues {
    /// New heat.
    pub heat: Option<i32>,
    /// New wanted level.
    pub wanted: Option<i32>,
    /// New rep.
    pub rep: Option<i32>,
    /// New coin.
    pub coin: Option<i32>,
}

/// Root aggregate: everything one campaign owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Campaign {
    /// Player sheets by name.
    pub players: BTreeMap<String, Player>,
    /// The crew.
    pub crew: Crew,
    /// Factions by name.
    pub factions: BTreeMap<String, Faction>,
    /// Campaign-level clocks.
    pub clocks: Vec<Clock>,
    /// Heat.
    pub heat: i32,
    /// Wanted level.
    pub wanted: i32,
    /// Reputation.
    pub rep: i32,
    /// Coin.
    pub coin: i32,
    /// Game configuration.
    pub config: Config,
    /// Most recent roll.
    pub last_roll: Option<LastRoll>,
}

impl Default for Campaign {
    fn default() -> Self {
        Self {
            players: BTreeMap::new(),
            crew: Crew::default(),
            factions: BTreeMap::new(),
            clocks: Vec::new(),
            heat: 0,
            wanted: 0,
            rep: 0,
            coin: 2,
            config: Config::default(),
            last_roll: None,
        }
    }
}

fn invalid(msg: String) -> LedgerError {
    LedgerError::InvalidArgument(format!("malformed campaign: {msg}"))
}

fn check_clocks<'a>(owner: &str, clocks: impl IntoIterator<Item = &'a Clock>) -> LedgerResult<()> {
    for clock in clocks {
        if clock.segments == 0 {
            return Err(invalid(format!("{owner} clock {:?} has no segments", clock.name)));
        }
        if clock.filled > clock.segments {
            return Err(invalid(format!(
                "{owner} clock {:?} is filled past capacity ({}/{})",
                clock.name, clock.filled, clock.segments
            )));
        }
    }
    Ok(())
}

impl Campaign {
    /// Check a decoded campaign against the model's invariants.
    ///
    /// Rejects clocks with no segments or with `filled > segments`, stress
    /// outside `0..=9`, harm levels outside `1..=3` and advance thresholds
    /// below 1.
    pub fn validate(&self) -> LedgerResult<()> {
        check_clocks("campaign", &self.clocks)?;
        for (name, faction) in &self.factions {
            check_clocks(&format!("faction {name:?}"), &faction.clocks)?;
        }
        for (name, player) in &self.players {
            if !(0..=MAX_STRESS).contains(&player.stress) {
                return Err(invalid(format!(
                    "player {name:?} stress {} is outside 0..={MAX_STRESS}",
                    player.stress
                )));
            }
            if let Some(harm) = player.harms.iter().find(|h| !(1..=3).contains(&h.level)) {
                return Err(invalid(format!(
                    "player {name:?} harm {:?} has level {}",
                    harm.label, harm.level
                )));
            }
        }
        let house = &self.config.house_rules;
        if house.advance_threshold_player < 1 || house.advance_threshold_crew < 1 {
            return Err(invalid(format!(
                "advance thresholds must be at least 1, got player {} crew {}",
                house.advance_threshold_player, house.advance_threshold_crew
            )));
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Players
    // -----------------------------------------------------------------------

    /// Look up a player without creating it.
    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.get(name)
    }

    /// Get a player, creating a default sheet on first reference.
    pub fn player_mut(&mut self, name: &str) -> &mut Player {
        self.players.entry(name.to_string()).or_default()
    }

    /// Harm penalty for a player; an unknown player has none.
    pub fn harm_penalty(&self, name: &str) -> i32 {
        self.player(name).map_or(0, Player::harm_penalty)
    }

    /// Record a harm of level 1 to 3.
    pub fn add_harm(
        &mut self,
        name: &str,
        level: u8,
        label: &str,
        kind: Option<String>,
    ) -> LedgerResult<()> {
        if !(1..=3).contains(&level) {
            return Err(LedgerError::InvalidArgument(format!(
                "harm level must be 1 to 3, got {level}"
            )));
        }
        self.player_mut(name).harms.push(Harm::new(level, label, kind));
        Ok(())
    }

    /// Grant player XP with the campaign's player threshold.
    pub fn add_player_xp(&mut self, name: &str, n: i32) {
        let threshold = self.config.house_rules.advance_threshold_player;
        self.player_mut(name).add_xp(n, threshold);
    }

    /// Grant crew XP with the campaign's crew threshold.
    pub fn add_crew_xp(&mut self, n: i32) {
        let threshold = self.config.house_rules.advance_threshold_crew;
        self.crew.add_xp(n, threshold);
    }

    // -----------------------------------------------------------------------
    // Clocks
    // -----------------------------------------------------------------------

    /// Look up a clock in scope.
    pub fn clock(&self, scope: &Scope, name: &str) -> Option<&Clock> {
        let clocks = match scope {
            Scope::Campaign => &self.clocks,
            Scope::Faction(f) => &self.factions.get(f)?.clocks,
        };
        clocks.iter().find(|c| c.name == name)
    }

    fn clocks_mut(&mut self, scope: &Scope) -> &mut Vec<Clock> {
        match scope {
            Scope::Campaign => &mut self.clocks,
            Scope::Faction(f) => &mut self.factions.entry(f.clone()).or_default().clocks,
        }
    }

    /// Create a clock or change its capacity, keeping progress.
    pub fn upsert_clock(&mut self, scope: &Scope, name: &str, segments: u32) -> &Clock {
        let clocks = self.clocks_mut(scope);
        let idx = match clocks.iter().position(|c| c.name == name) {
            Some(idx) => {
                clocks[idx].resize(segments);
                idx
            }
            None => {
                clocks.push(Clock::new(name, segments));
                clocks.len() - 1
            }
        };
        &clocks[idx]
    }

    /// Tick an existing clock. Returns the new fill.
    pub fn fill_clock(&mut self, scope: &Scope, name: &str, n: u32) -> LedgerResult<u32> {
        let entity = match scope {
            Scope::Campaign => "clock",
            Scope::Faction(_) => "faction clock",
        };
        let clocks = match scope {
            Scope::Campaign => &mut self.clocks,
            Scope::Faction(f) => match self.factions.get_mut(f) {
                Some(faction) => &mut faction.clocks,
                None => return Err(LedgerError::not_found(entity, name)),
            },
        };
        clocks
            .iter_mut()
            .find(|c| c.name == name)
            .map(|c| c.fill(n))
            .ok_or_else(|| LedgerError::not_found(entity, name))
    }

    // -----------------------------------------------------------------------
    // Counters
    // -----------------------------------------------------------------------

    fn counter_mut(&mut self, counter: Counter) -> &mut i32 {
        match counter {
            Counter::Heat => &mut self.heat,
            Counter::Wanted => &mut self.wanted,
            Counter::Rep => &mut self.rep,
            Counter::Coin => &mut self.coin,
        }
    }

    /// Add a signed delta to a counter.
    pub fn adjust(&mut self, counter: Counter, delta: i32) {
        let value = self.counter_mut(counter);
        *value = value.saturating_add(delta);
    }

    /// Overwrite every counter present in `values`.
    pub fn set_meta(&mut self, values: MetaValues) {
        let pairs = [
            (Counter::Heat, values.heat),
            (Counter::Wanted, values.wanted),
            (Counter::Rep, values.rep),
            (Counter::Coin, values.coin),
        ];
        for (counter, value) in pairs {
            if let Some(value) = value {
                *self.counter_mut(counter) = value;
            }
        }
    }

    // -----------------------------------------------------------------------
    // Rules
    // -----------------------------------------------------------------------

    /// Replace the trigger table with a shipped preset.
    pub fn use_trigger_preset(&mut self, name: &str) -> LedgerResult<()> {
        self.config.rules.triggers = preset::trigger_preset(name)?;
        self.config.rules.active_preset = name.trim().to_lowercase();
        Ok(())
    }

    /// Replace the consequence lines for a position and quality.
    pub fn set_consequences(&mut self, position: &str, quality: Quality, lines: Vec<String>) {
        self.config.rules.consequences.set(position, quality, lines);
    }

    // -----------------------------------------------------------------------
    // Last roll and scene presets
    // -----------------------------------------------------------------------

    /// Append a suggestion to the last roll; no-op without one.
    pub fn append_last_roll_suggestion(&mut self, line: &str) {
        if let Some(last) = self.last_roll.as_mut() {
            last.add_suggestion(line);
        }
    }

    /// Snapshot the last roll's suggestions under `name`.
    pub fn save_scene_consequence_preset(&mut self, name: &str) {
        let lines = self
            .last_roll
            .as_ref()
            .map(|lr| lr.consequences.clone())
            .unwrap_or_default();
        self.config
            .rules
            .consequence_presets
            .insert(name.to_string(), lines);
    }

    /// Overwrite the last roll's suggestions with a saved preset.
    pub fn apply_scene_consequence_preset(&mut self, name: &str) -> LedgerResult<()> {
        let lines = self
            .config
            .rules
            .consequence_presets
            .get(name)
            .cloned()
            .ok_or_else(|| LedgerError::not_found("scene preset", name))?;
        self.last_roll
            .get_or_insert_with(|| LastRoll::new(RollKind::System))
            .consequences = lines;
        Ok(())
    }

    /// Names of the saved scene presets.
    pub fn scene_consequence_presets(&self) -> Vec<String> {
        self.config.rules.consequence_presets.keys().cloned().collect()
    }
}
