use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};

/// Unique identifier for every NPC in the village.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NpcId(pub Uuid);

impl NpcId {
    /// Generate a new random NPC ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Build an ID from caller-supplied random bytes.
    ///
    /// The version and variant bits are set like a v4 UUID, so seeded
    /// bytes give reproducible IDs that still look like ordinary UUIDs.
    pub fn from_random_bytes(bytes: [u8; 16]) -> Self {
        Self(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }
}

impl Default for NpcId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NpcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// The role an NPC fills in the village. Serialized as a plain string.
///
/// Unknown strings round-trip through `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Job {
    /// Works the fields and brings in the harvest.
    Farmer,
    /// Keeps watch; eats a heavier ration.
    Guard,
    /// Keeps the records.
    Scholar,
    /// Too young to work.
    Child,
    /// A role with no built-in profile.
    Custom(String),
}

impl Job {
    /// Parse a job tag. Matching is case-insensitive for built-in roles.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "farmer" => Self::Farmer,
            "guard" => Self::Guard,
            "scholar" => Self::Scholar,
            "child" => Self::Child,
            _ => Self::Custom(s.to_string()),
        }
    }
}

impl From<String> for Job {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<Job> for String {
    fn from(job: Job) -> Self {
        job.to_string()
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Farmer => write!(f, "farmer"),
            Self::Guard => write!(f, "guard"),
            Self::Scholar => write!(f, "scholar"),
            Self::Child => write!(f, "child"),
            Self::Custom(s) => write!(f, "{s}"),
        }
    }
}

/// An inclusive range a vital value is kept within.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VitalRange {
    /// Smallest allowed value.
    pub min: i32,
    /// Largest allowed value.
    pub max: i32,
}

impl VitalRange {
    /// Clamp `value` into this range.
    pub fn clamp(&self, value: i32) -> i32 {
        value.clamp(self.min, self.max)
    }

    /// Whether `value` lies inside this range.
    pub fn contains(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Hunger: 0 is sated, 100 is starving.
pub const HUNGER: VitalRange = VitalRange { min: 0, max: 100 };
/// Health: 0 is dead, 100 is fully healthy.
pub const HEALTH: VitalRange = VitalRange { min: 0, max: 100 };
/// Mood: -50 is miserable, 50 is content.
pub const MOOD: VitalRange = VitalRange { min: -50, max: 50 };

/// A single villager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Npc {
    /// Stable identity.
    pub id: NpcId,
    /// Display name.
    pub name: String,
    /// Role tag, drives rations, harvest, and job satisfaction.
    pub job: Job,
    /// Current hunger, see [`HUNGER`].
    pub hunger: i32,
    /// Current health, see [`HEALTH`].
    pub health: i32,
    /// Current mood, see [`MOOD`].
    pub mood: i32,
    /// False once health hit its floor. Never flips back.
    pub alive: bool,
}

impl Npc {
    /// Create a healthy, sated, living NPC with neutral mood.
    pub fn new(id: NpcId, name: impl Into<String>, job: Job) -> Self {
        Self {
            id,
            name: name.into(),
            job,
            hunger: HUNGER.min,
            health: HEALTH.max,
            mood: 0,
            alive: true,
        }
    }

    /// Set the mood, clamped into range.
    pub fn with_mood(mut self, mood: i32) -> Self {
        self.mood = MOOD.clamp(mood);
        self
    }

    /// Mark the NPC dead. Returns `true` only on the living-to-dead transition.
    pub fn kill(&mut self) -> bool {
        let was_alive = self.alive;
        self.alive = false;
        was_alive
    }

    /// Check that all vitals are inside their ranges and that an NPC whose
    /// health reached the floor is not still marked alive.
    pub fn validate(&self) -> CoreResult<()> {
        for (field, value, range) in [
            ("hunger", self.hunger, HUNGER),
            ("health", self.health, HEALTH),
            ("mood", self.mood, MOOD),
        ] {
            if !range.contains(value) {
                return Err(CoreError::OutOfRange {
                    npc: self.id,
                    field,
                    value,
                    min: range.min,
                    max: range.max,
                });
            }
        }
        if self.alive && self.health <= HEALTH.min {
            return Err(CoreError::AliveAtHealthFloor(self.id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn job_parse_known_and_custom() {
        assert_eq!(Job::parse("farmer"), Job::Farmer);
        assert_eq!(Job::parse(" Guard "), Job::Guard);
        assert_eq!(Job::parse("smith"), Job::Custom("smith".into()));
        assert_eq!(Job::Custom("smith".into()).to_string(), "smith");
    }

    #[test]
    fn job_serializes_as_plain_string() {
        let json = serde_json::to_string(&Job::Scholar).unwrap();
        assert_eq!(json, "\"scholar\"");
        let job: Job = serde_json::from_str("\"miller\"").unwrap();
        assert_eq!(job, Job::Custom("miller".into()));
    }

    #[test]
    fn npc_id_serializes_as_uuid_string() {
        let id = NpcId::from_random_bytes([7; 16]);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.0));
        assert_eq!(id.0.get_version_num(), 4);
    }

    #[test]
    fn seeded_ids_are_reproducible() {
        assert_eq!(
            NpcId::from_random_bytes([1; 16]),
            NpcId::from_random_bytes([1; 16])
        );
        assert_ne!(
            NpcId::from_random_bytes([1; 16]),
            NpcId::from_random_bytes([2; 16])
        );
    }

    #[test]
    fn kill_transitions_once() {
        let mut npc = Npc::new(NpcId::new(), "Ansel", Job::Farmer);
        assert!(npc.kill());
        assert!(!npc.kill());
        assert!(!npc.alive);
    }

    #[test]
    fn validate_rejects_out_of_range() {
        let mut npc = Npc::new(NpcId::new(), "Ansel", Job::Farmer);
        assert!(npc.validate().is_ok());
        npc.mood = 51;
        let err = npc.validate().unwrap_err();
        assert!(matches!(err, CoreError::OutOfRange { field: "mood", .. }));
    }

    #[test]
    fn validate_rejects_living_npc_without_health() {
        let mut npc = Npc::new(NpcId::new(), "Ansel", Job::Farmer);
        npc.health = HEALTH.min;
        assert_eq!(npc.validate(), Err(CoreError::AliveAtHealthFloor(npc.id)));
        npc.kill();
        assert!(npc.validate().is_ok());
    }

    #[test]
    fn with_mood_clamps() {
        let npc = Npc::new(NpcId::new(), "Brida", Job::Guard).with_mood(90);
        assert_eq!(npc.mood, MOOD.max);
    }

    proptest! {
        #[test]
        fn clamped_vitals_always_validate(hunger in any::<i32>(), health in any::<i32>(), mood in any::<i32>()) {
            let npc = Npc {
                hunger: HUNGER.clamp(hunger),
                health: HEALTH.clamp(health),
                mood: MOOD.clamp(mood),
                ..Npc::new(NpcId::from_random_bytes([3; 16]), "Corvin", Job::Scholar)
            };
            let npc = Npc { alive: npc.health > HEALTH.min, ..npc };
            prop_assert!(npc.validate().is_ok());
        }
    }
}
