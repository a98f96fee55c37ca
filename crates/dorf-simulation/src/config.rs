use std::collections::HashSet;

use dorf_core::{HUNGER, Job, MOOD};
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Largest ration or harvest yield a job profile may declare.
pub const MAX_FOOD_PER_JOB: i64 = 1_000_000;

/// Daily vital rules applied to every living NPC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VitalsConfig {
    /// Hunger gained per day.
    pub hunger_per_day: i32,
    /// Hunger removed by eating a full ration.
    pub meal_relief: i32,
    /// Hunger above this level costs health.
    pub starvation_threshold: i32,
    /// Health lost per day while hunger is above the threshold.
    pub starvation_penalty: i32,
    /// Health regained per day otherwise.
    pub recovery_per_day: i32,
    /// Extra health lost by everyone on a day the stock ran short.
    pub famine_penalty: i32,
    /// Percent of hunger subtracted from mood.
    pub hunger_mood_weight: i32,
    /// Percent of missing health subtracted from mood.
    pub health_mood_weight: i32,
}

impl Default for VitalsConfig {
    fn default() -> Self {
        Self {
            hunger_per_day: 10,
            meal_relief: 20,
            starvation_threshold: 70,
            starvation_penalty: 5,
            recovery_per_day: 1,
            famine_penalty: 8,
            hunger_mood_weight: 60,
            health_mood_weight: 40,
        }
    }
}

/// What a job eats, produces, and how much it enjoys the work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobProfile {
    /// Food drawn from the stock each day.
    pub ration: i64,
    /// Food added to the stock on each harvest day.
    pub harvest_yield: i64,
    /// Mood bonus from the work itself.
    pub satisfaction: i32,
}

impl Default for JobProfile {
    fn default() -> Self {
        Self {
            ration: 1,
            harvest_yield: 0,
            satisfaction: 0,
        }
    }
}

impl JobProfile {
    fn new(ration: i64, harvest_yield: i64, satisfaction: i32) -> Self {
        Self {
            ration,
            harvest_yield,
            satisfaction,
        }
    }
}

/// Job profiles for every built-in role plus a fallback for custom roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobTable {
    /// Profile for farmers.
    pub farmer: JobProfile,
    /// Profile for guards.
    pub guard: JobProfile,
    /// Profile for scholars.
    pub scholar: JobProfile,
    /// Profile for children.
    pub child: JobProfile,
    /// Profile for any custom role.
    pub custom: JobProfile,
}

impl Default for JobTable {
    fn default() -> Self {
        Self {
            farmer: JobProfile::new(1, 20, 5),
            guard: JobProfile::new(2, 0, 0),
            scholar: JobProfile::new(1, 0, 10),
            child: JobProfile::new(1, 0, 15),
            custom: JobProfile::default(),
        }
    }
}

impl JobTable {
    /// The profile that applies to `job`.
    pub fn profile(&self, job: &Job) -> &JobProfile {
        match job {
            Job::Farmer => &self.farmer,
            Job::Guard => &self.guard,
            Job::Scholar => &self.scholar,
            Job::Child => &self.child,
            Job::Custom(_) => &self.custom,
        }
    }

    fn iter(&self) -> impl Iterator<Item = (&'static str, &JobProfile)> {
        [
            ("farmer", &self.farmer),
            ("guard", &self.guard),
            ("scholar", &self.scholar),
            ("child", &self.child),
            ("custom", &self.custom),
        ]
        .into_iter()
    }
}

/// A villager present in the starting population.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resident {
    /// Display name, unique within the population.
    pub name: String,
    /// Role tag.
    pub job: Job,
}

impl Resident {
    /// Create a resident entry.
    pub fn new(name: impl Into<String>, job: Job) -> Self {
        Self {
            name: name.into(),
            job,
        }
    }
}

/// Configuration for a simulation run.
///
/// Every field has a default, so a partial JSON document only overrides
/// the keys it names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for the starting population's IDs.
    pub seed: u64,
    /// Food in the stock on day 0.
    pub starting_food: i64,
    /// Villagers on day 0, in creation order.
    pub population: Vec<Resident>,
    /// Daily vital rules.
    pub rules: VitalsConfig,
    /// Per-job rations, yields, and satisfaction.
    pub jobs: JobTable,
    /// Harvest happens on every day divisible by this.
    pub harvest_interval: u64,
    /// Maximum number of day logs kept in the journal.
    pub max_day_logs: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            starting_food: 100,
            population: vec![
                Resident::new("Ansel", Job::Farmer),
                Resident::new("Brida", Job::Guard),
                Resident::new("Corvin", Job::Scholar),
            ],
            rules: VitalsConfig::default(),
            jobs: JobTable::default(),
            harvest_interval: 7,
            max_day_logs: 30,
        }
    }
}

impl SimConfig {
    /// Parse a configuration from JSON, filling in defaults, and validate it.
    pub fn from_json(raw: &str) -> SimResult<Self> {
        let config: Self =
            serde_json::from_str(raw).map_err(|e| SimError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Set the RNG seed used for NPC IDs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the day-0 food stock.
    pub fn with_starting_food(mut self, food: i64) -> Self {
        self.starting_food = food;
        self
    }

    /// Replace the starting population.
    pub fn with_population(mut self, population: Vec<Resident>) -> Self {
        self.population = population;
        self
    }

    /// Replace the vital rules.
    pub fn with_rules(mut self, rules: VitalsConfig) -> Self {
        self.rules = rules;
        self
    }

    /// Replace the job table.
    pub fn with_jobs(mut self, jobs: JobTable) -> Self {
        self.jobs = jobs;
        self
    }

    /// Set the harvest interval in days.
    pub fn with_harvest_interval(mut self, days: u64) -> Self {
        self.harvest_interval = days;
        self
    }

    /// Set the journal capacity.
    pub fn with_max_day_logs(mut self, max: usize) -> Self {
        self.max_day_logs = max;
        self
    }

    /// Reject configurations the engine cannot run safely.
    pub fn validate(&self) -> SimResult<()> {
        if self.harvest_interval == 0 {
            return Err(SimError::Config("harvest_interval must be at least 1".into()));
        }
        if self.max_day_logs == 0 {
            return Err(SimError::Config("max_day_logs must be at least 1".into()));
        }
        if self.starting_food < 0 {
            return Err(SimError::Config(format!(
                "starting_food must not be negative, got {}",
                self.starting_food
            )));
        }

        let rules = &self.rules;
        for (name, value) in [
            ("hunger_per_day", rules.hunger_per_day),
            ("meal_relief", rules.meal_relief),
            ("starvation_penalty", rules.starvation_penalty),
            ("recovery_per_day", rules.recovery_per_day),
            ("famine_penalty", rules.famine_penalty),
            ("hunger_mood_weight", rules.hunger_mood_weight),
            ("health_mood_weight", rules.health_mood_weight),
        ] {
            if !(0..=100).contains(&value) {
                return Err(SimError::Config(format!(
                    "rules.{name} must be within 0..=100, got {value}"
                )));
            }
        }
        if !HUNGER.contains(rules.starvation_threshold) {
            return Err(SimError::Config(format!(
                "rules.starvation_threshold must be within {}..={}, got {}",
                HUNGER.min, HUNGER.max, rules.starvation_threshold
            )));
        }

        for (name, profile) in self.jobs.iter() {
            for (field, value) in [
                ("ration", profile.ration),
                ("harvest_yield", profile.harvest_yield),
            ] {
                if !(0..=MAX_FOOD_PER_JOB).contains(&value) {
                    return Err(SimError::Config(format!(
                        "jobs.{name}.{field} must be within 0..={MAX_FOOD_PER_JOB}, got {value}"
                    )));
                }
            }
            if !(MOOD.min..=MOOD.max).contains(&profile.satisfaction) {
                return Err(SimError::Config(format!(
                    "jobs.{name}.satisfaction must be within {}..={}, got {}",
                    MOOD.min, MOOD.max, profile.satisfaction
                )));
            }
        }

        let mut names = HashSet::new();
        for resident in &self.population {
            if resident.name.trim().is_empty() {
                return Err(SimError::Config("resident names must not be empty".into()));
            }
            if !names.insert(resident.name.to_lowercase()) {
                return Err(SimError::Config(format!(
                    "duplicate resident name \"{}\"",
                    resident.name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values() {
        let config = SimConfig::default();
        assert_eq!(config.seed, 42);
        assert_eq!(config.starting_food, 100);
        assert_eq!(config.population.len(), 3);
        assert_eq!(config.harvest_interval, 7);
        assert_eq!(config.max_day_logs, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_builder_chain() {
        let config = SimConfig::default()
            .with_seed(7)
            .with_starting_food(0)
            .with_harvest_interval(3)
            .with_max_day_logs(5);
        assert_eq!(config.seed, 7);
        assert_eq!(config.starting_food, 0);
        assert_eq!(config.harvest_interval, 3);
        assert_eq!(config.max_day_logs, 5);
    }

    #[test]
    fn job_table_lookup() {
        let jobs = JobTable::default();
        assert_eq!(jobs.profile(&Job::Guard).ration, 2);
        assert_eq!(jobs.profile(&Job::Farmer).harvest_yield, 20);
        assert_eq!(jobs.profile(&Job::Custom("smith".into())), &jobs.custom);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = SimConfig::from_json(r#"{"starting_food": 12, "rules": {"famine_penalty": 3}}"#)
            .unwrap();
        assert_eq!(config.starting_food, 12);
        assert_eq!(config.rules.famine_penalty, 3);
        assert_eq!(config.rules.hunger_per_day, 10);
        assert_eq!(config.population.len(), 3);
    }

    #[test]
    fn json_population_uses_job_strings() {
        let config = SimConfig::from_json(
            r#"{"population": [{"name": "Dietlind", "job": "child"}, {"name": "Egon", "job": "miller"}]}"#,
        )
        .unwrap();
        assert_eq!(config.population[0].job, Job::Child);
        assert_eq!(config.population[1].job, Job::Custom("miller".into()));
    }

    #[test]
    fn malformed_json_is_config_error() {
        let err = SimConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn validate_rejects_zero_interval() {
        let err = SimConfig::default()
            .with_harvest_interval(0)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("harvest_interval"));
    }

    #[test]
    fn validate_rejects_duplicate_names() {
        let config = SimConfig::default().with_population(vec![
            Resident::new("Ansel", Job::Farmer),
            Resident::new("ansel", Job::Guard),
        ]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_out_of_range_rules() {
        let rules = VitalsConfig {
            starvation_penalty: -1,
            ..VitalsConfig::default()
        };
        assert!(SimConfig::default().with_rules(rules).validate().is_err());

        let mut jobs = JobTable::default();
        jobs.guard.ration = -2;
        assert!(SimConfig::default().with_jobs(jobs).validate().is_err());
    }
}
