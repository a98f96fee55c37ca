use std::collections::VecDeque;

use dorf_core::NpcId;
use serde::{Deserialize, Serialize};

/// What kind of simulation event occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SimEventKind {
    /// Hunger rose past the starvation threshold.
    HungerCritical {
        /// The NPC that is now starving.
        npc: NpcId,
    },
    /// An NPC died.
    Died {
        /// The NPC that died.
        npc: NpcId,
        /// The cause of death.
        cause: String,
    },
    /// The fields were harvested.
    Harvest {
        /// Food added to the stock.
        amount: i64,
    },
    /// The stock could not cover every ration.
    Famine {
        /// Food that was owed but not available.
        shortfall: i64,
    },
}

impl SimEventKind {
    /// Check whether a given NPC is involved in this event.
    pub fn involves(&self, id: NpcId) -> bool {
        match self {
            Self::HungerCritical { npc } | Self::Died { npc, .. } => *npc == id,
            Self::Harvest { .. } | Self::Famine { .. } => false,
        }
    }
}

/// A record of something that happened during a simulated day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimEvent {
    /// The day this event occurred on.
    pub day: u64,
    /// The specific kind of event that occurred.
    #[serde(flatten)]
    pub kind: SimEventKind,
    /// A human-readable description of the event.
    pub description: String,
}

impl SimEvent {
    /// Create a new simulation event with the given day, kind, and description.
    pub fn new(day: u64, kind: SimEventKind, description: impl Into<String>) -> Self {
        Self {
            day,
            kind,
            description: description.into(),
        }
    }
}

/// Before/after values for one living NPC over one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpcChange {
    /// The NPC these values belong to.
    pub npc_id: NpcId,
    /// Hunger at the start of the day.
    pub hunger_before: i32,
    /// Hunger at the end of the day.
    pub hunger_after: i32,
    /// Health at the start of the day.
    pub health_before: i32,
    /// Health at the end of the day.
    pub health_after: i32,
    /// Mood at the start of the day.
    pub mood_before: i32,
    /// Mood at the end of the day.
    pub mood_after: i32,
    /// Whether the NPC ate a full ration.
    pub fed: bool,
    /// Set when the NPC died on this day.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub died: bool,
}

/// Everything that changed on one simulated day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayLog {
    /// The day that was simulated.
    pub day: u64,
    /// Stock before rations were drawn.
    pub food_stock_before: i64,
    /// Stock after rations and harvest.
    pub food_stock_after: i64,
    /// Food drawn as rations.
    pub consumed: i64,
    /// Food added by the harvest.
    pub harvested: i64,
    /// Rations owed but not covered by the stock.
    pub shortfall: i64,
    /// One entry per NPC that was alive at the start of the day.
    pub npc_changes: Vec<NpcChange>,
    /// Notable events, in the order they happened.
    #[serde(default)]
    pub events: Vec<SimEvent>,
}

impl DayLog {
    /// Start an empty log for `day` with the opening stock.
    pub fn new(day: u64, food_stock_before: i64) -> Self {
        Self {
            day,
            food_stock_before,
            food_stock_after: food_stock_before,
            consumed: 0,
            harvested: 0,
            shortfall: 0,
            npc_changes: Vec::new(),
            events: Vec::new(),
        }
    }

    /// IDs of NPCs that died on this day.
    pub fn deaths(&self) -> impl Iterator<Item = NpcId> + '_ {
        self.npc_changes.iter().filter(|c| c.died).map(|c| c.npc_id)
    }
}

/// The most recent day logs, oldest first, bounded in size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Journal {
    entries: VecDeque<DayLog>,
    capacity: usize,
}

impl Journal {
    /// Create an empty journal holding at most `capacity` entries (minimum 1).
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Append a log, dropping the oldest entries if the journal is full.
    pub fn push(&mut self, log: DayLog) {
        self.entries.push_back(log);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Append several logs in order.
    pub fn extend(&mut self, logs: impl IntoIterator<Item = DayLog>) {
        for log in logs {
            self.push(log);
        }
    }

    /// The newest `limit` entries in chronological order.
    ///
    /// A limit below 1 yields nothing.
    pub fn recent(&self, limit: i64) -> Vec<DayLog> {
        let Ok(limit) = usize::try_from(limit) else {
            return Vec::new();
        };
        let skip = self.entries.len().saturating_sub(limit);
        self.entries.iter().skip(skip).cloned().collect()
    }

    /// All events involving the given NPC, oldest first.
    pub fn events_for_npc(&self, id: NpcId) -> Vec<&SimEvent> {
        self.entries
            .iter()
            .flat_map(|log| log.events.iter())
            .filter(|e| e.kind.involves(id))
            .collect()
    }

    /// Iterate over all entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &DayLog> {
        self.entries.iter()
    }

    /// Return the number of stored logs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn journal_trims_oldest() {
        let mut journal = Journal::new(2);
        for day in 1..=5 {
            journal.push(DayLog::new(day, 0));
        }
        assert_eq!(journal.len(), 2);
        let days: Vec<u64> = journal.iter().map(|l| l.day).collect();
        assert_eq!(days, [4, 5]);
    }

    #[test]
    fn recent_returns_newest_in_order() {
        let mut journal = Journal::new(10);
        journal.extend((1..=4).map(|d| DayLog::new(d, 0)));
        let days: Vec<u64> = journal.recent(2).iter().map(|l| l.day).collect();
        assert_eq!(days, [3, 4]);
        assert_eq!(journal.recent(100).len(), 4);
    }

    #[test]
    fn recent_with_non_positive_limit_is_empty() {
        let mut journal = Journal::new(10);
        journal.push(DayLog::new(1, 0));
        assert!(journal.recent(0).is_empty());
        assert!(journal.recent(-3).is_empty());
    }

    #[test]
    fn events_for_npc_filters() {
        let a = NpcId::new();
        let b = NpcId::new();
        let mut log = DayLog::new(1, 0);
        log.events.push(SimEvent::new(
            1,
            SimEventKind::HungerCritical { npc: a },
            "a starving",
        ));
        log.events.push(SimEvent::new(
            1,
            SimEventKind::Famine { shortfall: 3 },
            "famine",
        ));
        let mut journal = Journal::new(5);
        journal.push(log);
        assert_eq!(journal.events_for_npc(a).len(), 1);
        assert!(journal.events_for_npc(b).is_empty());
    }

    #[test]
    fn died_flag_omitted_when_false() {
        let change = NpcChange {
            npc_id: NpcId::new(),
            hunger_before: 0,
            hunger_after: 10,
            health_before: 100,
            health_after: 100,
            mood_before: 50,
            mood_after: 49,
            fed: true,
            died: false,
        };
        let json = serde_json::to_value(&change).unwrap();
        assert!(json.get("died").is_none());

        let dead = NpcChange { died: true, ..change };
        let json = serde_json::to_value(&dead).unwrap();
        assert_eq!(json["died"], true);
    }

    #[test]
    fn event_kind_is_tagged() {
        let event = SimEvent::new(4, SimEventKind::Harvest { amount: 20 }, "harvest");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"], "harvest");
        assert_eq!(json["amount"], 20);
        let back: SimEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }
}
