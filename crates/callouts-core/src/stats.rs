//! Dataset-wide interruption totals

use std::collections::HashMap;

use serde::Serialize;

use crate::model::{InterruptionEvent, ParticipantId};

/// Per-participant counter that remembers the order in which participants
/// were first counted. That order is the tie-break for [`CallTally::leader`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallTally {
    counts: Vec<(ParticipantId, u32)>,
    slots: HashMap<ParticipantId, usize>,
}

impl CallTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more call for `id`.
    pub fn record(&mut self, id: &ParticipantId) {
        match self.slots.get(id) {
            Some(&slot) => self.counts[slot].1 += 1,
            None => {
                self.slots.insert(id.clone(), self.counts.len());
                self.counts.push((id.clone(), 1));
            }
        }
    }

    /// Count for `id`, zero if never recorded.
    pub fn get(&self, id: &ParticipantId) -> u32 {
        self.slots.get(id).map_or(0, |&slot| self.counts[slot].1)
    }

    /// Counters in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (&ParticipantId, u32)> {
        self.counts.iter().map(|(id, n)| (id, *n))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum over all counters.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|(_, n)| u64::from(*n)).sum()
    }

    /// Participant with the highest count. On an exact tie the participant
    /// counted first wins.
    pub fn leader(&self) -> Option<Leader> {
        let mut best: Option<&(ParticipantId, u32)> = None;
        for entry in &self.counts {
            if best.is_none_or(|b| entry.1 > b.1) {
                best = Some(entry);
            }
        }
        best.map(|(id, count)| Leader {
            id: id.clone(),
            count: *count,
        })
    }
}

/// Winner of a "most calls" category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Leader {
    pub id: ParticipantId,
    pub count: u32,
}

/// Totals over the full, unfiltered dataset. Computed once at load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalStats {
    calls_made: CallTally,
    calls_received: CallTally,
}

impl GlobalStats {
    /// Every event counts for its caller; only events with a known speaker
    /// count toward received calls.
    pub fn compute(events: &[InterruptionEvent]) -> Self {
        let mut calls_made = CallTally::new();
        let mut calls_received = CallTally::new();

        for event in events {
            calls_made.record(&event.caller);
            if let Some(speaker) = &event.speaker {
                calls_received.record(speaker);
            }
        }

        tracing::debug!(
            "Global stats: {} callers, {} receivers",
            calls_made.len(),
            calls_received.len()
        );

        GlobalStats {
            calls_made,
            calls_received,
        }
    }

    pub fn calls_made(&self) -> &CallTally {
        &self.calls_made
    }

    pub fn calls_received(&self) -> &CallTally {
        &self.calls_received
    }

    /// Total number of recorded interruptions.
    pub fn total_interruptions(&self) -> u64 {
        self.calls_made.total()
    }

    pub fn top_caller(&self) -> Option<Leader> {
        self.calls_made.leader()
    }

    pub fn top_receiver(&self) -> Option<Leader> {
        self.calls_received.leader()
    }
}
