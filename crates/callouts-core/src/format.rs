//! German display text: dates, headlines and the dataset summary

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::model::{ParticipantId, SessionId};
use crate::stats::Leader;
use crate::store::RecordStore;

const MONTHS: [&str; 12] = [
    "Januar",
    "Februar",
    "März",
    "April",
    "Mai",
    "Juni",
    "Juli",
    "August",
    "September",
    "Oktober",
    "November",
    "Dezember",
];

/// `25. Januar 2023`
pub fn format_date_de(date: NaiveDate) -> String {
    format!("{}. {} {}", date.day(), MONTHS[date.month0() as usize], date.year())
}

/// Headline for a session; the date is omitted when the session has no
/// recorded interruptions.
pub fn session_headline(session: SessionId, date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => format!(
            "Protokollierte Zwischenrufe der {}. Nationalratssitzung am {}",
            session,
            format_date_de(date)
        ),
        None => format!("Protokollierte Zwischenrufe der {}. Nationalratssitzung", session),
    }
}

/// A leader with its display name resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedLeader {
    pub id: ParticipantId,
    pub name: String,
    pub count: u32,
}

impl NamedLeader {
    fn resolve(store: &RecordStore, leader: Leader) -> Self {
        NamedLeader {
            name: store.display_name(&leader.id),
            id: leader.id,
            count: leader.count,
        }
    }
}

/// One-time summary of the whole dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: u64,
    pub top_caller: Option<NamedLeader>,
    pub top_receiver: Option<NamedLeader>,
    pub text: String,
}

impl Summary {
    pub fn from_store(store: &RecordStore) -> Self {
        let stats = store.stats();
        let total = stats.total_interruptions();
        let top_caller = stats.top_caller().map(|l| NamedLeader::resolve(store, l));
        let top_receiver = stats.top_receiver().map(|l| NamedLeader::resolve(store, l));

        let mut text = format!("Insgesamt wurden {} Zwischenrufe erfasst.", total);
        match (&top_caller, &top_receiver) {
            (Some(caller), Some(receiver)) => text.push_str(&format!(
                " Die meisten Zwischenrufe tätigte {} mit {} Zwischenrufen, und der am häufigsten \
                 unterbrochene Sprecher war {} mit {} erhaltenen Zwischenrufen.",
                caller.name, caller.count, receiver.name, receiver.count
            )),
            (Some(caller), None) => text.push_str(&format!(
                " Die meisten Zwischenrufe tätigte {} mit {} Zwischenrufen.",
                caller.name, caller.count
            )),
            _ => {}
        }

        Summary {
            total,
            top_caller,
            top_receiver,
            text,
        }
    }
}
