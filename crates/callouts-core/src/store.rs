//! Immutable record store built once from the input document

use std::collections::{HashMap, HashSet};
use std::path::Path;

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::model::*;
use crate::stats::GlobalStats;

/// The loaded dataset plus its global statistics.
///
/// Constructed once at startup and only ever read afterwards; share it by
/// reference (or behind an `Arc`) with every aggregation call.
#[derive(Debug, Clone)]
pub struct RecordStore {
    participants: Vec<Participant>,
    events: Vec<InterruptionEvent>,
    /// Participant id -> position in the catalog.
    catalog: HashMap<ParticipantId, usize>,
    /// Each distinct session with the date of its first interruption, in
    /// order of first appearance.
    session_dates: Vec<(SessionId, NaiveDate)>,
    stats: GlobalStats,
}

impl RecordStore {
    /// Read and validate a dataset file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!("Loading dataset from {}", path.display());
        Self::from_json(&json)
    }

    /// Parse and validate a dataset from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let document: RawDocument = serde_json::from_str(json)?;
        Self::from_document(document)
    }

    /// Validate a parsed document and compute the global statistics.
    pub fn from_document(document: RawDocument) -> Result<Self> {
        let mut catalog = HashMap::with_capacity(document.nodes.len());
        for (position, participant) in document.nodes.iter().enumerate() {
            if participant.id.as_str().is_empty() {
                return Err(Error::EmptyParticipantId { position });
            }
            if catalog.insert(participant.id.clone(), position).is_some() {
                return Err(Error::DuplicateParticipant(participant.id.clone()));
            }
        }

        let mut events = Vec::with_capacity(document.interruptions.len());
        for (position, raw) in document.interruptions.into_iter().enumerate() {
            let caller = raw.caller.ok_or(Error::MissingCaller { position })?;
            let date = parse_event_date(&raw.date).ok_or_else(|| Error::InvalidDate {
                position,
                value: raw.date.clone(),
            })?;
            events.push(InterruptionEvent {
                session: raw.session,
                date,
                caller,
                speaker: raw.speaker,
            });
        }

        let mut seen = HashSet::new();
        let session_dates: Vec<(SessionId, NaiveDate)> = events
            .iter()
            .filter(|e| seen.insert(e.session))
            .map(|e| (e.session, e.date))
            .collect();

        let stats = GlobalStats::compute(&events);
        tracing::info!(
            "Loaded {} participants, {} interruptions in {} sessions",
            document.nodes.len(),
            events.len(),
            session_dates.len()
        );

        Ok(RecordStore {
            participants: document.nodes,
            events,
            catalog,
            session_dates,
            stats,
        })
    }

    /// Participant catalog in dataset order.
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// All interruptions in dataset order.
    pub fn events(&self) -> &[InterruptionEvent] {
        &self.events
    }

    pub fn stats(&self) -> &GlobalStats {
        &self.stats
    }

    /// Look up a participant by id.
    pub fn participant(&self, id: &ParticipantId) -> Option<&Participant> {
        self.catalog.get(id).map(|&i| &self.participants[i])
    }

    /// Position of a participant in the catalog.
    pub fn catalog_position(&self, id: &ParticipantId) -> Option<usize> {
        self.catalog.get(id).copied()
    }

    /// Display name for an id, falling back to the raw id for participants
    /// missing from the catalog.
    pub fn display_name(&self, id: &ParticipantId) -> String {
        self.participant(id)
            .map_or_else(|| id.to_string(), |p| p.name.clone())
    }

    /// Distinct session ids in order of first appearance.
    pub fn sessions(&self) -> Vec<SessionId> {
        self.session_dates.iter().map(|&(s, _)| s).collect()
    }

    /// Each session paired with the date of its first interruption.
    pub fn session_dates(&self) -> &[(SessionId, NaiveDate)] {
        &self.session_dates
    }

    /// Date of the first recorded interruption of `session`.
    pub fn session_date(&self, session: SessionId) -> Option<NaiveDate> {
        self.session_dates
            .iter()
            .find(|&&(s, _)| s == session)
            .map(|&(_, date)| date)
    }
}
