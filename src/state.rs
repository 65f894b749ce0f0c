use crate::config::Config;
use crate::types::phase::Phase;
use crate::types::session::{Session, StoredSession};
use chrono::{NaiveDate, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

/// In-memory session log shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    sessions: Arc<DashMap<Uuid, StoredSession>>,
    config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Explicit override from config, else the calendar phase for `date`.
    pub fn active_phase(&self, date: NaiveDate) -> Phase {
        self.config
            .active_phase
            .unwrap_or_else(|| self.config.calendar.phase_for(date))
    }

    pub fn insert(&self, session: Session) -> StoredSession {
        let stored = StoredSession {
            id: Uuid::new_v4(),
            logged_at: Utc::now(),
            session,
        };
        self.sessions.insert(stored.id, stored.clone());
        tracing::debug!("Stored session {}. Log size: {}", stored.id, self.sessions.len());
        stored
    }

    pub fn get(&self, id: &Uuid) -> Option<StoredSession> {
        self.sessions.get(id).map(|entry| entry.value().clone())
    }

    pub fn remove(&self, id: &Uuid) -> Option<StoredSession> {
        self.sessions.remove(id).map(|(_, stored)| stored)
    }

    /// Latest first: by session date, then by when it was logged.
    pub fn list(&self, limit: usize) -> Vec<StoredSession> {
        let mut items: Vec<StoredSession> =
            self.sessions.iter().map(|entry| entry.value().clone()).collect();
        items.sort_by(|a, b| {
            b.session
                .date
                .cmp(&a.session.date)
                .then_with(|| b.logged_at.cmp(&a.logged_at))
        });
        items.truncate(limit);
        items
    }

    /// Owned copy of every session, oldest first, for the calculator.
    pub fn snapshot(&self) -> Vec<Session> {
        let mut sessions: Vec<Session> = self
            .sessions
            .iter()
            .map(|entry| entry.value().session.clone())
            .collect();
        sessions.sort_by_key(|s| s.date);
        sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
