//! In-memory registry of live game sessions.
//!
//! Each game owns one `GameSession` behind its own mutex, so games never
//! contend with each other. Mutations take the lock with `try_lock`: a second
//! mutation for the same game while one is in flight is rejected rather than
//! queued.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::{Mutex, MutexGuard};
use serde::Serialize;

use crate::domain::state::GameState;
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::errors::ErrorCode;

pub type GameId = i64;

/// Authoritative state of one game plus its optimistic-lock version.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSession {
    pub state: GameState,
    /// Incremented by one for every accepted mutation; starts at 0.
    pub version: u64,
}

pub type SharedSession = Arc<Mutex<GameSession>>;

#[derive(Debug)]
pub struct SessionRegistry {
    sessions: DashMap<GameId, SharedSession>,
    max_sessions: usize,
    /// Serialises inserts so the size check and the insert see the same count.
    admission: Mutex<()>,
}

impl SessionRegistry {
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: DashMap::new(),
            max_sessions,
            admission: Mutex::new(()),
        }
    }

    /// Register a new game at version 0.
    pub fn insert(&self, game_id: GameId, state: GameState) -> Result<SharedSession, AppError> {
        // Held across the check: `len` reads every shard, so taking it under
        // the entry's shard lock would deadlock.
        let _admission = self.admission.lock();
        if self.sessions.len() >= self.max_sessions {
            return Err(AppError::conflict(
                ErrorCode::SessionLimit,
                format!("Session limit of {} games reached", self.max_sessions),
            ));
        }
        match self.sessions.entry(game_id) {
            Entry::Occupied(_) => Err(AppError::conflict(
                ErrorCode::Conflict,
                format!("Game {game_id} already exists"),
            )),
            Entry::Vacant(slot) => {
                let session = Arc::new(Mutex::new(GameSession { state, version: 0 }));
                slot.insert(session.clone());
                Ok(session)
            }
        }
    }

    pub fn get(&self, game_id: GameId) -> Result<SharedSession, AppError> {
        self.sessions
            .get(&game_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| {
                DomainError::not_found(NotFoundKind::Game, format!("Game {game_id} not found"))
                    .into()
            })
    }

    /// Consistent copy of a session, waiting for any in-flight mutation.
    pub fn snapshot(&self, game_id: GameId) -> Result<GameSession, AppError> {
        let session = self.get(game_id)?;
        let guard = session.lock();
        Ok(guard.clone())
    }

    pub fn remove(&self, game_id: GameId) -> Option<GameSession> {
        self.sessions
            .remove(&game_id)
            .map(|(_, session)| session.lock().clone())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn game_ids(&self) -> Vec<GameId> {
        let mut ids: Vec<GameId> = self.sessions.iter().map(|e| *e.key()).collect();
        ids.sort_unstable();
        ids
    }
}

/// Take a session for mutation, refusing to wait behind another one.
pub fn lock_for_mutation(
    session: &SharedSession,
    game_id: GameId,
) -> Result<MutexGuard<'_, GameSession>, AppError> {
    session.try_lock().ok_or_else(|| {
        DomainError::conflict(
            ConflictKind::ConcurrentAction,
            format!("Another action for game {game_id} is being applied"),
        )
        .into()
    })
}
