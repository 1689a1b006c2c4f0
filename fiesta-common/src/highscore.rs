//! Mini-game high score record and game counter
//!
//! The record is stored as JSON `{ "name": ..., "score": ... }`. The counter
//! of games played is a plain integer key.

use crate::events::{EventBus, FiestaEvent};
use crate::store::{Keys, SharedStore};
use crate::Result;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Maximum stored length of a player name
pub const MAX_PLAYER_NAME_LEN: usize = 20;

/// Name used when the player leaves it blank
pub const ANONYMOUS_PLAYER: &str = "Anónimo";

/// Name of the placeholder record written by a reset
pub const RESET_PLAYER: &str = "Nadie";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    pub name: String,
    pub score: i64,
}

/// Outcome of submitting a finished game
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSubmission {
    pub new_record: bool,
    pub high_score: Option<HighScore>,
    pub total_games: i64,
}

#[derive(Clone)]
pub struct HighScoreStore {
    store: SharedStore,
    keys: Keys,
    events: EventBus,
}

fn clean_player_name(name: &str) -> String {
    let trimmed: String = name.trim().chars().take(MAX_PLAYER_NAME_LEN).collect();
    if trimmed.is_empty() {
        ANONYMOUS_PLAYER.to_string()
    } else {
        trimmed
    }
}

impl HighScoreStore {
    pub fn new(store: SharedStore, keys: Keys, events: EventBus) -> Self {
        Self { store, keys, events }
    }

    /// Current record, if any
    ///
    /// An unreadable stored value is logged and treated as no record.
    pub async fn get(&self) -> Result<Option<HighScore>> {
        let Some(raw) = self.store.get(&self.keys.high_score()).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable high score record");
                Ok(None)
            }
        }
    }

    /// Number of games recorded since the last reset
    pub async fn total_games(&self) -> Result<i64> {
        Ok(self
            .store
            .get(&self.keys.total_games())
            .await?
            .and_then(|v| v.parse().ok())
            .unwrap_or(0))
    }

    /// Record a finished game; replaces the record only on a strictly
    /// higher score
    pub async fn submit(&self, name: &str, score: i64) -> Result<ScoreSubmission> {
        let total_games = self.store.incr(&self.keys.total_games()).await?;
        let current = self.get().await?;

        let beats = current.as_ref().map_or(true, |c| score > c.score);
        let high_score = if beats {
            let record = HighScore {
                name: clean_player_name(name),
                score,
            };
            self.store
                .set(&self.keys.high_score(), &serde_json::to_string(&record)?)
                .await?;
            info!(name = %record.name, score, "New high score");
            Some(record)
        } else {
            current
        };

        self.events.emit_lossy(FiestaEvent::HighScoreChanged);
        Ok(ScoreSubmission {
            new_record: beats,
            high_score,
            total_games,
        })
    }

    /// Overwrite the record with a zero score and clear the game counter
    pub async fn reset(&self) -> Result<()> {
        let zero = HighScore {
            name: RESET_PLAYER.to_string(),
            score: 0,
        };
        self.store
            .set(&self.keys.high_score(), &serde_json::to_string(&zero)?)
            .await?;
        self.store.del(&[self.keys.total_games()]).await?;
        info!("High score reset");
        self.events.emit_lossy(FiestaEvent::HighScoreChanged);
        Ok(())
    }
}
