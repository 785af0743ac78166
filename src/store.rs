//! Persistence collaborators.
//!
//! The service talks to three external services through async traits:
//!
//! | Trait | Holds |
//! |-------|-------|
//! | [`ProgramStore`] | days, blocks per day, halls, grid configuration |
//! | [`EventConfigStore`] | per-day event windows mirrored from the days list |
//! | [`WorksCatalog`] | submitted works, read-only |
//!
//! [`MemoryStore`] implements all three for tests and embedding.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

use crate::models::{Day, EventConfig, Hall, Program, ScheduleConfig, Work};

/// Collaborator failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backing service could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),
    /// The backing service refused the write.
    #[error("store rejected write: {0}")]
    Rejected(String),
}

/// Program persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProgramStore: Send + Sync {
    /// Ordered days list.
    async fn get_days(&self) -> Result<Vec<Day>, StoreError>;
    /// Replaces the days list.
    async fn save_days(&self, days: &[Day]) -> Result<(), StoreError>;
    /// All blocks, per day.
    async fn get_all(&self) -> Result<Program, StoreError>;
    /// Replaces all blocks.
    async fn save(&self, program: &Program) -> Result<(), StoreError>;
    /// Hall list.
    async fn get_halls(&self) -> Result<Vec<Hall>, StoreError>;
    /// Replaces the hall list.
    async fn save_halls(&self, halls: &[Hall]) -> Result<(), StoreError>;
    /// Grid configuration.
    async fn get_schedule_config(&self) -> Result<ScheduleConfig, StoreError>;
    /// Replaces the grid configuration.
    async fn save_schedule_config(&self, config: &ScheduleConfig) -> Result<(), StoreError>;
}

/// Event configuration owned by another subsystem.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventConfigStore: Send + Sync {
    /// Current configuration.
    async fn get_config(&self) -> Result<EventConfig, StoreError>;
    /// Replaces the configuration.
    async fn save_config(&self, config: &EventConfig) -> Result<(), StoreError>;
}

/// Source of submitted works.
#[async_trait]
pub trait WorksCatalog: Send + Sync {
    /// All works, any status.
    async fn get_all(&self) -> Result<Vec<Work>, StoreError>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MemoryState {
    days: Vec<Day>,
    program: Program,
    halls: Vec<Hall>,
    schedule_config: ScheduleConfig,
    event_config: EventConfig,
    works: Vec<Work>,
}

/// In-process store backed by a mutex.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    /// Empty store with the default grid configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding one day and the three standard halls.
    pub fn seeded() -> Self {
        let state = MemoryState {
            days: vec![Day::numbered("day1", 1)],
            halls: vec![
                Hall::new("h1", "Auditorio Principal"),
                Hall::new("h2", "Sala 1 (Talleres)"),
                Hall::new("h3", "Sala Virtual"),
            ],
            ..MemoryState::default()
        };
        Self {
            state: Mutex::new(state),
        }
    }

    /// Replaces the days list.
    pub fn with_days(mut self, days: Vec<Day>) -> Self {
        self.state.get_mut().days = days;
        self
    }

    /// Replaces the hall list.
    pub fn with_halls(mut self, halls: Vec<Hall>) -> Self {
        self.state.get_mut().halls = halls;
        self
    }

    /// Replaces the stored program.
    pub fn with_program(mut self, program: Program) -> Self {
        self.state.get_mut().program = program;
        self
    }

    /// Replaces the works catalog.
    pub fn with_works(mut self, works: Vec<Work>) -> Self {
        self.state.get_mut().works = works;
        self
    }

    /// Snapshot of everything held, as JSON.
    pub async fn export_json(&self) -> serde_json::Result<String> {
        let state = self.state.lock().await;
        serde_json::to_string_pretty(&*state)
    }
}

#[async_trait]
impl ProgramStore for MemoryStore {
    async fn get_days(&self) -> Result<Vec<Day>, StoreError> {
        Ok(self.state.lock().await.days.clone())
    }

    async fn save_days(&self, days: &[Day]) -> Result<(), StoreError> {
        debug!(count = days.len(), "saving days");
        self.state.lock().await.days = days.to_vec();
        Ok(())
    }

    async fn get_all(&self) -> Result<Program, StoreError> {
        Ok(self.state.lock().await.program.clone())
    }

    async fn save(&self, program: &Program) -> Result<(), StoreError> {
        debug!(blocks = program.block_count(), "saving program");
        self.state.lock().await.program = program.clone();
        Ok(())
    }

    async fn get_halls(&self) -> Result<Vec<Hall>, StoreError> {
        Ok(self.state.lock().await.halls.clone())
    }

    async fn save_halls(&self, halls: &[Hall]) -> Result<(), StoreError> {
        self.state.lock().await.halls = halls.to_vec();
        Ok(())
    }

    async fn get_schedule_config(&self) -> Result<ScheduleConfig, StoreError> {
        Ok(self.state.lock().await.schedule_config.clone())
    }

    async fn save_schedule_config(&self, config: &ScheduleConfig) -> Result<(), StoreError> {
        self.state.lock().await.schedule_config = config.clone();
        Ok(())
    }
}

#[async_trait]
impl EventConfigStore for MemoryStore {
    async fn get_config(&self) -> Result<EventConfig, StoreError> {
        Ok(self.state.lock().await.event_config.clone())
    }

    async fn save_config(&self, config: &EventConfig) -> Result<(), StoreError> {
        debug!(windows = config.schedule.len(), "saving event config");
        self.state.lock().await.event_config = config.clone();
        Ok(())
    }
}

#[async_trait]
impl WorksCatalog for MemoryStore {
    async fn get_all(&self) -> Result<Vec<Work>, StoreError> {
        Ok(self.state.lock().await.works.clone())
    }
}
