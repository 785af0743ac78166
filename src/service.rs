//! Program service.
//!
//! [`ProgramService`] owns the loaded snapshot (days, blocks, halls, grid
//! configuration) and the editor state. It turns editor [`Effect`]s into
//! store writes and keeps the external event configuration in step with the
//! days list.
//!
//! The loaded snapshot is the source of truth until the next [`load`]. All
//! mutating operations take `&mut self`, so one service instance is a single
//! writer; two services over the same store resolve last-write-wins.
//!
//! [`load`]: ProgramService::load

use rand::Rng;
use tracing::{debug, info, warn};

use crate::availability::{is_slot_free, slot_options, SlotOption, SlotQuery};
use crate::conflict::{audit_day, DayConflict};
use crate::editor::{DayContext, DraftField, EditorState, Effect, Transition};
use crate::error::{ProgramError, ProgramResult};
use crate::models::{
    Block, ClockTime, Day, DayField, EventDayWindow, Hall, Program, ScheduleConfig, Work,
};
use crate::store::{EventConfigStore, ProgramStore, StoreError, WorksCatalog};
use crate::validation::{validate_program, ValidationResult};

/// Organizer action routed to the editor of the active day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorAction {
    /// Open a new block draft.
    StartCreate,
    /// Open an existing block.
    StartEdit {
        /// Block to edit.
        block_id: String,
    },
    /// Edit a draft field.
    SetField(DraftField),
    /// Validate and save the draft.
    RequestSave,
    /// Save despite conflicts.
    ConfirmOverride,
    /// Back out of the current step.
    Cancel,
    /// Ask to delete a block.
    RequestDelete {
        /// Block to delete.
        block_id: String,
    },
    /// Delete the block awaiting confirmation.
    ConfirmDelete,
}

/// Outcome of mirroring the days list into the event configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncReport {
    /// Mirror matches the days list.
    Synced,
    /// Local change kept; mirror update failed and is pending retry.
    Pending(StoreError),
}

impl SyncReport {
    /// Whether the mirror is up to date.
    pub fn is_synced(&self) -> bool {
        matches!(self, Self::Synced)
    }
}

/// A block still pointing at a removed hall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrphanedReference {
    /// Day holding the block.
    pub day_id: String,
    /// Block id.
    pub block_id: String,
    /// Removed hall.
    pub hall_id: String,
}

fn new_block_id() -> String {
    format!("blk-{:016x}", rand::rng().random::<u64>())
}

fn new_day_id(number: usize) -> String {
    format!("day{}-{:06x}", number, rand::rng().random::<u32>() & 0xff_ffff)
}

fn new_hall_id() -> String {
    format!("hall-{:08x}", rand::rng().random::<u32>())
}

/// Program editor backed by a [`ProgramStore`] and an [`EventConfigStore`].
pub struct ProgramService<S, E> {
    store: S,
    event_config: E,
    days: Vec<Day>,
    program: Program,
    halls: Vec<Hall>,
    config: ScheduleConfig,
    active_day: Option<String>,
    editor: EditorState,
    pending_sync: Option<usize>,
}

impl<S: ProgramStore, E: EventConfigStore> ProgramService<S, E> {
    /// Loads days, blocks, halls and grid configuration.
    ///
    /// Every listed day gets a (possibly empty) block list. The first day
    /// becomes active.
    pub async fn load(store: S, event_config: E) -> ProgramResult<Self> {
        let days = store.get_days().await?;
        let mut program = store.get_all().await?;
        let halls = store.get_halls().await?;
        let config = store.get_schedule_config().await?;

        for day in &days {
            program.ensure_day(day.id.as_str());
        }
        let active_day = days.first().map(|d| d.id.clone());

        info!(
            days = days.len(),
            blocks = program.block_count(),
            halls = halls.len(),
            "program loaded"
        );

        Ok(Self {
            store,
            event_config,
            days,
            program,
            halls,
            config,
            active_day,
            editor: EditorState::Idle,
            pending_sync: None,
        })
    }

    /// Ordered days.
    pub fn days(&self) -> &[Day] {
        &self.days
    }

    /// Loaded blocks.
    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Known halls.
    pub fn halls(&self) -> &[Hall] {
        &self.halls
    }

    /// Grid configuration.
    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Current editor state.
    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    /// Program store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Event configuration store.
    pub fn event_config(&self) -> &E {
        &self.event_config
    }

    /// Active day id.
    pub fn active_day(&self) -> Option<&str> {
        self.active_day.as_deref()
    }

    /// Day count still waiting to be mirrored, if a sync failed.
    pub fn pending_sync(&self) -> Option<usize> {
        self.pending_sync
    }

    /// Blocks of the active day.
    pub fn active_blocks(&self) -> ProgramResult<&[Block]> {
        let day_id = self.active_day.as_deref().ok_or(ProgramError::NoActiveDay)?;
        Ok(self.program.blocks(day_id))
    }

    /// Switches the active day. Any open draft is discarded.
    pub fn set_active_day(&mut self, day_id: &str) -> ProgramResult<()> {
        if !self.days.iter().any(|d| d.id == day_id) {
            return Err(ProgramError::UnknownDay(day_id.to_string()));
        }
        if !self.editor.is_idle() {
            debug!(state = self.editor.name(), "discarding open draft");
        }
        self.editor = EditorState::Idle;
        self.active_day = Some(day_id.to_string());
        Ok(())
    }

    // ------------------------------------------------------------------
    // Editor
    // ------------------------------------------------------------------

    /// Runs an editor action on the active day.
    ///
    /// Persist effects are carried out here; the returned effects are the
    /// ones for the organizer (conflicts to show, validation messages). On a
    /// store failure the in-memory change stays applied and the error is
    /// returned.
    pub async fn dispatch(&mut self, action: EditorAction) -> ProgramResult<Vec<Effect>> {
        let day_id = self.active_day.clone().ok_or(ProgramError::NoActiveDay)?;
        match &action {
            EditorAction::StartEdit { block_id } | EditorAction::RequestDelete { block_id }
                if self.program.find_block(&day_id, block_id).is_none() =>
            {
                return Err(ProgramError::UnknownBlock(block_id.clone()));
            }
            _ => {}
        }

        let state = std::mem::take(&mut self.editor);
        let transition = {
            let ctx = DayContext {
                day_id: &day_id,
                blocks: self.program.blocks(&day_id),
                halls: &self.halls,
                config: &self.config,
            };
            match action {
                EditorAction::StartCreate => state.start_create(&ctx, new_block_id()),
                EditorAction::StartEdit { block_id } => {
                    match ctx.blocks.iter().find(|b| b.id == block_id) {
                        Some(block) => state.start_edit(block, ctx.halls),
                        None => Transition {
                            state,
                            effects: Vec::new(),
                        },
                    }
                }
                EditorAction::SetField(field) => state.set_field(field),
                EditorAction::RequestSave => state.request_save(&ctx),
                EditorAction::ConfirmOverride => state.confirm_override(&ctx),
                EditorAction::Cancel => state.cancel(),
                EditorAction::RequestDelete { block_id } => state.request_delete(block_id),
                EditorAction::ConfirmDelete => state.confirm_delete(&ctx),
            }
        };

        self.editor = transition.state;
        let mut shown = Vec::new();
        for effect in transition.effects {
            match effect {
                Effect::PersistDay { day_id, blocks } => {
                    self.program.set_blocks(day_id, blocks);
                    self.store.save(&self.program).await?;
                }
                other => shown.push(other),
            }
        }
        Ok(shown)
    }

    /// Start options for the active day's grid.
    pub fn slot_options(&self, query: &SlotQuery) -> ProgramResult<Vec<SlotOption>> {
        Ok(slot_options(&self.config, self.active_blocks()?, &self.halls, query))
    }

    /// Whether `query` fits at `start` on the active day.
    pub fn is_slot_free(&self, start: ClockTime, query: &SlotQuery) -> ProgramResult<bool> {
        Ok(is_slot_free(self.active_blocks()?, &self.halls, start, query))
    }

    /// Conflicts already stored on the active day.
    pub fn audit_active_day(&self) -> ProgramResult<Vec<DayConflict>> {
        Ok(audit_day(self.active_blocks()?, &self.halls))
    }

    /// Integrity check of the whole loaded program.
    pub fn validate(&self) -> ValidationResult {
        validate_program(&self.days, &self.program, &self.halls)
    }

    /// Validates and stores a new grid configuration.
    pub async fn configure_schedule(&mut self, config: ScheduleConfig) -> ProgramResult<()> {
        config.validate().map_err(ProgramError::InvalidConfig)?;
        self.store.save_schedule_config(&config).await?;
        info!(
            start = %config.start_time,
            end = %config.end_time,
            interval = config.interval,
            "schedule configured"
        );
        self.config = config;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Days
    // ------------------------------------------------------------------

    /// Appends a day and makes it active.
    pub async fn add_day(&mut self) -> ProgramResult<SyncReport> {
        let number = self.days.len() + 1;
        let day = Day::numbered(new_day_id(number), number);
        let day_id = day.id.clone();

        self.days.push(day);
        self.program.ensure_day(day_id.as_str());
        self.editor = EditorState::Idle;
        self.active_day = Some(day_id.clone());

        self.persist_days().await?;
        info!(day_id = %day_id, days = self.days.len(), "day added");

        Ok(self.sync_event_config().await)
    }

    /// Removes a day and its blocks. The last remaining day cannot be removed.
    pub async fn remove_day(&mut self, day_id: &str) -> ProgramResult<SyncReport> {
        let index = self
            .days
            .iter()
            .position(|d| d.id == day_id)
            .ok_or_else(|| ProgramError::UnknownDay(day_id.to_string()))?;
        if self.days.len() == 1 {
            return Err(ProgramError::LastDay);
        }

        self.days.remove(index);
        let dropped = self.program.remove_day(day_id).map_or(0, |b| b.len());
        if self.active_day.as_deref() == Some(day_id) {
            self.editor = EditorState::Idle;
            self.active_day = self.days.first().map(|d| d.id.clone());
        }

        self.persist_days().await?;
        info!(day_id, blocks = dropped, days = self.days.len(), "day removed");

        Ok(self.sync_event_config().await)
    }

    /// Persists a changed days list. On failure the mirror is marked
    /// pending as well, so a later retry still reconciles it.
    async fn persist_days(&mut self) -> Result<(), StoreError> {
        let saved = match self.store.save_days(&self.days).await {
            Ok(()) => self.store.save(&self.program).await,
            Err(err) => Err(err),
        };
        if let Err(err) = &saved {
            warn!(%err, days = self.days.len(), "saving days failed, event config sync pending");
            self.pending_sync = Some(self.days.len());
        }
        saved
    }

    /// Changes a day's label or date.
    pub async fn update_day(&mut self, day_id: &str, field: DayField) -> ProgramResult<()> {
        let day = self
            .days
            .iter_mut()
            .find(|d| d.id == day_id)
            .ok_or_else(|| ProgramError::UnknownDay(day_id.to_string()))?;
        day.apply(field);
        self.store.save_days(&self.days).await?;
        debug!(day_id, "day updated");
        Ok(())
    }

    /// Re-attempts a failed event-config sync. No-op when nothing is pending.
    pub async fn retry_event_config_sync(&mut self) -> SyncReport {
        if self.pending_sync.is_none() {
            return SyncReport::Synced;
        }
        self.sync_event_config().await
    }

    async fn sync_event_config(&mut self) -> SyncReport {
        let target = self.days.len();
        match self.push_event_config().await {
            Ok(()) => {
                self.pending_sync = None;
                debug!(days = target, "event config synced");
                SyncReport::Synced
            }
            Err(err) => {
                warn!(%err, days = target, "event config sync failed, pending retry");
                self.pending_sync = Some(target);
                SyncReport::Pending(err)
            }
        }
    }

    async fn push_event_config(&self) -> Result<(), StoreError> {
        let mut mirror = self.event_config.get_config().await?;
        mirror.schedule.truncate(self.days.len());
        for day in self.days.iter().skip(mirror.schedule.len()) {
            mirror.schedule.push(EventDayWindow {
                date: day.date.clone(),
                start_time: self.config.start_time,
                end_time: self.config.end_time,
            });
        }
        self.event_config.save_config(&mirror).await
    }

    // ------------------------------------------------------------------
    // Halls
    // ------------------------------------------------------------------

    /// Adds a hall. Names are unique, ignoring case and surrounding space.
    pub async fn add_hall(&mut self, name: &str) -> ProgramResult<Hall> {
        let name = name.trim();
        if self.halls.iter().any(|h| h.has_name(name)) {
            return Err(ProgramError::DuplicateHall(name.to_string()));
        }
        let hall = Hall::new(new_hall_id(), name);
        self.halls.push(hall.clone());
        self.store.save_halls(&self.halls).await?;
        info!(hall_id = %hall.id, name, "hall added");
        Ok(hall)
    }

    /// Renames a hall. Blocks reference halls by id, so they follow.
    pub async fn rename_hall(&mut self, hall_id: &str, name: &str) -> ProgramResult<()> {
        let name = name.trim();
        if self.halls.iter().any(|h| h.id != hall_id && h.has_name(name)) {
            return Err(ProgramError::DuplicateHall(name.to_string()));
        }
        let hall = self
            .halls
            .iter_mut()
            .find(|h| h.id == hall_id)
            .ok_or_else(|| ProgramError::UnknownHall(hall_id.to_string()))?;
        hall.name = name.to_string();
        self.store.save_halls(&self.halls).await?;
        info!(hall_id, name, "hall renamed");
        Ok(())
    }

    /// Removes a hall and returns the blocks still pointing at it.
    ///
    /// Blocks are left untouched; [`validate`](Self::validate) keeps
    /// reporting them until they are edited or deleted.
    pub async fn remove_hall(&mut self, hall_id: &str) -> ProgramResult<Vec<OrphanedReference>> {
        let index = self
            .halls
            .iter()
            .position(|h| h.id == hall_id)
            .ok_or_else(|| ProgramError::UnknownHall(hall_id.to_string()))?;
        self.halls.remove(index);
        self.store.save_halls(&self.halls).await?;

        let orphans: Vec<OrphanedReference> = self
            .program
            .blocks_referencing_hall(hall_id)
            .into_iter()
            .map(|(day_id, block_id)| OrphanedReference {
                day_id,
                block_id,
                hall_id: hall_id.to_string(),
            })
            .collect();

        if orphans.is_empty() {
            info!(hall_id, "hall removed");
        } else {
            warn!(hall_id, orphaned = orphans.len(), "hall removed, blocks still reference it");
        }
        Ok(orphans)
    }
}

/// Works that may be linked to a block or session.
pub async fn accepted_works<W: WorksCatalog + ?Sized>(catalog: &W) -> ProgramResult<Vec<Work>> {
    let works = catalog.get_all().await?;
    Ok(works.into_iter().filter(Work::is_accepted).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::DraftError;
    use crate::models::{parse_interval, EventConfig};
    use crate::store::{MemoryStore, MockEventConfigStore, MockProgramStore};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    type MemoryService = ProgramService<MemoryStore, MemoryStore>;

    fn at(text: &str) -> ClockTime {
        text.parse().unwrap()
    }

    async fn seeded() -> MemoryService {
        ProgramService::load(MemoryStore::seeded(), MemoryStore::new())
            .await
            .unwrap()
    }

    fn draft_id(service: &ProgramService<impl ProgramStore, impl EventConfigStore>) -> String {
        service.editor().draft().unwrap().id.clone()
    }

    #[tokio::test]
    async fn test_load_seeded() {
        let service = seeded().await;
        assert_eq!(service.active_day(), Some("day1"));
        assert_eq!(service.halls().len(), 3);
        assert!(service.active_blocks().unwrap().is_empty());
        assert!(service.validate().is_ok());
    }

    #[tokio::test]
    async fn test_end_to_end_conflict_override_and_delete() {
        let store = MemoryStore::new().with_days(vec![Day::numbered("day1", 1)]);
        let mut service = ProgramService::load(store, MemoryStore::new()).await.unwrap();

        service
            .configure_schedule(ScheduleConfig::new(at("08:00"), at("18:00"), 30))
            .await
            .unwrap();
        let hall = service.add_hall("Auditorio A").await.unwrap();

        service.dispatch(EditorAction::StartCreate).await.unwrap();
        let opening_id = draft_id(&service);
        for field in [
            DraftField::Hall(hall.id.clone()),
            DraftField::StartTime(Some(at("08:00"))),
            DraftField::Duration(60),
            DraftField::Title("Opening".into()),
        ] {
            service.dispatch(EditorAction::SetField(field)).await.unwrap();
        }
        let shown = service.dispatch(EditorAction::RequestSave).await.unwrap();
        assert!(shown.is_empty());
        assert!(service.editor().is_idle());

        service.dispatch(EditorAction::StartCreate).await.unwrap();
        let panel_id = draft_id(&service);
        for field in [
            DraftField::StartTime(Some(at("08:30"))),
            DraftField::Duration(60),
            DraftField::Title("Panel".into()),
        ] {
            service.dispatch(EditorAction::SetField(field)).await.unwrap();
        }
        let shown = service.dispatch(EditorAction::RequestSave).await.unwrap();
        let conflicts = match shown.as_slice() {
            [Effect::ShowConflicts(conflicts)] => conflicts,
            other => panic!("expected conflicts, got {other:?}"),
        };
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].block_id, opening_id);
        assert!(conflicts[0].reason.contains("Auditorio A"));
        assert!(conflicts[0].reason.contains("08:00 - 09:00"));

        let query = SlotQuery::full(hall.id.as_str(), 60, panel_id.as_str());
        assert!(!service.is_slot_free(at("08:30"), &query).unwrap());

        let shown = service.dispatch(EditorAction::ConfirmOverride).await.unwrap();
        assert!(shown.is_empty());
        let stored = ProgramStore::get_all(service.store()).await.unwrap();
        assert_eq!(stored.blocks("day1").len(), 2);
        assert_eq!(service.audit_active_day().unwrap().len(), 1);

        service
            .dispatch(EditorAction::RequestDelete {
                block_id: opening_id.clone(),
            })
            .await
            .unwrap();
        service.dispatch(EditorAction::ConfirmDelete).await.unwrap();
        assert!(service.is_slot_free(at("08:30"), &query).unwrap());
        let stored = ProgramStore::get_all(service.store()).await.unwrap();
        assert_eq!(stored.blocks("day1").len(), 1);
        assert_eq!(stored.blocks("day1")[0].id, panel_id);
    }

    #[tokio::test]
    async fn test_save_rejected_keeps_draft() {
        let mut service = seeded().await;
        service.dispatch(EditorAction::StartCreate).await.unwrap();
        service
            .dispatch(EditorAction::SetField(DraftField::EndTime(None)))
            .await
            .unwrap();
        let shown = service.dispatch(EditorAction::RequestSave).await.unwrap();
        assert_eq!(shown, vec![Effect::Reject(DraftError::MissingEndTime)]);
        assert!(service.editor().draft().is_some());
        assert!(service.active_blocks().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_edit_unknown_block() {
        let mut service = seeded().await;
        let err = service
            .dispatch(EditorAction::StartEdit {
                block_id: "nope".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ProgramError::UnknownBlock(id) if id == "nope"));
        assert!(service.editor().is_idle());
    }

    #[tokio::test]
    async fn test_add_and_remove_day_keeps_mirror_in_step() {
        let mut service = seeded().await;
        assert!(service.add_day().await.unwrap().is_synced());
        assert!(service.add_day().await.unwrap().is_synced());
        assert_eq!(service.days().len(), 3);
        assert_eq!(service.days()[2].label, "Día 3");
        assert!(service.days()[2].id.starts_with("day3-"));
        assert_eq!(service.active_day(), Some(service.days()[2].id.as_str()));

        let mirror = service.event_config().get_config().await.unwrap();
        assert_eq!(mirror.schedule.len(), 3);

        let removed = service.days()[2].id.clone();
        assert!(service.remove_day(&removed).await.unwrap().is_synced());
        assert_eq!(service.active_day(), Some("day1"));

        let mirror = service.event_config().get_config().await.unwrap();
        assert_eq!(mirror.schedule.len(), service.days().len());
        assert!(!service.program().has_day(&removed));
    }

    #[tokio::test]
    async fn test_last_day_cannot_be_removed() {
        let mut service = seeded().await;
        let err = service.remove_day("day1").await.unwrap_err();
        assert!(matches!(err, ProgramError::LastDay));
        assert_eq!(service.days().len(), 1);
    }

    #[tokio::test]
    async fn test_event_config_failure_is_pending_then_retried() {
        let mut mirror = MockEventConfigStore::new();
        mirror
            .expect_get_config()
            .returning(|| Ok(EventConfig::default()));
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        mirror.expect_save_config().returning(move |_| {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(StoreError::Unavailable("config service down".into()))
            } else {
                Ok(())
            }
        });

        let mut service = ProgramService::load(MemoryStore::seeded(), mirror).await.unwrap();
        let report = service.add_day().await.unwrap();
        assert!(matches!(report, SyncReport::Pending(StoreError::Unavailable(_))));
        assert_eq!(service.days().len(), 2);
        assert_eq!(service.pending_sync(), Some(2));

        assert!(service.retry_event_config_sync().await.is_synced());
        assert_eq!(service.pending_sync(), None);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_day_save_leaves_sync_pending() {
        let mut store = MockProgramStore::new();
        store
            .expect_get_days()
            .returning(|| Ok(vec![Day::numbered("day1", 1)]));
        store.expect_get_all().returning(|| Ok(Program::new()));
        store.expect_get_halls().returning(|| Ok(Vec::new()));
        store
            .expect_get_schedule_config()
            .returning(|| Ok(ScheduleConfig::default()));
        store
            .expect_save_days()
            .returning(|_| Err(StoreError::Rejected("read-only".into())));

        let mut service = ProgramService::load(store, MemoryStore::new()).await.unwrap();
        let err = service.add_day().await.unwrap_err();
        assert!(matches!(err, ProgramError::Store(StoreError::Rejected(_))));
        assert_eq!(service.days().len(), 2);
        assert_eq!(service.pending_sync(), Some(2));

        assert!(service.retry_event_config_sync().await.is_synced());
        let mirror = service.event_config().get_config().await.unwrap();
        assert_eq!(mirror.schedule.len(), service.days().len());
        assert_eq!(service.pending_sync(), None);
    }

    #[tokio::test]
    async fn test_update_day() {
        let mut service = seeded().await;
        service
            .update_day("day1", DayField::Date("12 de mayo".into()))
            .await
            .unwrap();
        let days = service.store().get_days().await.unwrap();
        assert_eq!(days[0].date, "12 de mayo");
        assert!(matches!(
            service.update_day("x", DayField::Label("y".into())).await,
            Err(ProgramError::UnknownDay(_))
        ));
    }

    #[tokio::test]
    async fn test_hall_management() {
        let mut service = seeded().await;
        let err = service.add_hall(" sala virtual ").await.unwrap_err();
        assert!(matches!(err, ProgramError::DuplicateHall(_)));

        service.rename_hall("h3", "Sala Híbrida").await.unwrap();
        assert_eq!(service.halls()[2].name, "Sala Híbrida");
        assert!(matches!(
            service.rename_hall("h2", "Sala Híbrida").await,
            Err(ProgramError::DuplicateHall(_))
        ));
        assert!(matches!(
            service.remove_hall("h9").await,
            Err(ProgramError::UnknownHall(_))
        ));
    }

    #[tokio::test]
    async fn test_remove_hall_reports_orphans() {
        let mut program = Program::new();
        program.set_blocks(
            "day1",
            vec![Block::full("b1", parse_interval("08:00 - 09:00").unwrap(), "h2", "Taller")],
        );
        let store = MemoryStore::seeded().with_program(program);
        let mut service = ProgramService::load(store, MemoryStore::new()).await.unwrap();

        let orphans = service.remove_hall("h2").await.unwrap();
        assert_eq!(
            orphans,
            vec![OrphanedReference {
                day_id: "day1".into(),
                block_id: "b1".into(),
                hall_id: "h2".into(),
            }]
        );
        assert!(service.validate().is_err());
    }

    #[tokio::test]
    async fn test_configure_schedule_rejects_invalid() {
        let mut service = seeded().await;
        let err = service
            .configure_schedule(ScheduleConfig::new(at("18:00"), at("08:00"), 30))
            .await
            .unwrap_err();
        assert!(matches!(err, ProgramError::InvalidConfig(_)));
        assert_eq!(service.config(), &ScheduleConfig::default());

        let err = service
            .configure_schedule(ScheduleConfig::new(at("08:00"), at("18:00"), 0))
            .await
            .unwrap_err();
        assert!(matches!(err, ProgramError::InvalidConfig(_)));
    }

    #[tokio::test]
    async fn test_slot_options_for_active_day() {
        let mut program = Program::new();
        program.set_blocks(
            "day1",
            vec![Block::full("b1", parse_interval("08:00 - 09:00").unwrap(), "h1", "Opening")],
        );
        let store = MemoryStore::seeded().with_program(program);
        let mut service = ProgramService::load(store, MemoryStore::new()).await.unwrap();
        service
            .configure_schedule(ScheduleConfig::new(at("08:00"), at("10:00"), 30))
            .await
            .unwrap();

        let options = service.slot_options(&SlotQuery::full("h1", 30, "new")).unwrap();
        let free: Vec<String> = options
            .iter()
            .filter(|o| o.free)
            .map(|o| o.start.to_string())
            .collect();
        assert_eq!(free, vec!["09:00", "09:30"]);
    }

    #[tokio::test]
    async fn test_set_active_day_discards_draft() {
        let mut service = seeded().await;
        service.dispatch(EditorAction::StartCreate).await.unwrap();
        service.set_active_day("day1").unwrap();
        assert!(service.editor().is_idle());
        assert!(service.set_active_day("nope").is_err());
    }

    #[tokio::test]
    async fn test_accepted_works() {
        let catalog = MemoryStore::new().with_works(vec![
            Work::new("w1", "Redes neuronales", "Ana", "accepted"),
            Work::new("w2", "Borrador", "Luis", "pending"),
        ]);
        let works = accepted_works(&catalog).await.unwrap();
        assert_eq!(works.len(), 1);
        assert_eq!(works[0].id, "w1");
    }
}
