use sweeper_core::{
    Coord2, GameConfig, GameError, GameSession, PlayOutcome, RandomLayoutGenerator, SessionId,
    SessionSnapshot,
};
use uuid::Uuid;
use web_time::Instant;

use crate::*;

/// Result of a reveal together with the state it left behind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealReport {
    pub outcome: PlayOutcome,
    pub snapshot: SessionSnapshot,
}

#[derive(Debug)]
pub struct GameService<S> {
    store: S,
}

impl<S: SessionStore> GameService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Creates and initializes a session with a random layout.
    pub fn create_session(&self, config: GameConfig) -> Result<SessionSnapshot> {
        self.create_session_seeded(config, rand::random())
    }

    pub fn create_session_seeded(&self, config: GameConfig, seed: u64) -> Result<SessionSnapshot> {
        let started = Instant::now();
        let id = SessionId::from_uuid(Uuid::new_v4());

        let mut session = GameSession::new(id, config);
        session.initialize(RandomLayoutGenerator::new(seed))?;
        self.store.insert(&session)?;

        log::info!(
            "Created game {} ({}x{}, {} mines) in {:.4} seconds",
            id,
            config.width(),
            config.height(),
            config.mines(),
            started.elapsed().as_secs_f64()
        );
        Ok(session.snapshot())
    }

    pub fn get_session(&self, id: SessionId) -> Result<SessionSnapshot> {
        match self.store.load(id)? {
            Some(session) => Ok(session.snapshot()),
            None => {
                log::info!("Game {} not found", id);
                Err(ServiceError::NotFound(id))
            }
        }
    }

    /// Reveals `coords` while holding the session's lock in the store.
    pub fn reveal(&self, id: SessionId, coords: Coord2) -> Result<RevealReport> {
        self.reveal_with(id, || Ok(coords))
    }

    /// Like [`GameService::reveal`], but `coords` is only resolved once the
    /// session is known to exist and accept moves.
    pub(crate) fn reveal_with(
        &self,
        id: SessionId,
        coords: impl FnOnce() -> std::result::Result<Coord2, GameError>,
    ) -> Result<RevealReport> {
        let started = Instant::now();

        let result = self
            .store
            .update(id, |session| -> std::result::Result<_, GameError> {
                session.check_playable()?;
                let coords = coords()?;
                let outcome = session.reveal_at(coords)?;
                Ok((
                    coords,
                    RevealReport {
                        outcome,
                        snapshot: session.snapshot(),
                    },
                ))
            })?
            .ok_or(ServiceError::NotFound(id))?;

        let (coords, report) = match result {
            Ok(revealed) => revealed,
            Err(GameError::AlreadyEnded) => {
                log::info!("Rejected reveal for finished game {}", id);
                return Err(GameError::AlreadyEnded.into());
            }
            Err(err) => {
                log::debug!("Rejected reveal for game {}: {}", id, err);
                return Err(err.into());
            }
        };

        let elapsed = started.elapsed().as_secs_f64();
        match report.outcome {
            PlayOutcome::AlreadyRevealed => {
                log::info!("Cell already revealed for game {} in {:.4} seconds", id, elapsed)
            }
            PlayOutcome::HitMine => log::info!("Game over for game {} in {:.4} seconds", id, elapsed),
            PlayOutcome::Revealed { cells, won } => {
                log::info!(
                    "Revealed cell {:?} for game {} in {:.4} seconds, revealed {} cells",
                    coords,
                    id,
                    elapsed,
                    cells
                );
                if won {
                    log::info!("Game {} won!", id);
                }
            }
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweeper_core::{MineLayout, PlayerCell};

    fn service() -> GameService<MemoryStore> {
        GameService::new(MemoryStore::new())
    }

    fn insert_layout(service: &GameService<MemoryStore>, mines: &[Coord2]) -> SessionId {
        let layout = MineLayout::from_mine_coords((3, 3), mines).unwrap();
        let session = GameSession::with_layout(SessionId::from_uuid(Uuid::new_v4()), layout).unwrap();
        service.store().insert(&session).unwrap();
        session.id()
    }

    #[test]
    fn created_session_is_hidden_and_fetchable() {
        let service = service();
        let config = GameConfig::new(8, 6, 10).unwrap();

        let created = service.create_session_seeded(config, 5).unwrap();
        let fetched = service.get_session(created.id).unwrap();

        assert_eq!(created, fetched);
        assert_eq!((fetched.width, fetched.height, fetched.mines), (8, 6, 10));
        assert!(fetched.view.iter().all(|cell| cell.is_hidden()));
        assert!(!fetched.game_over && !fetched.game_won);
    }

    #[test]
    fn sessions_get_distinct_ids() {
        let service = service();
        let config = GameConfig::new(5, 5, 5).unwrap();

        let first = service.create_session(config).unwrap();
        let second = service.create_session(config).unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(service.store().len(), 2);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let service = service();
        let id = SessionId::from_uuid(Uuid::new_v4());

        assert!(matches!(service.get_session(id), Err(ServiceError::NotFound(found)) if found == id));
        assert!(matches!(service.reveal(id, (0, 0)), Err(ServiceError::NotFound(_))));
    }

    #[test]
    fn reveal_is_persisted() {
        let service = service();
        let id = insert_layout(&service, &[(0, 1), (1, 0), (1, 2), (2, 1)]);

        let report = service.reveal(id, (1, 1)).unwrap();

        assert_eq!(report.outcome, PlayOutcome::Revealed { cells: 1, won: false });
        let snapshot = service.get_session(id).unwrap();
        assert_eq!(snapshot.view[(1, 1)], PlayerCell::Revealed(4));
        assert_eq!(snapshot.revealed_count, 1);
        assert_eq!(snapshot, report.snapshot);
    }

    #[test]
    fn rejected_reveals_do_not_change_the_session() {
        let service = service();
        let id = insert_layout(&service, &[(0, 0), (0, 2), (2, 0), (2, 2)]);
        let before = service.get_session(id).unwrap();

        assert!(matches!(
            service.reveal(id, (3, 0)),
            Err(ServiceError::Game(GameError::InvalidCoords))
        ));
        assert_eq!(service.get_session(id).unwrap(), before);

        let lost = service.reveal(id, (0, 0)).unwrap();
        assert_eq!(lost.outcome, PlayOutcome::HitMine);
        assert!(lost.snapshot.game_over);
        assert_eq!(lost.snapshot.revealed_count, 0);

        let err = service.reveal(id, (1, 1)).unwrap_err();
        assert!(matches!(err, ServiceError::Game(GameError::AlreadyEnded)));
        assert!(err.is_rejection());
        assert_eq!(service.get_session(id).unwrap(), lost.snapshot);
    }
}
