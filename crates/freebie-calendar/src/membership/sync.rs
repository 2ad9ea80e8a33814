use super::sets::{ClaimedFreebies, SavedFreebies};
use crate::catalog::OfferId;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// A single local transition that the persistence backend should mirror.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MembershipChange {
    Saved { offer_id: OfferId },
    Unsaved { offer_id: OfferId },
    Claimed { offer_id: OfferId, year: i32 },
    Unclaimed { offer_id: OfferId, year: i32 },
    ClearedSaved,
    ClearedClaimed,
}

/// Outbound hook to whatever backend persists the user's sets.
pub trait MembershipSync: Send + Sync {
    fn push(&self, change: &MembershipChange) -> Result<(), SyncError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("membership backend unavailable: {0}")]
    Unavailable(String),
    #[error("membership backend rejected change: {0}")]
    Rejected(String),
}

/// Local saved/claimed state paired with a sync backend. The local sets
/// are the source of truth; backend failures are logged and queued.
///
/// The backend always sees changes in the order they happened locally:
/// while anything is queued, new changes join the back of the queue.
#[derive(Debug)]
pub struct MembershipLedger<S> {
    saved: SavedFreebies,
    claimed: ClaimedFreebies,
    sync: S,
    pending: Vec<MembershipChange>,
}

impl<S> MembershipLedger<S>
where
    S: MembershipSync,
{
    pub fn new(sync: S) -> Self {
        Self::with_state(sync, SavedFreebies::default(), ClaimedFreebies::default())
    }

    pub fn with_state(sync: S, saved: SavedFreebies, claimed: ClaimedFreebies) -> Self {
        Self {
            saved,
            claimed,
            sync,
            pending: Vec::new(),
        }
    }

    pub fn saved(&self) -> &SavedFreebies {
        &self.saved
    }

    pub fn claimed(&self) -> &ClaimedFreebies {
        &self.claimed
    }

    pub fn pending(&self) -> &[MembershipChange] {
        &self.pending
    }

    pub fn sync(&self) -> &S {
        &self.sync
    }

    pub fn save(&mut self, offer_id: OfferId) {
        if self.saved.save(offer_id.clone()) {
            self.push(MembershipChange::Saved { offer_id });
        }
    }

    pub fn unsave(&mut self, offer_id: &OfferId) {
        if self.saved.unsave(offer_id) {
            self.push(MembershipChange::Unsaved {
                offer_id: offer_id.clone(),
            });
        }
    }

    pub fn toggle_saved(&mut self, offer_id: OfferId) -> bool {
        let now_saved = self.saved.toggle(offer_id.clone());
        let change = if now_saved {
            MembershipChange::Saved { offer_id }
        } else {
            MembershipChange::Unsaved { offer_id }
        };
        self.push(change);
        now_saved
    }

    pub fn clear_saved(&mut self) {
        if self.saved.is_empty() {
            return;
        }
        self.saved.clear_all();
        self.push(MembershipChange::ClearedSaved);
    }

    /// Drops every claim in every year.
    pub fn clear_claimed(&mut self) {
        if self.claimed.is_empty() {
            return;
        }
        self.claimed.clear_all();
        self.push(MembershipChange::ClearedClaimed);
    }

    pub fn claim(&mut self, offer_id: OfferId, year: i32) {
        if self.claimed.claim(offer_id.clone(), year) {
            self.push(MembershipChange::Claimed { offer_id, year });
        }
    }

    pub fn unclaim(&mut self, offer_id: &OfferId, year: i32) {
        if self.claimed.unclaim(offer_id, year) {
            self.push(MembershipChange::Unclaimed {
                offer_id: offer_id.clone(),
                year,
            });
        }
    }

    pub fn toggle_claimed(&mut self, offer_id: OfferId, year: i32) -> bool {
        let now_claimed = self.claimed.toggle(offer_id.clone(), year);
        let change = if now_claimed {
            MembershipChange::Claimed { offer_id, year }
        } else {
            MembershipChange::Unclaimed { offer_id, year }
        };
        self.push(change);
        now_claimed
    }

    /// Replays queued changes oldest first and stops at the first failure,
    /// leaving it and everything behind it queued. Returns how many went
    /// through.
    pub fn retry_pending(&mut self) -> usize {
        let attempted = self.pending.len();
        let mut delivered = 0;

        for change in &self.pending {
            if let Err(err) = self.sync.push(change) {
                warn!(error = %err, ?change, "membership retry failed; keeping queue");
                break;
            }
            delivered += 1;
        }

        self.pending.drain(..delivered);
        debug!(attempted, delivered, "retried pending membership changes");
        delivered
    }

    fn push(&mut self, change: MembershipChange) {
        if !self.pending.is_empty() {
            debug!(?change, queued = self.pending.len(), "queueing behind pending changes");
            self.pending.push(change);
            return;
        }

        if let Err(err) = self.sync.push(&change) {
            warn!(error = %err, ?change, "membership sync failed; keeping local state");
            self.pending.push(change);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Default, Clone)]
    struct MemorySync {
        offline: Arc<AtomicBool>,
        delivered: Arc<Mutex<Vec<MembershipChange>>>,
    }

    impl MemorySync {
        fn delivered(&self) -> Vec<MembershipChange> {
            self.delivered.lock().expect("lock").clone()
        }

        fn set_offline(&self, offline: bool) {
            self.offline.store(offline, Ordering::SeqCst);
        }
    }

    impl MembershipSync for MemorySync {
        fn push(&self, change: &MembershipChange) -> Result<(), SyncError> {
            if self.offline.load(Ordering::SeqCst) {
                return Err(SyncError::Unavailable("offline".to_string()));
            }
            self.delivered.lock().expect("lock").push(change.clone());
            Ok(())
        }
    }

    #[test]
    fn local_changes_are_pushed_once() {
        let sync = MemorySync::default();
        let mut ledger = MembershipLedger::new(sync.clone());

        ledger.save(OfferId::from("a"));
        ledger.save(OfferId::from("a"));
        ledger.claim(OfferId::from("a"), 2026);

        assert_eq!(
            sync.delivered(),
            vec![
                MembershipChange::Saved {
                    offer_id: OfferId::from("a")
                },
                MembershipChange::Claimed {
                    offer_id: OfferId::from("a"),
                    year: 2026
                },
            ]
        );
        assert!(ledger.pending().is_empty());
    }

    #[test]
    fn sync_failure_keeps_local_state_and_queues_change() {
        let sync = MemorySync::default();
        sync.set_offline(true);
        let mut ledger = MembershipLedger::new(sync.clone());

        assert!(ledger.toggle_saved(OfferId::from("a")));
        ledger.claim(OfferId::from("a"), 2026);

        assert!(ledger.saved().is_saved(&OfferId::from("a")));
        assert!(ledger.claimed().is_claimed(&OfferId::from("a"), 2026));
        assert_eq!(ledger.pending().len(), 2);
        assert!(sync.delivered().is_empty());

        assert_eq!(ledger.retry_pending(), 0);
        assert_eq!(ledger.pending().len(), 2);

        sync.set_offline(false);
        assert_eq!(ledger.retry_pending(), 2);
        assert!(ledger.pending().is_empty());
        assert_eq!(sync.delivered().len(), 2);
    }

    #[test]
    fn changes_made_while_queued_wait_their_turn() {
        let sync = MemorySync::default();
        sync.set_offline(true);
        let mut ledger = MembershipLedger::new(sync.clone());

        ledger.save(OfferId::from("a"));
        sync.set_offline(false);
        ledger.unsave(&OfferId::from("a"));

        assert!(sync.delivered().is_empty());
        assert_eq!(ledger.pending().len(), 2);

        assert_eq!(ledger.retry_pending(), 2);
        assert_eq!(
            sync.delivered(),
            vec![
                MembershipChange::Saved {
                    offer_id: OfferId::from("a")
                },
                MembershipChange::Unsaved {
                    offer_id: OfferId::from("a")
                },
            ]
        );
        assert!(!ledger.saved().is_saved(&OfferId::from("a")));
    }

    #[test]
    fn clear_claimed_pushes_once_and_skips_empty_sets() {
        let sync = MemorySync::default();
        let mut ledger = MembershipLedger::new(sync.clone());

        ledger.clear_claimed();
        ledger.claim(OfferId::from("a"), 2025);
        ledger.claim(OfferId::from("b"), 2026);
        ledger.clear_claimed();

        assert!(ledger.claimed().is_empty());
        assert_eq!(
            sync.delivered().last(),
            Some(&MembershipChange::ClearedClaimed)
        );
        assert_eq!(sync.delivered().len(), 3);
    }

    #[test]
    fn no_op_transitions_are_not_pushed() {
        let sync = MemorySync::default();
        let mut ledger = MembershipLedger::new(sync.clone());

        ledger.unsave(&OfferId::from("missing"));
        ledger.unclaim(&OfferId::from("missing"), 2026);
        ledger.clear_saved();
        ledger.clear_claimed();

        assert!(sync.delivered().is_empty());
    }
}
