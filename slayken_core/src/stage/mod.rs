//! Stage graph - which encounters are unlocked, completed and starred

use crate::catalog::StageNode;
use crate::types::StageId;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Stars awarded on completion
pub const COMPLETION_STARS: u8 = 3;

/// Mutable progress for one stage node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageProgress {
    pub id: StageId,
    pub unlocked: bool,
    pub completed: bool,
    /// 0 to 3
    pub stars: u8,
}

impl StageProgress {
    fn locked(id: StageId) -> Self {
        StageProgress {
            id,
            unlocked: false,
            completed: false,
            stars: 0,
        }
    }
}

/// Fresh progress: only the first node is unlocked
pub fn initial(stages: &[StageNode]) -> Vec<StageProgress> {
    let mut progress: Vec<StageProgress> = stages.iter().map(|s| StageProgress::locked(s.id)).collect();
    progress.sort_by_key(|p| p.id);
    if let Some(first) = progress.iter_mut().find(|p| p.id == StageId::FIRST) {
        first.unlocked = true;
    }
    progress
}

/// Mark a node completed with full stars and unlock its successor
///
/// Unlocking is monotonic: no node is ever locked or un-completed here, and
/// the successor is the only node that can become unlocked. An unknown id
/// leaves the list unchanged.
pub fn advance(progress: &[StageProgress], completed: StageId) -> Vec<StageProgress> {
    let mut next = progress.to_vec();

    let Some(node) = next.iter_mut().find(|p| p.id == completed) else {
        warn!(stage = %completed, "advance on unknown stage ignored");
        return next;
    };
    node.completed = true;
    node.stars = COMPLETION_STARS;

    let successor = completed.successor();
    if let Some(node) = next.iter_mut().find(|p| p.id == successor) {
        if !node.unlocked {
            info!(stage = %successor, "stage unlocked");
        }
        node.unlocked = true;
    }

    next
}

/// Whether a stage may be entered
pub fn is_playable(progress: &[StageProgress], id: StageId) -> bool {
    progress.iter().any(|p| p.id == id && p.unlocked)
}

pub fn total_stars(progress: &[StageProgress]) -> u32 {
    progress.iter().map(|p| p.stars as u32).sum()
}

/// The first unlocked stage that has not been completed yet
pub fn next_playable(progress: &[StageProgress]) -> Option<StageId> {
    progress.iter().find(|p| p.unlocked && !p.completed).map(|p| p.id)
}

/// Bring persisted progress in line with the current stage definitions
///
/// Entries for removed stages are dropped and new stages are appended
/// locked, except a new stage whose predecessor is already completed.
pub fn reconcile(progress: &[StageProgress], stages: &[StageNode]) -> Vec<StageProgress> {
    let mut out: Vec<StageProgress> = stages
        .iter()
        .map(|stage| {
            progress
                .iter()
                .find(|p| p.id == stage.id)
                .cloned()
                .unwrap_or_else(|| StageProgress::locked(stage.id))
        })
        .collect();
    out.sort_by_key(|p| p.id);

    for i in 0..out.len() {
        let unlock = out[i].id == StageId::FIRST || (i > 0 && out[i - 1].completed && out[i - 1].id.successor() == out[i].id);
        if unlock {
            out[i].unlocked = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StageKind;
    use crate::types::BossId;

    fn stages(count: u32) -> Vec<StageNode> {
        (1..=count)
            .map(|id| StageNode {
                id: StageId(id),
                name: format!("Stage {}", id),
                kind: StageKind::Normal,
                boss: BossId::from("slime_king"),
            })
            .collect()
    }

    #[test]
    fn test_initial_only_first_unlocked() {
        let progress = initial(&stages(4));
        assert_eq!(progress.len(), 4);
        assert!(progress[0].unlocked);
        assert!(progress[1..].iter().all(|p| !p.unlocked));
        assert!(progress.iter().all(|p| !p.completed && p.stars == 0));
    }

    #[test]
    fn test_advance_completes_and_unlocks_successor() {
        let progress = advance(&initial(&stages(3)), StageId(1));

        assert!(progress[0].completed);
        assert_eq!(progress[0].stars, 3);
        assert!(progress[1].unlocked);
        assert!(!progress[1].completed);
        assert!(!progress[2].unlocked);
    }

    #[test]
    fn test_advance_last_stage() {
        let mut progress = initial(&stages(2));
        progress = advance(&progress, StageId(1));
        progress = advance(&progress, StageId(2));
        assert!(progress.iter().all(|p| p.completed && p.unlocked));
    }

    #[test]
    fn test_advance_locked_node_only_unlocks_successor() {
        let before = initial(&stages(4));
        let after = advance(&before, StageId(3));

        assert!(!after[2].unlocked);
        assert!(after[2].completed);
        let newly_unlocked: Vec<StageId> = before
            .iter()
            .zip(after.iter())
            .filter(|(b, a)| !b.unlocked && a.unlocked)
            .map(|(_, a)| a.id)
            .collect();
        assert_eq!(newly_unlocked, vec![StageId(4)]);
    }

    #[test]
    fn test_advance_unknown_is_noop() {
        let progress = initial(&stages(2));
        assert_eq!(advance(&progress, StageId(9)), progress);
    }

    #[test]
    fn test_replay_keeps_state() {
        let mut progress = initial(&stages(3));
        progress = advance(&progress, StageId(1));
        progress = advance(&progress, StageId(2));
        let replayed = advance(&progress, StageId(1));

        assert_eq!(replayed, progress);
        assert!(replayed[2].unlocked);
    }

    #[test]
    fn test_queries() {
        let progress = advance(&initial(&stages(3)), StageId(1));
        assert!(is_playable(&progress, StageId(2)));
        assert!(!is_playable(&progress, StageId(3)));
        assert!(!is_playable(&progress, StageId(42)));
        assert_eq!(total_stars(&progress), 3);
        assert_eq!(next_playable(&progress), Some(StageId(2)));
    }

    #[test]
    fn test_reconcile_appends_new_stages() {
        let mut progress = initial(&stages(2));
        progress = advance(&progress, StageId(1));
        progress = advance(&progress, StageId(2));

        let reconciled = reconcile(&progress, &stages(4));
        assert_eq!(reconciled.len(), 4);
        assert!(reconciled[2].unlocked, "successor of a completed stage unlocks");
        assert!(!reconciled[3].unlocked);
        assert!(reconciled[1].completed);
    }

    #[test]
    fn test_reconcile_drops_removed_stages() {
        let progress = initial(&stages(5));
        let reconciled = reconcile(&progress, &stages(2));
        assert_eq!(reconciled.len(), 2);
        assert!(reconciled[0].unlocked);
    }
}
