//! Commit state and sync status.

use std::fmt;

use fetch_my_git_git::Oid;

/// Tips of the tracked branch on both sides, and where they meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitState {
    /// Tip of the local branch.
    pub local_commit: Oid,
    /// Tip of `<remote>/<branch>`.
    pub remote_commit: Oid,
    /// Merge base of the two tips.
    pub common_base: Oid,
}

impl CommitState {
    /// The remote has commits the local branch lacks.
    pub fn unpulled(&self) -> bool {
        self.common_base != self.remote_commit
    }

    /// The local branch has commits the remote lacks.
    pub fn unpushed(&self) -> bool {
        self.common_base != self.local_commit
    }

    /// Summarises both flags.
    pub fn sync_state(&self) -> SyncState {
        match (self.unpulled(), self.unpushed()) {
            (false, false) => SyncState::UpToDate,
            (true, false) => SyncState::Unpulled,
            (false, true) => SyncState::Unpushed,
            (true, true) => SyncState::Diverged,
        }
    }
}

/// How a local branch relates to its remote-tracking branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// Same commit on both sides.
    UpToDate,
    /// Behind the remote.
    Unpulled,
    /// Ahead of the remote.
    Unpushed,
    /// Both ahead and behind.
    Diverged,
}

impl fmt::Display for SyncState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::UpToDate => "up to date",
            Self::Unpulled => "unpulled",
            Self::Unpushed => "unpushed",
            Self::Diverged => "unpulled and unpushed",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oid(byte: u8) -> Oid {
        Oid::from_bytes(&[byte; 20]).unwrap()
    }

    fn state(local: u8, remote: u8, base: u8) -> CommitState {
        CommitState {
            local_commit: oid(local),
            remote_commit: oid(remote),
            common_base: oid(base),
        }
    }

    #[test]
    fn test_same_tip_is_up_to_date() {
        let s = state(1, 1, 1);
        assert!(!s.unpulled());
        assert!(!s.unpushed());
        assert_eq!(s.sync_state(), SyncState::UpToDate);
    }

    #[test]
    fn test_behind_is_unpulled() {
        let s = state(1, 2, 1);
        assert_eq!(s.sync_state(), SyncState::Unpulled);
    }

    #[test]
    fn test_ahead_is_unpushed() {
        let s = state(2, 1, 1);
        assert_eq!(s.sync_state(), SyncState::Unpushed);
    }

    #[test]
    fn test_diverged() {
        let s = state(2, 3, 1);
        assert_eq!(s.sync_state(), SyncState::Diverged);
    }

    #[test]
    fn test_display() {
        assert_eq!(SyncState::UpToDate.to_string(), "up to date");
        assert_eq!(SyncState::Unpulled.to_string(), "unpulled");
        assert_eq!(SyncState::Unpushed.to_string(), "unpushed");
        assert_eq!(SyncState::Diverged.to_string(), "unpulled and unpushed");
    }
}
