//! Built-in hooks, one per asset kind.

pub mod achievement;
pub mod leaderboard;
pub mod rich_presence;

pub use achievement::AchievementHooks;
pub use leaderboard::LeaderboardHooks;
pub use rich_presence::RichPresenceHooks;

use cheevo_types::AssetKind;

use crate::hooks::AssetKindHooks;

/// The built-in hooks for `kind`.
pub fn hooks_for(kind: AssetKind) -> Box<dyn AssetKindHooks> {
    match kind {
        AssetKind::Achievement => Box::new(AchievementHooks),
        AssetKind::Leaderboard => Box::new(LeaderboardHooks),
        AssetKind::RichPresence => Box::new(RichPresenceHooks),
    }
}
