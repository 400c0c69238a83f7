//! Achievement records and the default notifier.
//!
//! Recording an achievement is an opaque, best-effort hook. The default
//! [`LoggingNotifier`] only emits a structured log event.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::UserProfile;
use crate::statistics::round2;
use crate::traits::AchievementNotifier;

/// Minimum accuracy (percent) for a session to count as an achievement.
pub const ACHIEVEMENT_THRESHOLD: f64 = 80.0;

/// Whether a final accuracy is high enough to offer recording.
pub fn qualifies(accuracy: f64) -> bool {
    accuracy >= ACHIEVEMENT_THRESHOLD
}

/// A completed high-score session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub id: Uuid,
    pub user_id: String,
    /// What was studied, e.g. "英単語学習（中級レベル）".
    pub content: String,
    /// Final accuracy in percent.
    pub accuracy: f64,
    pub recorded_at: DateTime<Utc>,
}

impl Achievement {
    pub fn for_profile(profile: &UserProfile, accuracy: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: profile.name.clone(),
            content: format!("英単語学習（{}レベル）", profile.level),
            accuracy,
            recorded_at: Utc::now(),
        }
    }
}

/// The notifier's reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub achievement_id: Uuid,
    pub accepted: bool,
    pub note: String,
}

/// Notifier that logs the achievement and accepts it.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingNotifier;

#[async_trait]
impl AchievementNotifier for LoggingNotifier {
    async fn notify(&self, achievement: &Achievement) -> anyhow::Result<Acknowledgement> {
        tracing::info!(
            achievement_id = %achievement.id,
            user_id = %achievement.user_id,
            content = %achievement.content,
            accuracy = round2(achievement.accuracy),
            "achievement recorded"
        );
        Ok(Acknowledgement {
            achievement_id: achievement.id,
            accepted: true,
            note: "logged only; no external ledger configured".into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_inclusive() {
        assert!(qualifies(80.0));
        assert!(qualifies(100.0));
        assert!(!qualifies(79.99));
    }

    #[test]
    fn content_mentions_level() {
        let profile = UserProfile::new("Aki", "中級", "TOEIC 800");
        let achievement = Achievement::for_profile(&profile, 90.0);
        assert_eq!(achievement.user_id, "Aki");
        assert_eq!(achievement.content, "英単語学習（中級レベル）");
    }

    #[tokio::test]
    async fn logging_notifier_acknowledges() {
        let profile = UserProfile::new("Aki", "上級", "business");
        let achievement = Achievement::for_profile(&profile, 85.0);
        let ack = LoggingNotifier.notify(&achievement).await.unwrap();
        assert!(ack.accepted);
        assert_eq!(ack.achievement_id, achievement.id);
    }
}
