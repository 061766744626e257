use async_trait::async_trait;

use crate::ports::errors::PreferencesError;
use crate::preferences::UserPreferences;

/// Durable storage for [`UserPreferences`].
///
/// `load` returns defaults when nothing usable is stored; only unexpected
/// read failures are errors.
#[async_trait]
pub trait PreferencesPort: Send + Sync {
    async fn load(&self) -> Result<UserPreferences, PreferencesError>;
    async fn save(&self, preferences: &UserPreferences) -> Result<(), PreferencesError>;
}
