//! Persistent settings storage abstraction

use crate::settings::Settings;

/// Settings persistence
///
/// `load` never surfaces an unverified record: implementations fall
/// back to defaults (and persist them) on any corruption.
pub trait SettingsStore {
    /// Load verified settings, repairing the stored record if needed.
    fn load(&mut self) -> Settings;

    /// Persist the given settings.
    fn save(&mut self, settings: &Settings);
}
