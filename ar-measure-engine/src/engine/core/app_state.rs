use crate::engine::settings::SettingsLoader;
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Running,
}

/// Leave `Loading` once settings are in, loaded or defaulted.
pub fn transition_to_running(loader: Res<SettingsLoader>, mut next_state: ResMut<NextState<AppState>>) {
    if loader.finished {
        info!("→ Transitioning to Running state");
        next_state.set(AppState::Running);
    }
}
