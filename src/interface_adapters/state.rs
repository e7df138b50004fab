use crate::use_cases::WorldHandle;

#[derive(Clone)]
pub struct AppState {
    // Event sender into the world loop plus the static world description.
    pub world: WorldHandle,
}
