use crate::models::ViewMode;

/// ViewState
///
/// The single shared view-mode value read by the layout chrome. Only the
/// post-navigation resolver writes it. Switching to the current mode is a
/// no-op in effect, so callers switch unconditionally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewState {
    mode: ViewMode,
}

impl ViewState {
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn switch_user_view(&mut self) {
        self.set(ViewMode::User);
    }

    pub fn switch_admin_view(&mut self) {
        self.set(ViewMode::Admin);
    }

    pub fn set(&mut self, mode: ViewMode) {
        if self.mode != mode {
            tracing::trace!(from = %self.mode, to = %mode, "view mode switched");
        }
        self.mode = mode;
    }

    pub fn is_user_view(&self) -> bool {
        self.mode == ViewMode::User
    }

    pub fn is_admin_view(&self) -> bool {
        self.mode == ViewMode::Admin
    }
}
