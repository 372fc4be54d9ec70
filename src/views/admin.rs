//! # Admin Mode
//!
//! A boolean capability gating create, edit and delete. It is not an authentication boundary;
//! it only decides which operations views expose.
//!
//! [`AdminToggle`] is the single writer. Views receive an [`AdminMode`], which can read the
//! flag but not change it. The flag starts off and is never persisted.

use crate::views::ViewError;
use tokio::sync::watch;
use tracing::info;

/// Owner of the admin flag.
pub struct AdminToggle {
    sender: watch::Sender<bool>,
}

impl AdminToggle {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self { sender }
    }

    /// A read-only view of the flag for handing to views.
    pub fn mode(&self) -> AdminMode {
        AdminMode {
            receiver: self.sender.subscribe(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        *self.sender.borrow()
    }

    pub fn set(&self, enabled: bool) {
        let previous = self.sender.send_replace(enabled);
        if previous != enabled {
            info!(enabled, "Admin mode changed");
        }
    }

    /// Flips the flag and returns the new value.
    pub fn toggle(&self) -> bool {
        let enabled = !self.is_enabled();
        self.set(enabled);
        enabled
    }
}

impl Default for AdminToggle {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only admin capability.
#[derive(Debug, Clone)]
pub struct AdminMode {
    receiver: watch::Receiver<bool>,
}

impl AdminMode {
    pub fn is_enabled(&self) -> bool {
        *self.receiver.borrow()
    }

    /// `Ok` when mutations are allowed.
    pub fn require(&self) -> Result<(), ViewError> {
        if self.is_enabled() {
            Ok(())
        } else {
            Err(ViewError::ReadOnly)
        }
    }

    /// Resolves the next time the flag changes. Errors once the toggle is gone.
    pub async fn changed(&mut self) -> Result<bool, watch::error::RecvError> {
        self.receiver.changed().await?;
        Ok(*self.receiver.borrow_and_update())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_read_only() {
        let toggle = AdminToggle::new();
        let mode = toggle.mode();
        assert!(!mode.is_enabled());
        assert!(matches!(mode.require(), Err(ViewError::ReadOnly)));
    }

    #[test]
    fn views_see_toggle_changes() {
        let toggle = AdminToggle::new();
        let mode = toggle.mode();
        assert!(toggle.toggle());
        assert!(mode.is_enabled());
        assert!(mode.require().is_ok());
        assert!(!toggle.toggle());
        assert!(!mode.is_enabled());
    }

    #[tokio::test]
    async fn changed_reports_new_value() {
        let toggle = AdminToggle::new();
        let mut mode = toggle.mode();
        toggle.set(true);
        assert!(mode.changed().await.unwrap());
        drop(toggle);
        assert!(mode.changed().await.is_err());
    }
}
