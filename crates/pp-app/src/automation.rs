//! Scoped ownership of an automated presentation handle.

use std::path::Path;

use pp_core::ports::{
    AutomatedPresentation, AutomationError, OpenOptions, PresentationAutomationPort,
};
use tracing::warn;

/// Closes and releases the wrapped presentation when dropped.
///
/// Every exit path (error, cancellation, panic unwinding) therefore releases
/// the external application. [`AutomationSession::leave_open`] skips the
/// close for a slideshow that must keep running; release still happens.
pub struct AutomationSession {
    presentation: Box<dyn AutomatedPresentation>,
    leave_open: bool,
}

impl AutomationSession {
    pub fn open(
        automation: &dyn PresentationAutomationPort,
        path: &Path,
        options: OpenOptions,
    ) -> Result<Self, AutomationError> {
        Ok(Self {
            presentation: automation.open(path, options)?,
            leave_open: false,
        })
    }

    pub fn presentation(&mut self) -> &mut dyn AutomatedPresentation {
        &mut *self.presentation
    }

    pub fn leave_open(&mut self) {
        self.leave_open = true;
    }
}

impl Drop for AutomationSession {
    fn drop(&mut self) {
        if !self.leave_open {
            if let Err(err) = self.presentation.close() {
                warn!(error = %err, "failed to close automated presentation");
            }
        }
        self.presentation.release();
    }
}
