use std::sync::Arc;

use tracing::info;

/// Blocking acknowledgment surface shown after a successful confirmation.
/// `reveal` returns `false` when the environment has no such surface, in
/// which case the flow degrades to immediate navigation; the surface is an
/// enhancement, not a requirement.
pub trait AcknowledgmentSurface: Send + Sync {
    /// Reveals the surface and moves focus to its confirming control.
    fn reveal(&self) -> bool;
}

pub struct MissingAcknowledgmentSurface;

impl AcknowledgmentSurface for MissingAcknowledgmentSurface {
    fn reveal(&self) -> bool {
        false
    }
}

/// Navigation back to the landing view of the surrounding application.
pub trait Navigator: Send + Sync {
    fn navigate_home(&self);
}

pub struct MissingNavigator;

impl Navigator for MissingNavigator {
    fn navigate_home(&self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Idle,
    Shown,
    Done,
}

/// Post-submission acknowledgment state machine: `Idle -> Shown -> Done`,
/// with `Done` terminal. Each successful submission starts a fresh instance.
pub struct AcknowledgmentFlow {
    state: FlowState,
    surface: Arc<dyn AcknowledgmentSurface>,
    navigator: Arc<dyn Navigator>,
}

impl AcknowledgmentFlow {
    pub fn new(surface: Arc<dyn AcknowledgmentSurface>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            state: FlowState::Idle,
            surface,
            navigator,
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    /// `Idle -> Shown` on submission success. Without a surface the flow
    /// degrades straight to `Done` and navigates immediately.
    pub fn begin(&mut self) -> FlowState {
        if self.state != FlowState::Idle {
            return self.state;
        }
        if self.surface.reveal() {
            self.state = FlowState::Shown;
        } else {
            info!("no acknowledgment surface available, navigating directly");
            self.navigator.navigate_home();
            self.state = FlowState::Done;
        }
        self.state
    }

    /// `Shown -> Done` on the first activation of the confirming control.
    /// Repeat activations are no-ops.
    pub fn confirm(&mut self) -> FlowState {
        if self.state == FlowState::Shown {
            self.navigator.navigate_home();
            self.state = FlowState::Done;
        }
        self.state
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct CountingSurface {
        exists: bool,
        reveals: AtomicUsize,
    }

    impl AcknowledgmentSurface for CountingSurface {
        fn reveal(&self) -> bool {
            self.reveals.fetch_add(1, Ordering::SeqCst);
            self.exists
        }
    }

    #[derive(Default)]
    struct CountingNavigator {
        homes: AtomicUsize,
    }

    impl Navigator for CountingNavigator {
        fn navigate_home(&self) {
            self.homes.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn begin_reveals_surface_and_waits_for_confirmation() {
        let surface = Arc::new(CountingSurface {
            exists: true,
            reveals: AtomicUsize::new(0),
        });
        let navigator = Arc::new(CountingNavigator::default());
        let mut flow = AcknowledgmentFlow::new(surface.clone(), navigator.clone());

        assert_eq!(flow.begin(), FlowState::Shown);
        assert_eq!(surface.reveals.load(Ordering::SeqCst), 1);
        assert_eq!(navigator.homes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn confirm_navigates_exactly_once() {
        let surface = Arc::new(CountingSurface {
            exists: true,
            reveals: AtomicUsize::new(0),
        });
        let navigator = Arc::new(CountingNavigator::default());
        let mut flow = AcknowledgmentFlow::new(surface, navigator.clone());

        flow.begin();
        assert_eq!(flow.confirm(), FlowState::Done);
        assert_eq!(flow.confirm(), FlowState::Done);
        assert_eq!(navigator.homes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn missing_surface_degrades_to_immediate_navigation() {
        let surface = Arc::new(CountingSurface {
            exists: false,
            reveals: AtomicUsize::new(0),
        });
        let navigator = Arc::new(CountingNavigator::default());
        let mut flow = AcknowledgmentFlow::new(surface, navigator.clone());

        assert_eq!(flow.begin(), FlowState::Done);
        assert_eq!(navigator.homes.load(Ordering::SeqCst), 1);
        // Done is terminal, confirming afterwards changes nothing.
        assert_eq!(flow.confirm(), FlowState::Done);
        assert_eq!(navigator.homes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn begin_is_idempotent_once_shown() {
        let surface = Arc::new(CountingSurface {
            exists: true,
            reveals: AtomicUsize::new(0),
        });
        let navigator = Arc::new(CountingNavigator::default());
        let mut flow = AcknowledgmentFlow::new(surface.clone(), navigator);

        flow.begin();
        assert_eq!(flow.begin(), FlowState::Shown);
        assert_eq!(surface.reveals.load(Ordering::SeqCst), 1);
    }
}
