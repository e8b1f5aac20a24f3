//! Double-click detection for the tray icon
//!
//! Two primary-button clicks within the configured window count as one
//! double click. Detection resets after firing, so a triple click fires once
//! and a quadruple click fires twice. Any other button clears a pending click.

use std::time::{Duration, Instant};

/// Mouse button that clicked the tray icon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickButton {
    Primary,
    Secondary,
    Middle,
}

/// A completed click (button released) on the tray icon
#[derive(Debug, Clone, Copy)]
pub struct TrayClick {
    pub button: ClickButton,
    pub at: Instant,
}

impl TrayClick {
    pub fn new(button: ClickButton, at: Instant) -> Self {
        Self { button, at }
    }

    /// A click happening right now
    pub fn now(button: ClickButton) -> Self {
        Self::new(button, Instant::now())
    }
}

/// Time-windowed two-click detector
#[derive(Debug)]
pub struct DoubleClickDetector {
    window: Duration,
    pending: Option<Instant>,
}

impl DoubleClickDetector {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Feed one click; returns `true` when it completes a double click
    pub fn register(&mut self, click: TrayClick) -> bool {
        if click.button != ClickButton::Primary {
            self.pending = None;
            return false;
        }

        match self.pending.take() {
            Some(first) if click.at.saturating_duration_since(first) <= self.window => true,
            _ => {
                self.pending = Some(click.at);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(500);

    fn at(base: Instant, ms: u64) -> Instant {
        base + Duration::from_millis(ms)
    }

    #[test]
    fn test_two_quick_primary_clicks_fire() {
        let base = Instant::now();
        let mut detector = DoubleClickDetector::new(WINDOW);
        assert!(!detector.register(TrayClick::new(ClickButton::Primary, base)));
        assert!(detector.register(TrayClick::new(ClickButton::Primary, at(base, 200))));
    }

    #[test]
    fn test_slow_clicks_do_not_fire() {
        let base = Instant::now();
        let mut detector = DoubleClickDetector::new(WINDOW);
        assert!(!detector.register(TrayClick::new(ClickButton::Primary, base)));
        assert!(!detector.register(TrayClick::new(ClickButton::Primary, at(base, 900))));
        // the late click starts a new pair
        assert!(detector.register(TrayClick::new(ClickButton::Primary, at(base, 1000))));
    }

    #[test]
    fn test_single_click_never_fires() {
        let mut detector = DoubleClickDetector::new(WINDOW);
        assert!(!detector.register(TrayClick::now(ClickButton::Primary)));
    }

    #[test]
    fn test_secondary_clicks_never_fire() {
        let base = Instant::now();
        let mut detector = DoubleClickDetector::new(WINDOW);
        assert!(!detector.register(TrayClick::new(ClickButton::Secondary, base)));
        assert!(!detector.register(TrayClick::new(ClickButton::Secondary, at(base, 50))));
        assert!(!detector.register(TrayClick::new(ClickButton::Middle, at(base, 100))));
    }

    #[test]
    fn test_secondary_click_breaks_pair() {
        let base = Instant::now();
        let mut detector = DoubleClickDetector::new(WINDOW);
        assert!(!detector.register(TrayClick::new(ClickButton::Primary, base)));
        assert!(!detector.register(TrayClick::new(ClickButton::Secondary, at(base, 100))));
        assert!(!detector.register(TrayClick::new(ClickButton::Primary, at(base, 200))));
    }

    #[test]
    fn test_triple_click_fires_once() {
        let base = Instant::now();
        let mut detector = DoubleClickDetector::new(WINDOW);
        let fired = [0, 100, 200]
            .into_iter()
            .filter(|ms| detector.register(TrayClick::new(ClickButton::Primary, at(base, *ms))))
            .count();
        assert_eq!(fired, 1);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    const WINDOW: Duration = Duration::from_millis(500);

    proptest! {
        /// Isolated single clicks followed by one quick pair fire exactly once
        #[test]
        fn prop_double_click_fires_once_after_single_clicks(
            singles in 0usize..10,
            gap in 501u64..5_000,
            pair_gap in 0u64..=500,
        ) {
            let base = Instant::now();
            let mut detector = DoubleClickDetector::new(WINDOW);
            let mut fired = 0;
            let mut t = 0;

            for _ in 0..singles {
                if detector.register(TrayClick::new(ClickButton::Primary, base + Duration::from_millis(t))) {
                    fired += 1;
                }
                t += gap;
            }
            for offset in [0, pair_gap] {
                if detector.register(TrayClick::new(ClickButton::Primary, base + Duration::from_millis(t + offset))) {
                    fired += 1;
                }
            }

            prop_assert_eq!(fired, 1);
        }

        #[test]
        fn prop_non_primary_buttons_never_fire(
            clicks in proptest::collection::vec((any::<bool>(), 0u64..1_000), 0..20),
        ) {
            let base = Instant::now();
            let mut detector = DoubleClickDetector::new(WINDOW);
            let mut t = 0;
            for (secondary, gap) in clicks {
                t += gap;
                let button = if secondary { ClickButton::Secondary } else { ClickButton::Middle };
                prop_assert!(!detector.register(TrayClick::new(button, base + Duration::from_millis(t))));
            }
        }
    }
}
