//! Testimonial carousel: clamped slide index, responsive slides-per-view,
//! and autoplay bookkeeping.
//!
//! DESIGN
//! ======
//! The carousel never owns a timer. It records whether one is armed and under
//! which sequence number, and asks the component to start or stop it through
//! effects. A start is only emitted when nothing is armed, and ticks carrying
//! an old sequence number are dropped, so there is never more than one live
//! ticker.
//!
//! TRADE-OFFS
//! ==========
//! Manual navigation follows the configured [`WrapPolicy`]. Autoplay always
//! rewinds to the first slide after the last page, otherwise a clamped
//! carousel would stall on its final page forever.

#[cfg(test)]
#[path = "carousel_test.rs"]
mod carousel_test;

use crate::config::SiteConfig;

/// What manual navigation does at either end.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WrapPolicy {
    /// Stop at the first/last page.
    #[default]
    Clamp,
    /// Jump to the opposite end.
    Wrap,
}

/// Viewport widths (CSS px) at which more slides become visible.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Breakpoints {
    pub tablet_px: f64,
    pub desktop_px: f64,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self { tablet_px: 768.0, desktop_px: 1024.0 }
    }
}

impl Breakpoints {
    /// Slides visible at `width`: 1 on phones, 2 on tablets, 3 on desktop.
    #[must_use]
    pub fn slides_per_view(&self, width: f64) -> usize {
        if width >= self.desktop_px {
            3
        } else if width >= self.tablet_px {
            2
        } else {
            1
        }
    }
}

/// Observable autoplay status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AutoplayStatus {
    Running,
    /// Suspended by hover and/or a hidden tab.
    Paused,
    /// Reduced motion, or nothing to scroll.
    Off,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CarouselEvent {
    Next,
    Prev,
    GoToPage(usize),
    /// Horizontal travel of a finished touch gesture, positive to the right.
    SwipeEnd { delta_x: f64 },
    Resize { width: f64 },
    PointerEnter,
    PointerLeave,
    VisibilityChanged { hidden: bool },
    AutoplayTick { seq: u64 },
}

impl CarouselEvent {
    /// Map a `KeyboardEvent.key` to navigation.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Self::Prev),
            "ArrowRight" => Some(Self::Next),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CarouselEffect {
    StartAutoplay { seq: u64, interval_ms: u32 },
    StopAutoplay,
    RebuildDots { pages: usize },
}

#[derive(Clone, Debug)]
pub struct CarouselState {
    current_index: usize,
    slides_per_view: usize,
    total_slides: usize,
    policy: WrapPolicy,
    breakpoints: Breakpoints,
    swipe_threshold_px: f64,
    autoplay_ms: u32,
    autoplay_enabled: bool,
    hovered: bool,
    hidden: bool,
    timer_seq: u64,
    timer_armed: bool,
}

impl CarouselState {
    /// Build a carousel over `total_slides` for a viewport `width` px wide.
    /// `reduced_motion` turns autoplay off for good.
    pub fn new(total_slides: usize, width: f64, config: &SiteConfig, reduced_motion: bool) -> Self {
        let mut state = Self {
            current_index: 0,
            slides_per_view: 1,
            total_slides,
            policy: config.wrap_policy,
            breakpoints: config.breakpoints,
            swipe_threshold_px: config.swipe_threshold_px,
            autoplay_ms: config.autoplay_ms,
            autoplay_enabled: !reduced_motion,
            hovered: false,
            hidden: false,
            timer_seq: 0,
            timer_armed: false,
        };
        state.slides_per_view = state.fit_slides_per_view(width);
        state
    }

    /// Effects to run once the carousel is mounted: draw dots, start autoplay.
    pub fn start(&mut self) -> Vec<CarouselEffect> {
        let mut effects = vec![CarouselEffect::RebuildDots { pages: self.page_count() }];
        effects.extend(self.arm_if_running());
        effects
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn slides_per_view(&self) -> usize {
        self.slides_per_view
    }

    #[must_use]
    pub fn total_slides(&self) -> usize {
        self.total_slides
    }

    /// Highest index the first visible slide may take.
    #[must_use]
    pub fn max_index(&self) -> usize {
        self.total_slides.saturating_sub(self.slides_per_view)
    }

    /// Number of pagination dots.
    #[must_use]
    pub fn page_count(&self) -> usize {
        if self.total_slides == 0 {
            return 0;
        }
        self.max_index().div_ceil(self.slides_per_view) + 1
    }

    /// Dot that should render as active.
    #[must_use]
    pub fn current_page(&self) -> usize {
        if self.current_index >= self.max_index() {
            self.page_count().saturating_sub(1)
        } else {
            self.current_index / self.slides_per_view
        }
    }

    /// Track translation as a percentage of the viewport width.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn track_offset_percent(&self) -> f64 {
        -(self.current_index as f64) * 100.0 / self.slides_per_view as f64
    }

    /// Whether the previous control does anything.
    #[must_use]
    pub fn can_go_prev(&self) -> bool {
        (self.policy == WrapPolicy::Wrap && self.scrollable()) || self.current_index > 0
    }

    /// Whether the next control does anything.
    #[must_use]
    pub fn can_go_next(&self) -> bool {
        (self.policy == WrapPolicy::Wrap && self.scrollable()) || self.current_index < self.max_index()
    }

    #[must_use]
    pub fn autoplay_status(&self) -> AutoplayStatus {
        if !self.autoplay_enabled || !self.scrollable() {
            AutoplayStatus::Off
        } else if self.hovered || self.hidden {
            AutoplayStatus::Paused
        } else {
            AutoplayStatus::Running
        }
    }

    #[must_use]
    pub fn timer_armed(&self) -> bool {
        self.timer_armed
    }

    pub fn handle(&mut self, event: CarouselEvent) -> Vec<CarouselEffect> {
        match event {
            CarouselEvent::Next => {
                self.current_index = self.step_forward(self.policy);
                self.reset_timer()
            }
            CarouselEvent::Prev => {
                self.current_index = self.step_back();
                self.reset_timer()
            }
            CarouselEvent::GoToPage(page) => {
                self.current_index = page.saturating_mul(self.slides_per_view).min(self.max_index());
                self.reset_timer()
            }
            CarouselEvent::SwipeEnd { delta_x } => {
                if delta_x.abs() < self.swipe_threshold_px {
                    Vec::new()
                } else if delta_x < 0.0 {
                    self.handle(CarouselEvent::Next)
                } else {
                    self.handle(CarouselEvent::Prev)
                }
            }
            CarouselEvent::Resize { width } => self.on_resize(width),
            CarouselEvent::PointerEnter => {
                self.hovered = true;
                self.disarm()
            }
            CarouselEvent::PointerLeave => {
                self.hovered = false;
                self.arm_if_running()
            }
            CarouselEvent::VisibilityChanged { hidden } => {
                self.hidden = hidden;
                if hidden { self.disarm() } else { self.arm_if_running() }
            }
            CarouselEvent::AutoplayTick { seq } => {
                if self.timer_armed && seq == self.timer_seq {
                    self.current_index = self.step_forward(WrapPolicy::Wrap);
                } else {
                    log::debug!("dropping stale autoplay tick {seq}");
                }
                Vec::new()
            }
        }
    }

    fn fit_slides_per_view(&self, width: f64) -> usize {
        self.breakpoints
            .slides_per_view(width)
            .min(self.total_slides)
            .max(1)
    }

    fn scrollable(&self) -> bool {
        self.total_slides > self.slides_per_view
    }

    fn step_forward(&self, policy: WrapPolicy) -> usize {
        let max = self.max_index();
        if self.current_index >= max {
            match policy {
                WrapPolicy::Clamp => max,
                WrapPolicy::Wrap => 0,
            }
        } else {
            (self.current_index + self.slides_per_view).min(max)
        }
    }

    fn step_back(&self) -> usize {
        if self.current_index == 0 {
            match self.policy {
                WrapPolicy::Clamp => 0,
                WrapPolicy::Wrap => self.max_index(),
            }
        } else {
            // Land on the start of the previous page, which undoes a clamped Next.
            (self.current_page().saturating_sub(1) * self.slides_per_view).min(self.max_index())
        }
    }

    fn on_resize(&mut self, width: f64) -> Vec<CarouselEffect> {
        let spv = self.fit_slides_per_view(width);
        let mut effects = Vec::new();
        if spv != self.slides_per_view {
            self.slides_per_view = spv;
            effects.push(CarouselEffect::RebuildDots { pages: self.page_count() });
        }
        self.current_index = self.current_index.min(self.max_index());
        if self.scrollable() {
            effects.extend(self.arm_if_running());
        } else {
            effects.extend(self.disarm());
        }
        effects
    }

    /// Manual navigation restarts the interval so the next auto-advance is a
    /// full period away.
    fn reset_timer(&mut self) -> Vec<CarouselEffect> {
        let mut effects = self.disarm();
        if !effects.is_empty() {
            effects.extend(self.arm_if_running());
        }
        effects
    }

    fn arm_if_running(&mut self) -> Vec<CarouselEffect> {
        if self.timer_armed || self.autoplay_status() != AutoplayStatus::Running {
            return Vec::new();
        }
        self.timer_seq += 1;
        self.timer_armed = true;
        vec![CarouselEffect::StartAutoplay { seq: self.timer_seq, interval_ms: self.autoplay_ms }]
    }

    fn disarm(&mut self) -> Vec<CarouselEffect> {
        if !self.timer_armed {
            return Vec::new();
        }
        self.timer_armed = false;
        vec![CarouselEffect::StopAutoplay]
    }
}
