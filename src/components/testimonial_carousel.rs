//! Testimonial carousel with pagination dots, swipe, and autoplay.
//!
//! SYSTEM CONTEXT
//! ==============
//! Layout is a flex track translated by whole slides. [`CarouselState`] owns
//! every decision; this component feeds it clicks, keys, touches, hover,
//! resize and tab visibility, and holds the single autoplay `Interval`.
//!
//! TRADE-OFFS
//! ==========
//! Dots are rebuilt from a page count signal rather than derived on every
//! render, so they only re-render when `RebuildDots` says the layout changed.

#[cfg(test)]
#[path = "testimonial_carousel_test.rs"]
mod testimonial_carousel_test;

use leptos::prelude::*;

use crate::config::SiteConfig;
use crate::content::Testimonial;
use crate::state::carousel::{CarouselEffect, CarouselEvent, CarouselState};
use crate::util::dom::{document_hidden, prefers_reduced_motion, viewport_width};

/// Width assumed when the viewport cannot be measured.
const FALLBACK_WIDTH_PX: f64 = 1024.0;

/// Width of one slide as a percentage of the viewport.
#[allow(clippy::cast_precision_loss)]
pub fn slide_basis_percent(slides_per_view: usize) -> f64 {
    100.0 / slides_per_view.max(1) as f64
}

pub fn slide_style(slides_per_view: usize) -> String {
    format!("flex: 0 0 {}%", slide_basis_percent(slides_per_view))
}

pub fn track_style(offset_percent: f64) -> String {
    format!("transform: translateX({offset_percent}%)")
}

pub fn dot_label(page: usize) -> String {
    format!("Go to page {}", page + 1)
}

#[derive(Clone, Copy)]
struct CarouselController {
    state: RwSignal<CarouselState>,
    pages: RwSignal<usize>,
    touch_start_x: StoredValue<Option<f64>>,
    #[cfg(feature = "csr")]
    autoplay: StoredValue<Option<gloo_timers::callback::Interval>, LocalStorage>,
}

impl CarouselController {
    fn dispatch(self, event: CarouselEvent) {
        let Some(effects) = self.state.try_update(|s| s.handle(event)) else {
            return;
        };
        self.run_all(effects);
    }

    fn run_all(self, effects: Vec<CarouselEffect>) {
        for effect in effects {
            match effect {
                CarouselEffect::StartAutoplay { seq, interval_ms } => self.start_timer(seq, interval_ms),
                CarouselEffect::StopAutoplay => self.stop_timer(),
                CarouselEffect::RebuildDots { pages } => {
                    self.pages.try_set(pages);
                }
            }
        }
    }

    #[cfg(feature = "csr")]
    fn start_timer(self, seq: u64, interval_ms: u32) {
        let tick = gloo_timers::callback::Interval::new(interval_ms, move || {
            self.dispatch(CarouselEvent::AutoplayTick { seq });
        });
        // Replacing the handle drops, and so cancels, any previous interval.
        self.autoplay.try_update_value(|slot| *slot = Some(tick));
    }

    #[cfg(feature = "csr")]
    fn stop_timer(self) {
        self.autoplay.try_update_value(|slot| {
            slot.take();
        });
    }

    #[cfg(not(feature = "csr"))]
    fn start_timer(self, seq: u64, interval_ms: u32) {
        log::debug!("autoplay #{seq} every {interval_ms}ms needs a browser, skipped");
    }

    #[cfg(not(feature = "csr"))]
    fn stop_timer(self) {
        log::debug!("autoplay stop skipped outside the browser");
    }

    fn touch_started(self, x: Option<f64>) {
        self.touch_start_x.set_value(x);
    }

    fn touch_ended(self, x: Option<f64>) {
        let start = self.touch_start_x.try_update_value(Option::take).flatten();
        if let (Some(start), Some(end)) = (start, x) {
            self.dispatch(CarouselEvent::SwipeEnd { delta_x: end - start });
        }
    }
}

/// Carousel over `testimonials`.
#[component]
pub fn TestimonialCarousel(config: SiteConfig, testimonials: Vec<Testimonial>) -> impl IntoView {
    let width = viewport_width().unwrap_or(FALLBACK_WIDTH_PX);
    let state = CarouselState::new(testimonials.len(), width, &config, prefers_reduced_motion());
    let ctl = CarouselController {
        state: RwSignal::new(state),
        pages: RwSignal::new(0),
        touch_start_x: StoredValue::new(None),
        #[cfg(feature = "csr")]
        autoplay: StoredValue::new_local(None),
    };
    let state = ctl.state;
    let pages = ctl.pages;

    if let Some(effects) = state.try_update(CarouselState::start) {
        ctl.run_all(effects);
    }
    if document_hidden() {
        ctl.dispatch(CarouselEvent::VisibilityChanged { hidden: true });
    }

    #[cfg(feature = "csr")]
    {
        let resize = window_event_listener(leptos::ev::resize, move |_| {
            if let Some(width) = viewport_width() {
                ctl.dispatch(CarouselEvent::Resize { width });
            }
        });
        let visibility = window_event_listener_untyped("visibilitychange", move |_| {
            ctl.dispatch(CarouselEvent::VisibilityChanged { hidden: document_hidden() });
        });
        on_cleanup(move || {
            resize.remove();
            visibility.remove();
        });
    }

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if let Some(event) = CarouselEvent::from_key(&ev.key()) {
            ev.prevent_default();
            ctl.dispatch(event);
        }
    };

    let slides = testimonials
        .into_iter()
        .map(|t| {
            let role = (!t.role.is_empty()).then(|| view! { <span class="carousel__role">{t.role}</span> });
            view! {
                <figure class="carousel__slide" style=move || slide_style(state.with(CarouselState::slides_per_view))>
                    <blockquote class="carousel__quote">{t.quote}</blockquote>
                    <figcaption>
                        <span class="carousel__author">{t.author}</span>
                        {role}
                    </figcaption>
                </figure>
            }
        })
        .collect_view();

    view! {
        <div
            class="carousel"
            tabindex="0"
            role="region"
            aria-roledescription="carousel"
            aria-label="Testimonials"
            on:keydown=on_keydown
            on:mouseenter=move |_| ctl.dispatch(CarouselEvent::PointerEnter)
            on:mouseleave=move |_| ctl.dispatch(CarouselEvent::PointerLeave)
            on:touchstart=move |ev| ctl.touch_started(touch_x(&ev))
            on:touchend=move |ev| ctl.touch_ended(touch_x(&ev))
        >
            <div class="carousel__viewport">
                <div
                    id="carousel-track"
                    class="carousel__track"
                    style=move || track_style(state.with(CarouselState::track_offset_percent))
                >
                    {slides}
                </div>
            </div>

            <button
                id="carousel-prev"
                class="carousel__control carousel__control--prev"
                type="button"
                aria-label="Previous testimonials"
                disabled=move || !state.with(CarouselState::can_go_prev)
                on:click=move |_| ctl.dispatch(CarouselEvent::Prev)
            >
                "‹"
            </button>
            <button
                id="carousel-next"
                class="carousel__control carousel__control--next"
                type="button"
                aria-label="Next testimonials"
                disabled=move || !state.with(CarouselState::can_go_next)
                on:click=move |_| ctl.dispatch(CarouselEvent::Next)
            >
                "›"
            </button>

            <div id="carousel-dots" class="carousel__dots">
                {move || {
                    (0..pages.get())
                        .map(|page| {
                            view! {
                                <button
                                    class="carousel__dot"
                                    class:carousel__dot--active=move || state.with(CarouselState::current_page) == page
                                    type="button"
                                    aria-label=dot_label(page)
                                    on:click=move |_| ctl.dispatch(CarouselEvent::GoToPage(page))
                                ></button>
                            }
                        })
                        .collect::<Vec<_>>()
                }}
            </div>
        </div>
    }
}

/// Horizontal position of the touch that started or ended a gesture.
#[cfg(feature = "csr")]
fn touch_x(ev: &web_sys::TouchEvent) -> Option<f64> {
    ev.changed_touches().get(0).map(|touch| f64::from(touch.client_x()))
}

#[cfg(not(feature = "csr"))]
fn touch_x(_ev: &leptos::ev::TouchEvent) -> Option<f64> {
    None
}
