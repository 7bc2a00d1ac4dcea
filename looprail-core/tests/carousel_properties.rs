use std::time::{Duration, Instant};

use looprail_core::{
    Carousel, CarouselConfig, CarouselEvent, Effect, FixedLayout, GestureState,
    Point, PointerKind, PointerTarget, Slide,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const LAYOUT: FixedLayout = FixedLayout::new(300.0, 300.0);
const STRIDE: f32 = 310.0;

fn mount(slides: Vec<Slide>) -> (Carousel<FixedLayout>, Instant) {
    let mut carousel =
        Carousel::mount(slides, LAYOUT, CarouselConfig::default())
            .expect("default config is valid")
            .expect("slides present");
    let t0 = Instant::now();
    carousel.start(t0);
    (carousel, t0)
}

fn at(t0: Instant, ms: u64) -> Instant {
    t0 + Duration::from_millis(ms)
}

fn frames(effects: &[Effect]) -> Vec<(f32, bool, usize)> {
    effects.iter().filter_map(Effect::as_frame).collect()
}

/// Drive a full press/move/release on the strip.
fn drag(
    carousel: &mut Carousel<FixedLayout>,
    t0: Instant,
    start_ms: u64,
    from_x: f32,
    to_x: f32,
    duration_ms: u64,
) -> Vec<Effect> {
    let mut effects = carousel.handle(
        CarouselEvent::PointerDown {
            pointer: PointerKind::Mouse,
            point: Point::new(from_x, 40.0),
            target: PointerTarget::Track,
        },
        at(t0, start_ms),
    );
    effects.extend(carousel.handle(
        CarouselEvent::PointerMove {
            pointer: PointerKind::Mouse,
            point: Point::new(to_x, 40.0),
        },
        at(t0, start_ms + duration_ms / 2),
    ));
    effects.extend(carousel.handle(
        CarouselEvent::PointerUp {
            pointer: PointerKind::Mouse,
            point: Point::new(to_x, 40.0),
        },
        at(t0, start_ms + duration_ms),
    ));
    effects
}

#[test]
fn logical_index_stays_in_range_after_every_correction() {
    let mut rng = StdRng::seed_from_u64(0x100b);
    for n in 1..=6usize {
        let config = CarouselConfig {
            autoplay_enabled: false,
            ..CarouselConfig::default()
        };
        let mut carousel =
            Carousel::mount(vec![Slide::plain(); n], LAYOUT, config)
                .expect("valid")
                .expect("slides present");
        let t0 = Instant::now();
        carousel.start(t0);

        let mut now_ms = 0u64;
        for _ in 0..200 {
            now_ms += rng.random_range(0..800);
            carousel.poll(at(t0, now_ms));
            let event = if rng.random_bool(0.5) {
                CarouselEvent::Next
            } else {
                CarouselEvent::Previous
            };
            carousel.handle(event, at(t0, now_ms));
            assert!(carousel.position() <= n + 1);
            assert!(carousel.logical_index() < n);
        }

        // let the last correction land
        carousel.poll(at(t0, now_ms + 500));
        assert!((1..=n).contains(&carousel.position()));
        assert!(carousel.logical_index() < n);
    }
}

#[test]
fn advance_then_retreat_returns_to_the_same_position() {
    for start in 0..5 {
        let (mut carousel, t0) = mount(vec![Slide::plain(); 5]);
        carousel.seek(start, t0);
        let original = carousel.position();

        carousel.advance(at(t0, 100));
        carousel.poll(at(t0, 600));
        carousel.retreat(at(t0, 700));
        carousel.poll(at(t0, 1200));

        assert_eq!(carousel.position(), original, "start index {start}");
    }
}

#[test]
fn trailing_clone_is_corrected_without_animation() {
    let (mut carousel, t0) = mount(vec![Slide::plain(); 3]);
    carousel.seek(2, t0);
    let effects = carousel.advance(at(t0, 100));
    assert_eq!(frames(&effects), vec![(4.0 * STRIDE, true, 0)]);
    assert_eq!(carousel.position(), 4);

    assert!(carousel.poll(at(t0, 599)).is_empty());
    let effects = carousel.poll(at(t0, 600));
    assert_eq!(frames(&effects), vec![(STRIDE, false, 0)]);
    assert_eq!(carousel.position(), 1);
}

#[test]
fn drag_just_under_threshold_snaps_back() {
    let (mut carousel, t0) = mount(vec![Slide::plain(); 5]);
    // 49px over 490ms: 0.1 px/ms
    let effects = drag(&mut carousel, t0, 0, 300.0, 251.0, 490);
    assert_eq!(carousel.logical_index(), 0);
    assert_eq!(carousel.position(), 1);
    assert_eq!(frames(&effects).last(), Some(&(STRIDE, true, 0)));
    assert_eq!(carousel.gesture_state(), &GestureState::Idle);
}

#[test]
fn drag_just_over_threshold_advances() {
    let (mut carousel, t0) = mount(vec![Slide::plain(); 5]);
    // 51px over 510ms: 0.1 px/ms
    let effects = drag(&mut carousel, t0, 0, 300.0, 249.0, 510);
    assert_eq!(carousel.logical_index(), 1);
    assert_eq!(frames(&effects).last(), Some(&(2.0 * STRIDE, true, 1)));
}

#[test]
fn fast_short_flick_commits() {
    let (mut carousel, t0) = mount(vec![Slide::plain(); 5]);
    // 20px over 57ms: ~0.35 px/ms
    drag(&mut carousel, t0, 0, 300.0, 280.0, 57);
    assert_eq!(carousel.logical_index(), 1);
}

#[test]
fn rightward_drag_retreats_across_the_leading_clone() {
    let (mut carousel, t0) = mount(vec![Slide::plain(); 5]);
    drag(&mut carousel, t0, 0, 100.0, 200.0, 400);
    assert_eq!(carousel.position(), 0);
    assert_eq!(carousel.logical_index(), 4);
    carousel.poll(at(t0, 900));
    assert_eq!(carousel.position(), 5);
}

#[test]
fn live_drag_follows_the_pointer() {
    let (mut carousel, t0) = mount(vec![Slide::plain(); 5]);
    carousel.handle(
        CarouselEvent::PointerDown {
            pointer: PointerKind::Touch,
            point: Point::new(200.0, 0.0),
            target: PointerTarget::Track,
        },
        t0,
    );
    let effects = carousel.handle(
        CarouselEvent::PointerMove {
            pointer: PointerKind::Touch,
            point: Point::new(45.0, 0.0),
        },
        at(t0, 20),
    );
    assert_eq!(frames(&effects), vec![(1.5 * STRIDE, false, 0)]);
}

#[test]
fn pointer_cancel_resolves_like_a_release() {
    let (mut carousel, t0) = mount(vec![Slide::plain(); 5]);
    carousel.handle(
        CarouselEvent::PointerDown {
            pointer: PointerKind::Mouse,
            point: Point::new(300.0, 0.0),
            target: PointerTarget::Track,
        },
        t0,
    );
    carousel.handle(
        CarouselEvent::PointerMove {
            pointer: PointerKind::Mouse,
            point: Point::new(200.0, 0.0),
        },
        at(t0, 300),
    );
    carousel.handle(
        CarouselEvent::PointerCancel {
            pointer: PointerKind::Mouse,
        },
        at(t0, 400),
    );
    assert_eq!(carousel.logical_index(), 1);
    assert!(carousel.is_autoplay_running());
}

#[test]
fn touch_session_ignores_compatibility_mouse_events() {
    let (mut carousel, t0) = mount(vec![Slide::plain(); 5]);
    carousel.handle(
        CarouselEvent::PointerDown {
            pointer: PointerKind::Touch,
            point: Point::new(300.0, 0.0),
            target: PointerTarget::Track,
        },
        t0,
    );

    let effects = carousel.handle(
        CarouselEvent::PointerMove {
            pointer: PointerKind::Mouse,
            point: Point::new(100.0, 0.0),
        },
        at(t0, 20),
    );
    assert!(effects.is_empty());

    let effects = carousel.handle(
        CarouselEvent::PointerUp {
            pointer: PointerKind::Mouse,
            point: Point::new(100.0, 0.0),
        },
        at(t0, 40),
    );
    assert!(effects.is_empty());
    assert!(matches!(
        carousel.gesture_state(),
        GestureState::Tracking(_)
    ));
    assert_eq!(carousel.logical_index(), 0);
    assert!(!carousel.is_autoplay_running());

    // the touch release still resolves the session
    let effects = carousel.handle(
        CarouselEvent::PointerUp {
            pointer: PointerKind::Touch,
            point: Point::new(295.0, 0.0),
        },
        at(t0, 1000),
    );
    assert_eq!(frames(&effects), vec![(STRIDE, true, 0)]);
    assert_eq!(carousel.gesture_state(), &GestureState::Idle);
    assert!(carousel.is_autoplay_running());
}

#[test]
fn drag_release_while_hovering_keeps_autoplay_suspended() {
    let (mut carousel, t0) =
        mount(vec![Slide::plain().hover_sensitive(), Slide::plain()]);
    assert!(carousel.is_autoplay_running());

    let effects =
        carousel.handle(CarouselEvent::HoverEnter { slide: 1 }, at(t0, 10));
    assert_eq!(effects, vec![Effect::AutoplayChanged { running: false }]);

    let effects = drag(&mut carousel, t0, 20, 300.0, 290.0, 400);
    assert!(!effects.contains(&Effect::AutoplayChanged { running: true }));
    assert!(!carousel.is_autoplay_running());

    // nothing advances while suspended
    assert!(carousel.poll(at(t0, 10_000)).is_empty());
    assert_eq!(carousel.position(), 1);

    let effects =
        carousel.handle(CarouselEvent::HoverLeave { slide: 1 }, at(t0, 10_000));
    assert_eq!(effects, vec![Effect::AutoplayChanged { running: true }]);
    assert_eq!(carousel.next_deadline(), Some(at(t0, 13_000)));
}

#[test]
fn hover_leave_mid_drag_does_not_resume() {
    let (mut carousel, t0) = mount(vec![Slide::plain().hover_sensitive(); 3]);
    carousel.handle(CarouselEvent::HoverEnter { slide: 2 }, t0);
    carousel.handle(
        CarouselEvent::PointerDown {
            pointer: PointerKind::Mouse,
            point: Point::new(100.0, 0.0),
            target: PointerTarget::Track,
        },
        at(t0, 10),
    );
    let effects =
        carousel.handle(CarouselEvent::HoverLeave { slide: 2 }, at(t0, 20));
    assert!(effects.is_empty());
    assert!(!carousel.is_autoplay_running());

    let effects = carousel.handle(
        CarouselEvent::PointerUp {
            pointer: PointerKind::Mouse,
            point: Point::new(100.0, 0.0),
        },
        at(t0, 500),
    );
    assert!(effects.contains(&Effect::AutoplayChanged { running: true }));
}

#[test]
fn autoplay_advances_every_interval_and_wraps() {
    let (mut carousel, t0) = mount(vec![Slide::plain(); 2]);

    let effects = carousel.poll(at(t0, 3000));
    assert_eq!(frames(&effects), vec![(2.0 * STRIDE, true, 1)]);

    let effects = carousel.poll(at(t0, 6000));
    assert_eq!(frames(&effects), vec![(3.0 * STRIDE, true, 0)]);
    assert_eq!(carousel.position(), 3);

    let effects = carousel.poll(at(t0, 6500));
    assert_eq!(frames(&effects), vec![(STRIDE, false, 0)]);
    assert_eq!(carousel.position(), 1);
}

#[test]
fn indicator_click_renders_once() {
    let mut carousel = Carousel::mount(
        vec![Slide::plain(); 4],
        LAYOUT,
        CarouselConfig::default(),
    )
    .expect("valid")
    .expect("slides present");
    let t0 = Instant::now();
    let start = carousel.start(t0);
    assert_eq!(frames(&start), vec![(STRIDE, false, 0)]);

    let effects = carousel.seek(2, at(t0, 100));
    assert_eq!(carousel.position(), 3);
    assert_eq!(
        effects,
        vec![Effect::Frame {
            offset: 3.0 * STRIDE,
            animate: true,
            active_indicator: 2
        }]
    );

    assert!(carousel.seek(9, at(t0, 200)).is_empty());
    assert_eq!(carousel.position(), 3);
}

#[test]
fn link_micro_drag_suppresses_click_tap_follows() {
    let (mut carousel, t0) =
        mount(vec![Slide::with_link("/menu"), Slide::plain()]);

    let press = |x: f32| CarouselEvent::PointerDown {
        pointer: PointerKind::Mouse,
        point: Point::new(x, 10.0),
        target: PointerTarget::Link { slide: 1 },
    };
    let to = |x: f32| CarouselEvent::PointerMove {
        pointer: PointerKind::Mouse,
        point: Point::new(x, 10.0),
    };
    let release = |x: f32| CarouselEvent::PointerUp {
        pointer: PointerKind::Mouse,
        point: Point::new(x, 10.0),
    };

    // 15px: a drag for the link guard, still a snap back for the strip
    carousel.handle(press(100.0), t0);
    carousel.handle(to(85.0), at(t0, 100));
    carousel.handle(release(85.0), at(t0, 200));
    assert_eq!(carousel.logical_index(), 0);
    assert_eq!(
        carousel.handle(CarouselEvent::LinkClick { slide: 1 }, at(t0, 201)),
        vec![Effect::SuppressClick { slide: 1 }]
    );

    // 5px: a tap
    carousel.handle(press(100.0), at(t0, 1000));
    carousel.handle(to(105.0), at(t0, 1100));
    carousel.handle(release(105.0), at(t0, 1200));
    assert_eq!(
        carousel.handle(CarouselEvent::LinkClick { slide: 1 }, at(t0, 1201)),
        vec![Effect::FollowLink { slide: 1 }]
    );
}

#[test]
fn cloned_slides_keep_their_links() {
    let (mut carousel, t0) =
        mount(vec![Slide::with_link("/a"), Slide::with_link("/b")]);
    // extended index 3 is the clone of the first slide
    assert_eq!(
        carousel.handle(CarouselEvent::LinkClick { slide: 3 }, t0),
        vec![Effect::FollowLink { slide: 3 }]
    );
    // plain slides have nothing to follow
    let (mut plain, t1) = mount(vec![Slide::plain()]);
    assert!(plain
        .handle(CarouselEvent::LinkClick { slide: 1 }, t1)
        .is_empty());
}

#[test]
fn resize_rerenders_with_fresh_stride() {
    let (mut carousel, t0) = mount(vec![Slide::plain(); 3]);
    carousel.seek(1, t0);

    carousel.layout_mut().slide_width = 150.0;
    let effects = carousel.handle(CarouselEvent::Resize, at(t0, 50));
    assert_eq!(frames(&effects), vec![(2.0 * 160.0, false, 1)]);

    // nothing measured: fall back to the container width
    *carousel.layout_mut() = FixedLayout::new(0.0, 200.0);
    let effects = carousel.handle(CarouselEvent::Resize, at(t0, 60));
    assert_eq!(frames(&effects), vec![(400.0, false, 1)]);
    assert_eq!(carousel.position(), 2);
}

#[test]
fn disabled_autoplay_never_ticks() {
    let config = CarouselConfig {
        autoplay_enabled: false,
        ..CarouselConfig::default()
    };
    let mut carousel = Carousel::mount(vec![Slide::plain(); 3], LAYOUT, config)
        .expect("valid")
        .expect("slides present");
    let t0 = Instant::now();
    let effects = carousel.start(t0);
    assert_eq!(effects.len(), 1);
    assert_eq!(carousel.next_deadline(), None);
    assert!(carousel.poll(at(t0, 60_000)).is_empty());
}

#[test]
fn independent_instances_do_not_share_state() {
    let (mut first, t0) = mount(vec![Slide::plain(); 3]);
    let (second, _) = mount(vec![Slide::plain(); 3]);
    first.advance(t0);
    assert_eq!(first.position(), 2);
    assert_eq!(second.position(), 1);
}
