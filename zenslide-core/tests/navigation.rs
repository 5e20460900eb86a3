mod support;

use std::sync::Arc;

use serde_json::json;
use support::{RecordingStage, ScriptedFetcher, advance, drain, mount, settle};
use zenslide_config::ConfigError;
use zenslide_core::{
    Carousel, CarouselConfig, CarouselError, CarouselEvent, ImageFetcher, Key,
    Navigation, NavigationType, Rejection, SlideFrame, TransitionState,
};

fn still() -> serde_json::Value {
    json!({ "autoplay": false })
}

#[tokio::test(start_paused = true)]
async fn mount_shows_only_the_start_slide() {
    let h = mount(3, json!({ "autoplay": false, "startAtSlide": 1 }));
    settle().await;

    assert_eq!(h.carousel.state(), TransitionState::Idle { current: 1 });
    let log = h.stage.log();
    assert_eq!(log.attached.as_deref(), Some("zen-slide"));
    assert_eq!(log.frame(1), SlideFrame::VISIBLE);
    assert_eq!(log.frame(0), SlideFrame::HIDDEN);
    assert_eq!(log.frame(2), SlideFrame::HIDDEN);
    assert_eq!(log.active.iter().copied().collect::<Vec<_>>(), vec![1]);
    assert!(log.is_hidden(0));
    assert!(!log.is_hidden(1));
    assert_eq!(log.indicator, Some(1));

    let controls = log.controls.as_ref().expect("controls built");
    assert_eq!(controls.kind, NavigationType::Both);
    assert_eq!(controls.slide_count, 3);
    assert!(controls.labels.is_some());
}

#[tokio::test(start_paused = true)]
async fn next_wraps_from_last_to_first() {
    let h = mount(3, json!({ "autoplay": false, "startAtSlide": 2 }));
    let mut events = h.carousel.subscribe();

    assert_eq!(h.carousel.next(), Navigation::Accepted { from: 2, to: 0 });
    assert_eq!(
        h.carousel.state(),
        TransitionState::Transitioning { from: 2, to: 0 }
    );

    advance(2_100).await;
    assert_eq!(h.carousel.state(), TransitionState::Idle { current: 0 });

    let seen = drain(&mut events);
    assert!(seen.contains(&CarouselEvent::SlideChanged { from: 2, to: 0 }));
    assert!(seen.contains(&CarouselEvent::TransitionFinished { index: 0 }));
}

#[tokio::test(start_paused = true)]
async fn previous_wraps_from_first_to_last() {
    let h = mount(4, still());
    assert_eq!(h.carousel.previous(), Navigation::Accepted { from: 0, to: 3 });
    advance(2_100).await;
    assert_eq!(h.carousel.current_index(), 3);
}

#[tokio::test(start_paused = true)]
async fn n_nexts_return_to_the_start() {
    let h = mount(4, json!({ "autoplay": false, "startAtSlide": 2 }));
    for _ in 0..4 {
        assert!(h.carousel.next().is_accepted());
        advance(2_100).await;
    }
    assert_eq!(h.carousel.state(), TransitionState::Idle { current: 2 });
}

#[tokio::test(start_paused = true)]
async fn requests_during_a_transition_are_rejected() {
    let h = mount(3, still());

    assert!(h.carousel.next().is_accepted());
    assert_eq!(h.carousel.next(), Navigation::Rejected(Rejection::Busy));
    assert_eq!(
        h.carousel.go_to_slide(2),
        Navigation::Rejected(Rejection::Busy)
    );
    assert_eq!(
        h.carousel.state(),
        TransitionState::Transitioning { from: 0, to: 1 }
    );

    advance(1_000).await;
    assert!(h.carousel.is_transitioning(), "still mid-animation");
    assert_eq!(h.carousel.previous(), Navigation::Rejected(Rejection::Busy));

    advance(1_100).await;
    assert_eq!(h.carousel.state(), TransitionState::Idle { current: 1 });
    assert!(h.carousel.go_to_slide(2).is_accepted());
}

#[tokio::test(start_paused = true)]
async fn indicator_and_visibility_follow_the_request() {
    let h = mount(3, still());

    assert!(h.carousel.go_to_slide(2).is_accepted());
    {
        let log = h.stage.log();
        assert_eq!(log.indicator, Some(2));
        assert!(log.is_hidden(0));
        assert!(!log.is_hidden(2));
        assert!(log.active.is_empty(), "no slide is active mid-transition");
        assert_eq!(
            log.announcements.last().map(String::as_str),
            Some("Showing slide 3 of 3")
        );
    }

    advance(2_100).await;
    let log = h.stage.log();
    assert_eq!(log.active.iter().copied().collect::<Vec<_>>(), vec![2]);
    assert_eq!(log.frame(2), SlideFrame::VISIBLE);
    assert_eq!(log.frame(0).opacity, 0.0);
    assert!((log.frame(0).scale - 1.05).abs() < 1e-5);
}

#[tokio::test(start_paused = true)]
async fn announcements_can_be_turned_off() {
    let h = mount(
        3,
        json!({ "autoplay": false, "accessibility": { "announceSlides": false } }),
    );
    assert!(h.carousel.next().is_accepted());
    assert!(h.stage.log().announcements.is_empty());
}

#[tokio::test(start_paused = true)]
async fn invalid_targets_are_rejected_without_state_change() {
    let h = mount(3, still());

    assert_eq!(
        h.carousel.go_to_slide(0),
        Navigation::Rejected(Rejection::AlreadyShowing)
    );
    assert_eq!(
        h.carousel.go_to_slide(3),
        Navigation::Rejected(Rejection::OutOfRange)
    );
    assert_eq!(h.carousel.state(), TransitionState::Idle { current: 0 });
}

#[tokio::test(start_paused = true)]
async fn single_slide_never_transitions() {
    let h = mount(1, still());
    assert_eq!(
        h.carousel.next(),
        Navigation::Rejected(Rejection::AlreadyShowing)
    );
    assert_eq!(
        h.carousel.previous(),
        Navigation::Rejected(Rejection::AlreadyShowing)
    );
}

#[tokio::test(start_paused = true)]
async fn keyboard_maps_to_navigation() {
    let h = mount(4, still());

    assert_eq!(
        h.carousel.on_key(Key::End),
        Some(Navigation::Accepted { from: 0, to: 3 })
    );
    advance(2_100).await;
    assert_eq!(
        h.carousel.on_key(Key::ArrowRight),
        Some(Navigation::Accepted { from: 3, to: 0 })
    );
    advance(2_100).await;
    assert_eq!(
        h.carousel.on_key(Key::ArrowLeft),
        Some(Navigation::Accepted { from: 0, to: 3 })
    );
    advance(2_100).await;
    assert_eq!(
        h.carousel.on_key(Key::Home),
        Some(Navigation::Accepted { from: 3, to: 0 })
    );
}

#[tokio::test(start_paused = true)]
async fn keyboard_is_inert_without_accessibility() {
    let h = mount(
        3,
        json!({ "autoplay": false, "accessibility": { "enabled": false } }),
    );
    assert_eq!(h.carousel.on_key(Key::ArrowRight), None);
    assert_eq!(h.carousel.current_index(), 0);
    let log = h.stage.log();
    let controls = log.controls.as_ref().expect("controls built");
    assert!(controls.labels.is_none());
}

#[tokio::test(start_paused = true)]
async fn controls_are_skipped_when_navigation_is_off() {
    let h = mount(3, json!({ "autoplay": false, "navigation": { "type": "none" } }));
    assert!(h.stage.log().controls.is_none());

    let h = mount(3, json!({ "autoplay": false, "navigation": { "type": "arrows" } }));
    assert!(h.carousel.next().is_accepted());
    let log = h.stage.log();
    assert_eq!(log.controls.as_ref().map(|c| c.kind), Some(NavigationType::Arrows));
    assert_eq!(log.indicator, None, "arrows only, no dots to highlight");
}

#[tokio::test(start_paused = true)]
async fn missing_container_fails_mount() {
    let stage = RecordingStage::new(3).with_container("elsewhere");
    let fetcher: Arc<dyn ImageFetcher> = ScriptedFetcher::new();

    let err = Carousel::mount(CarouselConfig::default(), stage.clone(), fetcher)
        .expect_err("no container");
    assert!(matches!(err, CarouselError::ContainerNotFound(name) if name == "zen-slide"));
    assert!(stage.log().attached.is_none());
}

#[tokio::test(start_paused = true)]
async fn empty_stage_fails_mount_and_detaches() {
    let stage = RecordingStage::new(0);
    let fetcher = ScriptedFetcher::new();

    let err = Carousel::mount(
        CarouselConfig::default(),
        stage.clone(),
        Arc::clone(&fetcher) as Arc<dyn ImageFetcher>,
    )
    .expect_err("no slides");
    assert!(matches!(err, CarouselError::NoSlides));
    assert!(stage.log().detached);

    advance(10_000).await;
    assert_eq!(fetcher.calls(&support::slide_url(0)), 0, "nothing was started");
}

#[tokio::test(start_paused = true)]
async fn start_index_past_the_end_fails_mount() {
    let stage = RecordingStage::new(3);
    let config = CarouselConfig {
        start_at_slide: 5,
        ..CarouselConfig::default()
    };

    let err = Carousel::mount(config, stage.clone(), ScriptedFetcher::new())
        .expect_err("start out of range");
    assert!(matches!(
        err,
        CarouselError::StartOutOfRange { start: 5, count: 3 }
    ));
    assert!(stage.log().detached);
}

#[tokio::test(start_paused = true)]
async fn invalid_options_fail_mount() {
    let err = Carousel::with_options(
        &json!({ "zoomIntensity": 0.9 }),
        RecordingStage::new(3),
        ScriptedFetcher::new(),
    )
    .expect_err("zoom must enlarge");
    assert!(matches!(
        err,
        CarouselError::Config(ConfigError::OutOfRange { field: "zoomIntensity", .. })
    ));
}

#[test]
fn mount_outside_a_runtime_is_an_error() {
    let err = Carousel::mount(
        CarouselConfig::default(),
        RecordingStage::new(3),
        ScriptedFetcher::new(),
    )
    .expect_err("no runtime");
    assert!(matches!(err, CarouselError::NoRuntime));
}
