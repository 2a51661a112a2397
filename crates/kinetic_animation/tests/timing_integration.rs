//! Integration tests for the timing state machine, property animations and sets
//!
//! These tests verify that:
//! - Repeat and reverse cycles land on the expected interpolated time
//! - Fill-before/after behave at the edges of the active window
//! - Sets merge children multiplicatively and in declaration order
//! - The scheduler retires finished work while holding filled values

use kinetic_animation::{
    Animate, Animation, AnimationPreset, AnimationScheduler, AnimationSet, Interpolator,
    RepeatMode,
};
use kinetic_core::{Point, Transformation};

const EPS: f32 = 1e-5;

/// Linear 0 -> 1 alpha makes the interpolated time directly observable
fn probe(repeat_count: i32, repeat_mode: RepeatMode) -> Animation {
    Animation::alpha(0.0, 1.0)
        .duration_ms(1000)
        .repeat_count(repeat_count)
        .repeat_mode(repeat_mode)
        .start_time(10_000)
        .build()
        .unwrap()
}

fn sample(animation: &mut dyn Animate, now_ms: u64) -> Transformation {
    let mut t = Transformation::new();
    animation.advance(now_ms, &mut t);
    t
}

#[test]
fn test_restart_repeat_revisits_midpoint() {
    let mut a = probe(2, RepeatMode::Restart);
    for offset in [500, 1500, 2500] {
        let alpha = sample(&mut a, 10_000 + offset).alpha;
        assert!((alpha - 0.5).abs() < EPS, "offset {offset}: {alpha}");
    }
}

#[test]
fn test_reverse_repeat_reflects_odd_cycle() {
    let mut a = probe(2, RepeatMode::Reverse);

    assert!((sample(&mut a, 10_700).alpha - 0.7).abs() < EPS);
    assert!((sample(&mut a, 11_500).alpha - 0.5).abs() < EPS);
    assert!((sample(&mut a, 11_700).alpha - 0.3).abs() < EPS);
    assert!((sample(&mut a, 12_500).alpha - 0.5).abs() < EPS);
    assert!((sample(&mut a, 12_700).alpha - 0.7).abs() < EPS);

    let mut t = Transformation::new();
    assert!(!a.get_transformation(13_000, &mut t));
    assert!((t.alpha - 1.0).abs() < EPS);
}

#[test]
fn test_elapsed_equal_to_duration_ends() {
    let mut a = probe(0, RepeatMode::Restart);
    let mut t = Transformation::new();
    let frame = a.advance(11_000, &mut t);
    assert!(frame.is_ended());
    assert!(!frame.more);
}

#[test]
fn test_fill_before_only_when_requested() {
    let build = |fill_before: bool| {
        Animation::alpha(0.2, 1.0)
            .duration_ms(1000)
            .start_offset_ms(300)
            .fill_before(fill_before)
            .start_time(0)
            .build()
            .unwrap()
    };

    let mut untouched = Transformation::new();
    untouched.set_alpha(0.42);
    build(false).advance(100, &mut untouched);
    assert_eq!(untouched.alpha, 0.42);

    let mut filled = Transformation::new();
    filled.set_alpha(0.42);
    build(true).advance(100, &mut filled);
    assert!((filled.alpha - 0.2).abs() < EPS);
}

#[test]
fn test_interpolator_feeds_property() {
    let mut a = Animation::alpha(0.0, 1.0)
        .duration_ms(1000)
        .interpolator(Interpolator::ACCELERATE)
        .start_time(0)
        .build()
        .unwrap();
    assert!((sample(&mut a, 500).alpha - 0.25).abs() < EPS);
}

#[test]
fn test_overshoot_reaches_property_unclamped() {
    let mut a = Animation::alpha(0.0, 1.0)
        .duration_ms(1000)
        .interpolator(Interpolator::OVERSHOOT)
        .start_time(0)
        .build()
        .unwrap();
    let peak = (0..1000)
        .step_by(10)
        .map(|ms| sample(&mut a, ms).alpha)
        .fold(f32::MIN, f32::max);
    assert!(peak > 1.0);
}

#[test]
fn test_concurrent_alphas_multiply() {
    let half = || {
        Animation::alpha(0.5, 0.5)
            .duration_ms(1000)
            .build()
            .unwrap()
    };
    let mut set = AnimationSet::concurrent().with(half()).with(half());
    set.set_start_time(0);

    let t = sample(&mut set, 500);
    assert!((t.alpha - 0.25).abs() < EPS);
}

#[test]
fn test_sequential_scale_then_rotate() {
    let mut set = AnimationSet::sequential()
        .with(
            Animation::scale(1.0, 2.0)
                .duration_ms(100)
                .fill_after(true)
                .build()
                .unwrap(),
        )
        .with(
            Animation::rotate(0.0, 90.0)
                .duration_ms(100)
                .fill_after(true)
                .build()
                .unwrap(),
        );
    set.set_start_time(0);

    let t = sample(&mut set, 150);
    let p = t.transform_point(Point::new(1.0, 0.0));
    // Rotated 45 degrees, then scaled by 2
    let expected = 2.0 * std::f32::consts::FRAC_1_SQRT_2;
    assert!((p.x - expected).abs() < 1e-4);
    assert!((p.y - expected).abs() < 1e-4);

    let t = sample(&mut set, 1_000);
    let p = t.transform_point(Point::new(1.0, 0.0));
    assert!(p.x.abs() < 1e-4);
    assert!((p.y - 2.0).abs() < 1e-4);
}

#[test]
fn test_scheduler_retires_finished_work() {
    let mut scheduler = AnimationScheduler::new();
    let fade = scheduler.add(AnimationPreset::fade_out(200).unwrap());
    let slide = scheduler.add(
        Animation::translate(100.0, 0.0, 0.0, 0.0)
            .duration_ms(300)
            .build()
            .unwrap(),
    );

    let mut now = 0;
    loop {
        scheduler.tick(now);
        if scheduler.frame(slide).is_some_and(|frame| frame.is_ended()) {
            break;
        }
        now += 16;
        assert!(now < 1600, "slide never ended");
    }

    assert_eq!(scheduler.transformation(fade).map(|t| t.alpha), Some(0.0));
    assert!(scheduler.transformation(slide).unwrap().matrix.is_identity());

    // The fade holds its end value, so only the slide retires
    assert_eq!(scheduler.tick(now + 16), 1);
    assert!(scheduler.contains(fade));
    assert!(!scheduler.contains(slide));
    assert!(scheduler.has_active_animations());
}

#[test]
fn test_independent_animations_across_threads() {
    let handles: Vec<_> = (0..4u32)
        .map(|i| {
            let mut a = Animation::alpha(0.0, 1.0)
                .duration_ms(100 * (i + 1))
                .start_time(0)
                .build()
                .unwrap();
            std::thread::spawn(move || {
                let mut t = Transformation::new();
                a.advance(50, &mut t);
                t.alpha
            })
        })
        .collect();

    let alphas: Vec<f32> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for (i, alpha) in alphas.iter().enumerate() {
        let expected = 50.0 / (100.0 * (i as f32 + 1.0));
        assert!((alpha - expected).abs() < EPS);
    }
}
