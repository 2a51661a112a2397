//! Interpolators
//!
//! An [`Interpolator`] remaps normalized time (`0.0..=1.0`) before a property
//! animation consumes it. Every variant is a closed-form function of its input
//! and its own parameters, so values are `Copy` and can be shared between any
//! number of animations and threads.
//!
//! Outputs are not bounded: overshoot and anticipate curves intentionally leave
//! `[0, 1]`, and property animations must tolerate that.

use kinetic_core::ConfigError;
use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Default tension for [`Interpolator::Overshoot`] and [`Interpolator::Anticipate`]
pub const DEFAULT_TENSION: f32 = 2.0;

/// Anticipate-overshoot scales its tension by this factor at construction
pub const ANTICIPATE_OVERSHOOT_SCALE: f32 = 1.5;

/// Time remapping curve
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Interpolator {
    /// `t`
    #[default]
    Linear,
    /// Starts slow and speeds up: `t^(2 * factor)`
    Accelerate(f32),
    /// Starts fast and slows down: `1 - (1 - t)^(2 * factor)`
    Decelerate(f32),
    /// Cosine ease in and out
    AccelerateDecelerate,
    /// Bounces at the end
    Bounce,
    /// Flings past the end then settles back, with the given tension
    Overshoot(f32),
    /// Pulls back before moving forward, with the given tension
    Anticipate(f32),
    /// Anticipate then overshoot. The stored tension is the effective one; see
    /// [`Interpolator::anticipate_overshoot`].
    AnticipateOvershoot(f32),
    /// Repeats a sine wave for the given number of cycles
    Cycle(f32),
    /// CSS-style cubic bezier with control points (x1, y1) and (x2, y2)
    CubicBezier(f32, f32, f32, f32),
    /// Quadratic bezier with a single control point (cx, cy)
    QuadBezier(f32, f32),
}

impl Interpolator {
    pub const ACCELERATE: Interpolator = Interpolator::Accelerate(1.0);
    pub const DECELERATE: Interpolator = Interpolator::Decelerate(1.0);
    pub const OVERSHOOT: Interpolator = Interpolator::Overshoot(DEFAULT_TENSION);
    pub const ANTICIPATE: Interpolator = Interpolator::Anticipate(DEFAULT_TENSION);
    pub const ANTICIPATE_OVERSHOOT: Interpolator =
        Interpolator::AnticipateOvershoot(DEFAULT_TENSION * ANTICIPATE_OVERSHOOT_SCALE);

    /// Anticipate-overshoot from a base tension, scaled by 1.5
    pub fn anticipate_overshoot(tension: f32) -> Self {
        Interpolator::AnticipateOvershoot(tension * ANTICIPATE_OVERSHOOT_SCALE)
    }

    /// Validated cubic bezier. The x coordinates must lie in `[0, 1]` so the
    /// curve stays a function of time.
    pub fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32) -> Result<Self, ConfigError> {
        let interpolator = Interpolator::CubicBezier(x1, y1, x2, y2);
        interpolator.validate()?;
        Ok(interpolator)
    }

    /// Validated quadratic bezier
    pub fn quad_bezier(cx: f32, cy: f32) -> Result<Self, ConfigError> {
        let interpolator = Interpolator::QuadBezier(cx, cy);
        interpolator.validate()?;
        Ok(interpolator)
    }

    /// Check that the parameters describe a usable curve
    pub fn validate(&self) -> Result<(), ConfigError> {
        let name = self.name();
        let finite = |values: &[f32]| -> Result<(), ConfigError> {
            if values.iter().all(|v| v.is_finite()) {
                Ok(())
            } else {
                Err(ConfigError::invalid_interpolator(
                    name,
                    "parameters must be finite",
                ))
            }
        };

        match *self {
            Interpolator::Linear | Interpolator::AccelerateDecelerate | Interpolator::Bounce => {
                Ok(())
            }
            Interpolator::Accelerate(factor) | Interpolator::Decelerate(factor) => {
                finite(&[factor])?;
                if factor <= 0.0 {
                    return Err(ConfigError::invalid_interpolator(
                        name,
                        format!("factor must be positive, got {factor}"),
                    ));
                }
                Ok(())
            }
            Interpolator::Overshoot(tension)
            | Interpolator::Anticipate(tension)
            | Interpolator::AnticipateOvershoot(tension) => {
                finite(&[tension])?;
                if tension < 0.0 {
                    return Err(ConfigError::invalid_interpolator(
                        name,
                        format!("tension must not be negative, got {tension}"),
                    ));
                }
                Ok(())
            }
            Interpolator::Cycle(cycles) => finite(&[cycles]),
            Interpolator::CubicBezier(x1, y1, x2, y2) => {
                finite(&[x1, y1, x2, y2])?;
                check_unit_x(name, x1)?;
                check_unit_x(name, x2)
            }
            Interpolator::QuadBezier(cx, cy) => {
                finite(&[cx, cy])?;
                check_unit_x(name, cx)
            }
        }
    }

    /// Map normalized time to interpolated time
    pub fn map(&self, t: f32) -> f32 {
        match *self {
            Interpolator::Linear => t,
            Interpolator::Accelerate(factor) => {
                if factor == 1.0 {
                    t * t
                } else {
                    t.powf(2.0 * factor)
                }
            }
            Interpolator::Decelerate(factor) => {
                if factor == 1.0 {
                    1.0 - (1.0 - t) * (1.0 - t)
                } else {
                    1.0 - (1.0 - t).powf(2.0 * factor)
                }
            }
            Interpolator::AccelerateDecelerate => ((t + 1.0) * PI).cos() / 2.0 + 0.5,
            Interpolator::Bounce => bounce(t),
            Interpolator::Overshoot(tension) => {
                let t = t - 1.0;
                t * t * ((tension + 1.0) * t + tension) + 1.0
            }
            Interpolator::Anticipate(tension) => anticipate(t, tension),
            Interpolator::AnticipateOvershoot(tension) => {
                if t < 0.5 {
                    0.5 * anticipate(t * 2.0, tension)
                } else {
                    0.5 * (overshoot_tail(t * 2.0 - 2.0, tension) + 2.0)
                }
            }
            Interpolator::Cycle(cycles) => (2.0 * cycles * PI * t).sin(),
            Interpolator::CubicBezier(x1, y1, x2, y2) => cubic_bezier_ease(t, x1, y1, x2, y2),
            Interpolator::QuadBezier(cx, cy) => {
                // Degree-elevate to the equivalent cubic
                let x1 = 2.0 / 3.0 * cx;
                let y1 = 2.0 / 3.0 * cy;
                cubic_bezier_ease(t, x1, y1, 1.0 / 3.0 + x1, 1.0 / 3.0 + y1)
            }
        }
    }

    /// Short name, also used as the parse keyword
    pub fn name(&self) -> &'static str {
        match self {
            Interpolator::Linear => "linear",
            Interpolator::Accelerate(_) => "accelerate",
            Interpolator::Decelerate(_) => "decelerate",
            Interpolator::AccelerateDecelerate => "accelerate-decelerate",
            Interpolator::Bounce => "bounce",
            Interpolator::Overshoot(_) => "overshoot",
            Interpolator::Anticipate(_) => "anticipate",
            Interpolator::AnticipateOvershoot(_) => "anticipate-overshoot",
            Interpolator::Cycle(_) => "cycle",
            Interpolator::CubicBezier(..) => "cubic-bezier",
            Interpolator::QuadBezier(..) => "quad-bezier",
        }
    }

    /// Whether the curve can leave `[0, 1]` for inputs inside it
    pub fn may_overshoot(&self) -> bool {
        match *self {
            Interpolator::Overshoot(_)
            | Interpolator::Anticipate(_)
            | Interpolator::AnticipateOvershoot(_)
            | Interpolator::Cycle(_) => true,
            Interpolator::CubicBezier(_, y1, _, y2) => {
                !(0.0..=1.0).contains(&y1) || !(0.0..=1.0).contains(&y2)
            }
            Interpolator::QuadBezier(_, cy) => !(0.0..=1.0).contains(&cy),
            _ => false,
        }
    }
}

fn check_unit_x(name: &'static str, x: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&x) {
        Ok(())
    } else {
        Err(ConfigError::invalid_interpolator(
            name,
            format!("control point x must be within [0, 1], got {x}"),
        ))
    }
}

fn anticipate(t: f32, tension: f32) -> f32 {
    t * t * ((tension + 1.0) * t - tension)
}

fn overshoot_tail(t: f32, tension: f32) -> f32 {
    t * t * ((tension + 1.0) * t + tension)
}

fn bounce(t: f32) -> f32 {
    #[inline]
    fn arc(t: f32) -> f32 {
        t * t * 8.0
    }

    // Scaled so the final bounce lands exactly on 1.0
    let t = t * 1.1226;
    if t < 0.3535 {
        arc(t)
    } else if t < 0.7408 {
        arc(t - 0.54719) + 0.7
    } else if t < 0.9644 {
        arc(t - 0.8526) + 0.9
    } else {
        arc(t - 1.0435) + 0.95
    }
}

/// Cubic bezier easing calculation (matches the CSS `cubic-bezier()` timing function).
///
/// Uses Newton-Raphson with binary-search fallback for robustness.
/// Computes in f64 internally to avoid f32 precision jitter at 120fps.
fn cubic_bezier_ease(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    // Endpoints are always exact
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let x = t as f64;
    let (x1, y1, x2, y2) = (x1 as f64, y1 as f64, x2 as f64, y2 as f64);

    let mut p = x;
    for _ in 0..8 {
        let err = bezier_sample(p, x1, x2) - x;
        if err.abs() < 1e-7 {
            return bezier_sample(p, y1, y2) as f32;
        }
        let slope = bezier_slope(p, x1, x2);
        if slope.abs() < 1e-7 {
            break;
        }
        p -= err / slope;
    }

    let mut lo = 0.0_f64;
    let mut hi = 1.0_f64;
    p = x;
    for _ in 0..20 {
        let val = bezier_sample(p, x1, x2);
        if (val - x).abs() < 1e-7 {
            break;
        }
        if val < x {
            lo = p;
        } else {
            hi = p;
        }
        p = (lo + hi) * 0.5;
    }

    bezier_sample(p, y1, y2) as f32
}

/// B(t) = 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³
#[inline]
fn bezier_sample(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    ((a * t + b) * t + c) * t
}

#[inline]
fn bezier_slope(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    (3.0 * a * t + 2.0 * b) * t + c
}

// ============================================================================
// Text form: `name` or `name:arg1,arg2,...`
// ============================================================================

impl fmt::Display for Interpolator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name();
        match *self {
            Interpolator::Linear | Interpolator::AccelerateDecelerate | Interpolator::Bounce => {
                write!(f, "{name}")
            }
            Interpolator::Accelerate(v)
            | Interpolator::Decelerate(v)
            | Interpolator::Overshoot(v)
            | Interpolator::Anticipate(v)
            | Interpolator::AnticipateOvershoot(v)
            | Interpolator::Cycle(v) => write!(f, "{name}:{v}"),
            Interpolator::CubicBezier(x1, y1, x2, y2) => write!(f, "{name}:{x1},{y1},{x2},{y2}"),
            Interpolator::QuadBezier(cx, cy) => write!(f, "{name}:{cx},{cy}"),
        }
    }
}

impl FromStr for Interpolator {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (name, args) = match s.split_once(':') {
            Some((name, args)) => (name.trim(), Some(args)),
            None => (s, None),
        };

        let values: Vec<f32> = match args {
            Some(args) => args
                .split(',')
                .map(|v| v.trim().parse::<f32>())
                .collect::<Result<_, _>>()
                .map_err(|_| ConfigError::UnknownInterpolator(s.to_string()))?,
            None => Vec::new(),
        };

        let single = |default: f32| -> Result<f32, ConfigError> {
            match values.as_slice() {
                [] => Ok(default),
                [v] => Ok(*v),
                _ => Err(ConfigError::UnknownInterpolator(s.to_string())),
            }
        };

        let interpolator = match name.to_ascii_lowercase().as_str() {
            "linear" if values.is_empty() => Interpolator::Linear,
            "accelerate" => Interpolator::Accelerate(single(1.0)?),
            "decelerate" => Interpolator::Decelerate(single(1.0)?),
            "accelerate-decelerate" if values.is_empty() => Interpolator::AccelerateDecelerate,
            "bounce" if values.is_empty() => Interpolator::Bounce,
            "overshoot" => Interpolator::Overshoot(single(DEFAULT_TENSION)?),
            "anticipate" => Interpolator::Anticipate(single(DEFAULT_TENSION)?),
            "anticipate-overshoot" => Interpolator::AnticipateOvershoot(single(
                DEFAULT_TENSION * ANTICIPATE_OVERSHOOT_SCALE,
            )?),
            "cycle" => Interpolator::Cycle(single(1.0)?),
            "cubic-bezier" => match values.as_slice() {
                [x1, y1, x2, y2] => Interpolator::CubicBezier(*x1, *y1, *x2, *y2),
                _ => return Err(ConfigError::UnknownInterpolator(s.to_string())),
            },
            "quad-bezier" => match values.as_slice() {
                [cx, cy] => Interpolator::QuadBezier(*cx, *cy),
                _ => return Err(ConfigError::UnknownInterpolator(s.to_string())),
            },
            _ => return Err(ConfigError::UnknownInterpolator(s.to_string())),
        };

        interpolator.validate()?;
        Ok(interpolator)
    }
}
