//! Round-number tick generation on the 1-2-5 ladder.
//!
//! A raw step `span / count` is snapped to `{1, 2, 5, 10} * 10^k` using the
//! geometric midpoints `sqrt(2)`, `sqrt(10)` and `sqrt(50)` as thresholds.
//! Negative increments encode inverse steps (`1 / -inc`) so sub-unit ticks
//! are produced by division and stay exact for decimal values like `0.1`.

const E10: f64 = 7.071_067_811_865_476; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

#[derive(Debug, Clone, Copy, PartialEq)]
struct TickSpec {
    first: f64,
    last: f64,
    increment: f64,
}

fn tick_spec(start: f64, stop: f64, count: f64) -> TickSpec {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut first, mut last, increment);
    if power < 0.0 {
        let inverse = 10f64.powf(-power) / factor;
        first = (start * inverse).round();
        last = (stop * inverse).round();
        if first / inverse < start {
            first += 1.0;
        }
        if last / inverse > stop {
            last -= 1.0;
        }
        increment = -inverse;
    } else {
        let inc = 10f64.powf(power) * factor;
        first = (start / inc).round();
        last = (stop / inc).round();
        if first * inc < start {
            first += 1.0;
        }
        if last * inc > stop {
            last -= 1.0;
        }
        increment = inc;
    }

    if last < first && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    TickSpec {
        first,
        last,
        increment,
    }
}

/// Signed tick increment for `[start, stop]` at roughly `count` ticks.
///
/// Positive values are plain steps; negative values are inverse steps.
/// Returns `0.0` (or a non-finite value) when no increment exists.
#[must_use]
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    tick_spec(start, stop, count as f64).increment
}

/// Absolute tick step for `[start, stop]` at roughly `count` ticks.
#[must_use]
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let reverse = stop < start;
    let increment = if reverse {
        tick_increment(stop, start, count)
    } else {
        tick_increment(start, stop, count)
    };
    let step = if increment < 0.0 {
        1.0 / -increment
    } else {
        increment
    };
    if reverse { -step } else { step }
}

/// Round-number ticks inside `[start, stop]`, ordered like the input bounds.
#[must_use]
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let spec = if reverse {
        tick_spec(stop, start, count as f64)
    } else {
        tick_spec(start, stop, count as f64)
    };
    if !(spec.last >= spec.first) || !spec.increment.is_finite() || spec.increment == 0.0 {
        return Vec::new();
    }

    let n = (spec.last - spec.first) as usize + 1;
    let value_at = |k: f64| {
        if spec.increment < 0.0 {
            k / -spec.increment
        } else {
            k * spec.increment
        }
    };
    (0..n)
        .map(|i| {
            let offset = i as f64;
            if reverse {
                value_at(spec.last - offset)
            } else {
                value_at(spec.first + offset)
            }
        })
        .collect()
}

/// Extends `[start, stop]` outward to round-number boundaries.
///
/// Iterates at most ten times and stops as soon as the increment repeats.
/// The result always contains the input interval.
#[must_use]
pub fn nice_bounds(start: f64, stop: f64, count: usize) -> (f64, f64) {
    if !start.is_finite() || !stop.is_finite() || start == stop || count == 0 {
        return (start, stop);
    }
    let reverse = stop < start;
    let (lo0, hi0) = if reverse { (stop, start) } else { (start, stop) };
    let (mut lo, mut hi) = (lo0, hi0);
    let mut previous = None;

    for _ in 0..10 {
        let step = tick_increment(lo, hi, count);
        if previous == Some(step) {
            break;
        }
        if step > 0.0 {
            lo = (lo / step).floor() * step;
            hi = (hi / step).ceil() * step;
        } else if step < 0.0 {
            lo = (lo * step).ceil() / step;
            hi = (hi * step).floor() / step;
        } else {
            break;
        }
        previous = Some(step);
    }

    let (lo, hi) = (lo.min(lo0), hi.max(hi0));
    if reverse { (hi, lo) } else { (lo, hi) }
}

/// Number of fraction digits needed to print ticks spaced by `step`.
#[must_use]
pub fn step_precision(step: f64) -> usize {
    let step = step.abs();
    if !step.is_finite() || step == 0.0 || step >= 1.0 {
        return 0;
    }
    // Absorbs log10 rounding at exact powers of ten.
    (-(step.log10() + 1e-9).floor()).max(0.0) as usize
}

/// Formats a tick value with the precision implied by its step.
#[must_use]
pub fn format_tick(value: f64, step: f64) -> String {
    let precision = step_precision(step);
    let text = format!("{value:.precision$}");
    if text.starts_with('-') && text[1..].chars().all(|ch| ch == '0' || ch == '.') {
        return text[1..].to_owned();
    }
    text
}

#[cfg(test)]
mod tests {
    use super::{format_tick, nice_bounds, step_precision, tick_increment, tick_step, ticks};

    #[test]
    fn ticks_follow_one_two_five_ladder() {
        assert_eq!(ticks(0.0, 10.0, 10), (0..=10).map(f64::from).collect::<Vec<_>>());
        assert_eq!(ticks(0.0, 35.0, 10), vec![0.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0]);
        assert_eq!(ticks(0.0, 1.0, 5), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    }

    #[test]
    fn reversed_bounds_yield_descending_ticks() {
        assert_eq!(ticks(10.0, 0.0, 5), vec![10.0, 8.0, 6.0, 4.0, 2.0, 0.0]);
    }

    #[test]
    fn sub_unit_increments_are_inverse_steps() {
        assert_eq!(tick_increment(0.0, 1.0, 10), -10.0);
        assert_eq!(tick_step(0.0, 1.0, 10), 0.1);
    }

    #[test]
    fn nice_bounds_round_outward() {
        assert_eq!(nice_bounds(0.2, 9.7, 10), (0.0, 10.0));
        assert_eq!(nice_bounds(3.0, 97.0, 10), (0.0, 100.0));
        assert_eq!(nice_bounds(0.0, 35.0, 10), (0.0, 35.0));
    }

    #[test]
    fn precision_tracks_step_magnitude() {
        assert_eq!(step_precision(5.0), 0);
        assert_eq!(step_precision(0.2), 1);
        assert_eq!(step_precision(0.05), 2);
        assert_eq!(format_tick(0.30000000000000004, 0.1), "0.3");
        assert_eq!(format_tick(-0.0, 1.0), "0");
    }
}
