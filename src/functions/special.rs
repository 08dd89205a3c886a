use super::checked;
use crate::error::EvalError;
use std::f64::consts::PI;

const LANCZOS_G: f64 = 7.0;
const LANCZOS_COEFFICIENTS: [f64; 9] = [
    0.999_999_999_999_809_9,
    676.5203681218851,
    -1259.1392167224028,
    771.323_428_777_653_1,
    -176.615_029_162_140_6,
    12.507343278686905,
    -0.13857109526572012,
    9.984_369_578_019_572e-6,
    1.5056327351493116e-7,
];

/// Largest argument whose gamma value is representable as `f64`.
const GAMMA_MAX_ARGUMENT: f64 = 171.624_376_956_302_7;

/// Below this the reflected value is smaller than the smallest subnormal.
const GAMMA_MIN_ARGUMENT: f64 = -185.0;

const ERF_SERIES_LIMIT: f64 = 2.5;
const ERFC_FRACTION_TERMS: usize = 60;

pub fn gamma(x: f64) -> Result<f64, EvalError> {
    if (x <= 0.0 && x.fract() == 0.0) || x == f64::NEG_INFINITY {
        return Err(EvalError::Domain {
            function: "gamma",
            argument: x,
        });
    }
    if x == f64::INFINITY {
        return Ok(x);
    }
    if x > GAMMA_MAX_ARGUMENT {
        return Err(EvalError::Overflow { operation: "gamma" });
    }
    if x < GAMMA_MIN_ARGUMENT {
        return Ok(0.0);
    }
    checked("gamma", x, lanczos(x))
}

fn lanczos(x: f64) -> f64 {
    if x < 0.5 {
        return PI / ((PI * x).sin() * lanczos(1.0 - x));
    }
    let x = x - 1.0;
    let mut sum = LANCZOS_COEFFICIENTS[0];
    for (i, coefficient) in LANCZOS_COEFFICIENTS.iter().enumerate().skip(1) {
        sum += coefficient / (x + i as f64);
    }
    let t = x + LANCZOS_G + 0.5;
    // t^(x + 1/2) split in two halves so it does not overflow before exp(-t) scales it down
    let half_power = t.powf((x + 0.5) / 2.0);
    (2.0 * PI).sqrt() * half_power * (-t).exp() * half_power * sum
}

pub fn erf(x: f64) -> f64 {
    if x.is_nan() {
        return x;
    }
    if x.abs() < ERF_SERIES_LIMIT {
        erf_series(x)
    } else {
        x.signum() * (1.0 - erfc_fraction(x.abs()))
    }
}

pub fn erfc(x: f64) -> f64 {
    if x.is_nan() {
        return x;
    }
    if x >= ERF_SERIES_LIMIT {
        erfc_fraction(x)
    } else if x <= -ERF_SERIES_LIMIT {
        2.0 - erfc_fraction(-x)
    } else {
        1.0 - erf_series(x)
    }
}

/// Maclaurin series, accurate to a few ulps for |x| < 2.5.
fn erf_series(x: f64) -> f64 {
    let mut power = x;
    let mut sum = 0.0;
    for n in 0..100 {
        let term = power / (2 * n + 1) as f64;
        sum += term;
        if term.abs() <= 1e-17 * sum.abs() {
            break;
        }
        power *= -x * x / (n + 1) as f64;
    }
    2.0 / PI.sqrt() * sum
}

/// Laplace continued fraction for erfc, evaluated backwards; x must be positive.
fn erfc_fraction(x: f64) -> f64 {
    if x.is_infinite() {
        return 0.0;
    }
    let mut fraction = x;
    for k in (1..=ERFC_FRACTION_TERMS).rev() {
        fraction = x + (k as f64 / 2.0) / fraction;
    }
    (-x * x).exp() / (PI.sqrt() * fraction)
}
