//! Binary mantissa/exponent decomposition of `f32`

const EXP_MASK: u32 = 0xff << 23;
const EXP_HALF: u32 = 126 << 23;
const TWO_POW_25: f32 = 33_554_432.0;

/// Split `value` into `(m, e)` with `value = m * 2^e` and `0.5 <= |m| < 1`.
///
/// Zero returns `(0.0, 0)`; NaN and infinities are returned unchanged with
/// `e = 0`. Subnormals are normalized first, so the result is exact for every
/// finite input.
pub fn frexp(value: f32) -> (f32, i32) {
    if value == 0.0 || !value.is_finite() {
        return (value, 0);
    }

    let bits = value.to_bits();
    let exp_field = ((bits & EXP_MASK) >> 23) as i32;
    if exp_field == 0 {
        let (m, e) = frexp(value * TWO_POW_25);
        return (m, e - 25);
    }

    let mantissa = f32::from_bits((bits & !EXP_MASK) | EXP_HALF);
    (mantissa, exp_field - 126)
}

/// `m * 2^exp`, exact whenever the result is representable in `f32`.
pub fn ldexp(m: f32, exp: i32) -> f32 {
    (f64::from(m) * 2f64.powi(exp)) as f32
}
