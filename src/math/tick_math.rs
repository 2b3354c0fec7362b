//! Tick ↔ √price conversion (C4): binary exponentiation over precomputed
//! magic constants in one direction, a log2 approximation with fixed-point
//! error bounds in the other.

use ethnum::{I256, U256};
use lazy_static::lazy_static;

use crate::constants::{MAX_SQRT_PRICE, MAX_TICK, MIN_SQRT_PRICE, MIN_TICK};
use crate::errors::TickMathError;

lazy_static! {
    static ref TWO_POW_32: U256 = U256::from(1_u8) << 32;
    static ref TWO_POW_128: U256 = U256::from(1_u8) << 128;
    static ref TWO_POW_256_MINUS_1: U256 = U256::from_be_bytes([0xff; 32]);
    static ref CONSTANTS: [U256; 19] = [
        U256::from_str_radix("fff97272373d413259a46990580e213a", 16).unwrap(),
        U256::from_str_radix("fff2e50f5f656932ef12357cf3c7fdcc", 16).unwrap(),
        U256::from_str_radix("ffe5caca7e10e4e61c3624eaa0941cd0", 16).unwrap(),
        U256::from_str_radix("ffcb9843d60f6159c9db58835c926644", 16).unwrap(),
        U256::from_str_radix("ff973b41fa98c081472e6896dfb254c0", 16).unwrap(),
        U256::from_str_radix("ff2ea16466c96a3843ec78b326b52861", 16).unwrap(),
        U256::from_str_radix("fe5dee046a99a2a811c461f1969c3053", 16).unwrap(),
        U256::from_str_radix("fcbe86c7900a88aedcffc83b479aa3a4", 16).unwrap(),
        U256::from_str_radix("f987a7253ac413176f2b074cf7815e54", 16).unwrap(),
        U256::from_str_radix("f3392b0822b70005940c7a398e4b70f3", 16).unwrap(),
        U256::from_str_radix("e7159475a2c29b7443b29c7fa6e889d9", 16).unwrap(),
        U256::from_str_radix("d097f3bdfd2022b8845ad8f792aa5825", 16).unwrap(),
        U256::from_str_radix("a9f746462d870fdf8a65dc1f90e061e5", 16).unwrap(),
        U256::from_str_radix("70d869a156d2a1b890bb3df62baf32f7", 16).unwrap(),
        U256::from_str_radix("31be135f97d08fd981231505542fcfa6", 16).unwrap(),
        U256::from_str_radix("9aa508b5b7a84e1c677de54f3e99bc9", 16).unwrap(),
        U256::from_str_radix("5d6af8dedb81196699c329225ee604", 16).unwrap(),
        U256::from_str_radix("2216e584f5fa1ea926041bedfe98", 16).unwrap(),
        U256::from_str_radix("48a170391f7dc42444e8fa2", 16).unwrap(),
    ];
    static ref MSB_THRESHOLDS: [(U256, u32); 8] = [
        (U256::from_str_radix("ffffffffffffffffffffffffffffffff", 16).unwrap(), 128),
        (U256::from_str_radix("ffffffffffffffff", 16).unwrap(), 64),
        (U256::from_str_radix("ffffffff", 16).unwrap(), 32),
        (U256::from_str_radix("ffff", 16).unwrap(), 16),
        (U256::from_str_radix("ff", 16).unwrap(), 8),
        (U256::from_str_radix("f", 16).unwrap(), 4),
        (U256::from_str_radix("3", 16).unwrap(), 2),
        (U256::from_str_radix("1", 16).unwrap(), 1),
    ];
    static ref LOG_2_COEFF: I256 = I256::from_str_radix("255738958999603826347141", 10).unwrap();
    static ref TICK_LOW_OFFSET: I256 =
        I256::from_str_radix("3402992956809132418596140100660247210", 10).unwrap();
    static ref TICK_HI_OFFSET: I256 =
        I256::from_str_radix("291339464771989622907027621153398088495", 10).unwrap();
}

/// sqrt(1.0001^tick) * 2^96, as a Q64.96 number.
pub fn get_sqrt_ratio_at_tick(tick: i32) -> Result<U256, TickMathError> {
    if tick < MIN_TICK || tick > MAX_TICK {
        return Err(TickMathError::InvalidTick(tick));
    }

    let abs_tick = tick.unsigned_abs();
    let mut ratio = if abs_tick & 0x1 != 0 {
        U256::from_str_radix("fffcb933bd6fad37aa2d162d1a594001", 16).unwrap()
    } else {
        *TWO_POW_128
    };

    for (i, constant) in CONSTANTS.iter().enumerate() {
        if abs_tick & (1 << (i + 1)) != 0 {
            ratio = (ratio * constant) >> 128;
        }
    }

    if tick > 0 {
        ratio = *TWO_POW_256_MINUS_1 / ratio;
    }

    let sqrt_price_x96 = (ratio >> 32)
        + if ratio % *TWO_POW_32 == U256::ZERO {
            U256::ZERO
        } else {
            U256::ONE
        };
    Ok(sqrt_price_x96)
}

/// The tick whose price is the greatest tick price less than or equal to
/// `sqrt_price_x96`.
pub fn get_tick_at_sqrt_ratio(sqrt_price_x96: U256) -> Result<i32, TickMathError> {
    if sqrt_price_x96 < *MIN_SQRT_PRICE || sqrt_price_x96 >= *MAX_SQRT_PRICE {
        return Err(TickMathError::InvalidSqrtPrice);
    }

    let ratio = sqrt_price_x96 << 32;
    let msb = compute_msb_fast(&ratio);
    let r = if msb >= 128 {
        ratio >> (msb - 127)
    } else {
        ratio << (127 - msb)
    };

    let log_2 = compute_log_2(r, msb);
    let log_sqrt10001 = log_2 * *LOG_2_COEFF;

    let tick_low = ((log_sqrt10001 - *TICK_LOW_OFFSET) >> 128_u8).as_i32();
    let tick_hi = ((log_sqrt10001 + *TICK_HI_OFFSET) >> 128_u8).as_i32();

    Ok(if tick_low == tick_hi {
        tick_low
    } else {
        let sqrt_ratio_at_tick_hi =
            get_sqrt_ratio_at_tick(tick_hi).expect("tick_hi is always in-range by construction");
        if sqrt_ratio_at_tick_hi <= sqrt_price_x96 {
            tick_hi
        } else {
            tick_low
        }
    })
}

fn compute_msb_fast(value: &U256) -> u32 {
    let mut msb = 0;
    let mut r = *value;
    for &(threshold, bit) in MSB_THRESHOLDS.iter() {
        if r > threshold {
            msb |= bit;
            r >>= bit;
        }
    }
    msb
}

fn compute_log_2(mut r: U256, msb: u32) -> I256 {
    let mut log_2 = I256::from(msb as i32 - 128) << 64;
    for shift in (50..=63).rev() {
        r = (r * r) >> 127;
        let f: U256 = r >> 128;
        let f_u32 = f.as_u32();
        log_2 |= I256::from(f_u32) << shift;
        r >>= f_u32;
    }
    log_2
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::ToPrimitive;

    #[test]
    fn large_ticks() {
        assert_eq!(
            get_sqrt_ratio_at_tick(10000).unwrap(),
            U256::from_str_radix("130621891405341611593710811006", 10).unwrap()
        );
        assert_eq!(
            get_sqrt_ratio_at_tick(-10000).unwrap(),
            U256::from_str_radix("48055510970269007215549348797", 10).unwrap()
        );
    }

    #[test]
    fn between_ticks_selects_floor() {
        let tick_1 = get_sqrt_ratio_at_tick(1).unwrap();
        let tick_2 = get_sqrt_ratio_at_tick(2).unwrap();
        let mid = (tick_1 + tick_2) / 2u128;
        assert_eq!(get_tick_at_sqrt_ratio(mid).unwrap(), 1);
    }

    #[test]
    fn near_max_tick_round_trips() {
        let tick = MAX_TICK - 10;
        let sqrt_price = get_sqrt_ratio_at_tick(tick).unwrap();
        assert_eq!(get_tick_at_sqrt_ratio(sqrt_price).unwrap(), tick);
    }

    #[test]
    fn tick_zero_is_two_pow_96() {
        let two_pow_96 = U256::ONE << 96;
        assert_eq!(get_sqrt_ratio_at_tick(0).unwrap(), two_pow_96);
    }

    #[test]
    fn boundary_sqrt_prices() {
        assert_eq!(get_sqrt_ratio_at_tick(MIN_TICK).unwrap(), *MIN_SQRT_PRICE);
        assert_eq!(get_sqrt_ratio_at_tick(MAX_TICK).unwrap(), *MAX_SQRT_PRICE);
    }

    #[test]
    fn out_of_range_ticks_error() {
        assert_eq!(
            get_sqrt_ratio_at_tick(MAX_TICK + 1),
            Err(TickMathError::InvalidTick(MAX_TICK + 1))
        );
        assert_eq!(
            get_sqrt_ratio_at_tick(MIN_TICK - 1),
            Err(TickMathError::InvalidTick(MIN_TICK - 1))
        );
    }

    #[test]
    fn out_of_range_sqrt_prices_error() {
        assert_eq!(
            get_tick_at_sqrt_ratio(*MIN_SQRT_PRICE - U256::ONE),
            Err(TickMathError::InvalidSqrtPrice)
        );
        assert_eq!(
            get_tick_at_sqrt_ratio(*MAX_SQRT_PRICE),
            Err(TickMathError::InvalidSqrtPrice)
        );
    }

    #[test]
    fn accuracy_against_floating_point() {
        const ABS_TICKS: [u32; 14] = [
            50, 100, 250, 500, 1000, 2500, 3000, 4000, 5000, 50000, 150000, 250000, 500000, 738203,
        ];

        for &abs_tick in &ABS_TICKS {
            for &tick in &[abs_tick as i32, -(abs_tick as i32)] {
                let precise = precise_sqrt_ratio_at_tick(tick);
                let calculated = get_sqrt_ratio_at_tick(tick).unwrap();
                let abs_diff = (precise - calculated.as_f64()).abs();
                let rel_diff = abs_diff / precise;
                assert!(rel_diff < 0.000001, "tick {tick}: relative diff too large: {rel_diff}");
            }
        }
    }

    #[test]
    fn tick_at_sqrt_ratio_matches_known_values() {
        let two_pow_96: U256 = U256::ONE << 96;
        assert_eq!(get_tick_at_sqrt_ratio(two_pow_96).unwrap(), 0);
        assert_eq!(get_tick_at_sqrt_ratio(*MIN_SQRT_PRICE).unwrap(), MIN_TICK);

        let max_minus_one = *MAX_SQRT_PRICE - U256::ONE;
        assert_eq!(get_tick_at_sqrt_ratio(max_minus_one).unwrap(), MAX_TICK - 1);
    }

    #[test]
    fn round_trip_selected_ticks() {
        let ticks = [0, 1, -1, 295, -295, MIN_TICK, MAX_TICK - 1];
        for &tick in ticks.iter() {
            let sqrt_price = get_sqrt_ratio_at_tick(tick).unwrap();
            let computed_tick = get_tick_at_sqrt_ratio(sqrt_price).unwrap();
            assert!(
                computed_tick == tick || computed_tick == tick - 1,
                "round trip failed for tick {tick}: got {computed_tick}"
            );
            assert!(get_sqrt_ratio_at_tick(computed_tick).unwrap() <= sqrt_price);
        }
    }

    #[test]
    fn tick_at_sqrt_ratio_brackets_the_input() {
        let ratios = [
            *MIN_SQRT_PRICE,
            U256::from_str_radix("42951287390", 10).unwrap(),
            U256::from_str_radix("792281625142643375935439", 10).unwrap(),
            U256::from_str_radix("112045541949572279837463876301", 10).unwrap(),
            *MAX_SQRT_PRICE - U256::ONE,
        ];
        for ratio in ratios {
            let tick = get_tick_at_sqrt_ratio(ratio).unwrap();
            let ratio_of_tick = get_sqrt_ratio_at_tick(tick).unwrap();
            let ratio_of_tick_plus_one = get_sqrt_ratio_at_tick(tick + 1).unwrap();
            assert!(ratio >= ratio_of_tick);
            assert!(ratio < ratio_of_tick_plus_one);
        }
    }

    fn precise_sqrt_ratio_at_tick(tick: i32) -> f64 {
        let price = 1.0001_f64.powi(tick);
        let sqrt_price = price.sqrt();
        let two_pow_96 = 2_u128.pow(96);
        sqrt_price * two_pow_96.to_f64().unwrap()
    }

    proptest::proptest! {
        #[test]
        fn monotonic_in_tick(t1 in MIN_TICK..MAX_TICK, delta in 1i32..1000i32) {
            let t2 = (t1 + delta).min(MAX_TICK);
            if t2 > t1 {
                let p1 = get_sqrt_ratio_at_tick(t1).unwrap();
                let p2 = get_sqrt_ratio_at_tick(t2).unwrap();
                proptest::prop_assert!(p1 < p2);
            }
        }
    }
}
