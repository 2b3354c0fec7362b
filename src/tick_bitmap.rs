//! Sparse tick bitmap (C5): tracks which ticks are initialized without
//! allocating storage for the full `[MIN_TICK, MAX_TICK]` range. Ticks are
//! grouped into 256-wide words; a pool only allocates a `U256` word the
//! first time one of its ticks is flipped.

use std::collections::HashMap;

use ethnum::U256;

use crate::constants::{MAX_TICK, MIN_TICK};
use crate::errors::TickBitmapError;
use crate::math::bit_math;

/// All initialized-tick words for one pool, keyed by word index.
pub type TickBitmap = HashMap<i16, U256>;

/// Rounds `tick` down to the nearest multiple of `tick_spacing`.
pub fn compress(tick: i32, tick_spacing: i32) -> i32 {
    let quotient = tick / tick_spacing;
    let remainder = tick % tick_spacing;
    if tick < 0 && remainder != 0 {
        quotient - 1
    } else {
        quotient
    }
}

/// Splits a compressed tick into its word index and bit offset within the word.
pub fn position(compressed_tick: i32) -> (i16, u8) {
    let word_pos = compressed_tick >> 8;
    let bit_pos = (compressed_tick & 0xff) as u8;
    (word_pos as i16, bit_pos)
}

/// Flips the initialized bit for `tick`, allocating the word on first use.
pub fn flip_tick(
    bitmap: &mut TickBitmap,
    tick: i32,
    tick_spacing: i32,
) -> Result<(), TickBitmapError> {
    debug_assert!(tick >= MIN_TICK && tick <= MAX_TICK);

    if tick % tick_spacing != 0 {
        return Err(TickBitmapError::TickMisaligned(tick, tick_spacing));
    }

    let (word_pos, bit_pos) = position(tick / tick_spacing);
    let word = bitmap.entry(word_pos).or_insert(U256::ZERO);
    *word ^= U256::ONE << bit_pos;
    if *word == U256::ZERO {
        bitmap.remove(&word_pos);
    }
    Ok(())
}

pub fn is_initialized(bitmap: &TickBitmap, tick: i32, tick_spacing: i32) -> bool {
    if tick % tick_spacing != 0 {
        return false;
    }
    let (word_pos, bit_pos) = position(tick / tick_spacing);
    bitmap
        .get(&word_pos)
        .map(|word| *word & (U256::ONE << bit_pos) != U256::ZERO)
        .unwrap_or(false)
}

/// Returns the next initialized tick contained in the same word as `tick`
/// (or the adjacent word when searching right), either to the left
/// (`lte = true`) or strictly to the right (`lte = false`).
pub fn next_initialized_tick_within_one_word(
    bitmap: &TickBitmap,
    tick: i32,
    tick_spacing: i32,
    lte: bool,
) -> (i32, bool) {
    let compressed = compress(tick, tick_spacing);

    if lte {
        let (word_pos, bit_pos) = position(compressed);
        let mask = U256::MAX >> (255u32 - bit_pos as u32);
        let masked = bitmap.get(&word_pos).copied().unwrap_or(U256::ZERO) & mask;

        let initialized = masked != U256::ZERO;
        let next = if initialized {
            let msb = bit_math::get_msb_bit_position(&masked).expect("masked is nonzero");
            (compressed - (bit_pos as i32 - msb as i32)) * tick_spacing
        } else {
            (compressed - bit_pos as i32) * tick_spacing
        };
        (next, initialized)
    } else {
        let compressed_plus_one = compressed + 1;
        let (word_pos, bit_pos) = position(compressed_plus_one);
        let mask = !((U256::from(1u64) << bit_pos) - 1);
        let masked = bitmap.get(&word_pos).copied().unwrap_or(U256::ZERO) & mask;

        let initialized = masked != U256::ZERO;
        let next = if initialized {
            let lsb = bit_math::get_lsb_bit_position(&masked).expect("masked is nonzero");
            (compressed_plus_one + (lsb as i32 - bit_pos as i32)) * tick_spacing
        } else {
            (compressed_plus_one + (255i32 - bit_pos as i32)) * tick_spacing
        };
        (next, initialized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const INITIALIZED_TICK: i32 = 70;
    const SOLO_INITIALIZED_TICK_IN_WORD: i32 = -10_000;

    fn setup() -> TickBitmap {
        let mut bitmap = TickBitmap::new();
        let ticks = [
            SOLO_INITIALIZED_TICK_IN_WORD,
            -200,
            -55,
            -4,
            INITIALIZED_TICK,
            78,
            84,
            139,
            240,
            535,
        ];
        for &tick in &ticks {
            flip_tick(&mut bitmap, tick, 1).unwrap();
        }
        bitmap
    }

    #[test]
    fn compress_rounds_towards_negative_infinity() {
        assert_eq!(compress(25, 10), 2);
        assert_eq!(compress(-25, 10), -3);
        assert_eq!(compress(0, 10), 0);
    }

    proptest! {
        #[test]
        fn compress_matches_floor_division(tick in MIN_TICK..=MAX_TICK, tick_spacing in 1i32..=MAX_TICK) {
            let compressed = compress(tick, tick_spacing);
            let expected = {
                let quotient = tick / tick_spacing;
                if tick < 0 && tick % tick_spacing != 0 { quotient - 1 } else { quotient }
            };
            prop_assert_eq!(compressed, expected);
        }
    }

    #[test]
    fn position_splits_word_and_bit() {
        assert_eq!(position(256), (1, 0));
        assert_eq!(position(511), (1, 255));
        assert_eq!(position(-256), (-1, 0));
        assert_eq!(position(-511), (-2, 1));
        assert_eq!(position(0), (0, 0));
    }

    #[test]
    fn flip_tick_rejects_misaligned_tick() {
        let mut bitmap = TickBitmap::new();
        assert_eq!(flip_tick(&mut bitmap, 7, 10), Err(TickBitmapError::TickMisaligned(7, 10)));
    }

    #[test]
    fn flip_tick_toggles_and_untoggles() {
        let mut bitmap = TickBitmap::new();
        assert!(!is_initialized(&bitmap, 1, 1));
        flip_tick(&mut bitmap, 1, 1).unwrap();
        assert!(is_initialized(&bitmap, 1, 1));
        flip_tick(&mut bitmap, 1, 1).unwrap();
        assert!(!is_initialized(&bitmap, 1, 1));
    }

    #[test]
    fn flip_tick_frees_an_emptied_word() {
        let mut bitmap = TickBitmap::new();
        flip_tick(&mut bitmap, 10, 1).unwrap();
        assert!(bitmap.contains_key(&0));
        flip_tick(&mut bitmap, 10, 1).unwrap();
        assert!(!bitmap.contains_key(&0));
    }

    #[test]
    fn flip_tick_touches_only_its_own_bit() {
        let mut bitmap = setup();
        flip_tick(&mut bitmap, -230, 1).unwrap();
        assert!(is_initialized(&bitmap, -230, 1));
        assert!(!is_initialized(&bitmap, -231, 1));
        assert!(!is_initialized(&bitmap, -229, 1));
        assert!(!is_initialized(&bitmap, -230 + 256, 1));
    }

    #[test]
    fn next_initialized_right_within_word() {
        let bitmap = setup();
        let (next, initialized) = next_initialized_tick_within_one_word(&bitmap, 78, 1, false);
        assert_eq!(next, 84);
        assert!(initialized);

        let (next, initialized) = next_initialized_tick_within_one_word(&bitmap, -55, 1, false);
        assert_eq!(next, -4);
        assert!(initialized);
    }

    #[test]
    fn next_initialized_right_stops_at_word_boundary() {
        let bitmap = setup();
        let (next, initialized) = next_initialized_tick_within_one_word(&bitmap, 255, 1, false);
        assert_eq!(next, 511);
        assert!(!initialized);
    }

    #[test]
    fn next_initialized_left_within_word() {
        let bitmap = setup();
        let (next, initialized) = next_initialized_tick_within_one_word(&bitmap, 79, 1, true);
        assert_eq!(next, 78);
        assert!(initialized);
    }

    #[test]
    fn next_initialized_left_same_tick_when_initialized() {
        let bitmap = setup();
        let (next, initialized) = next_initialized_tick_within_one_word(&bitmap, 78, 1, true);
        assert_eq!(next, 78);
        assert!(initialized);
    }

    #[test]
    fn next_initialized_left_stops_at_word_boundary() {
        let bitmap = setup();
        let (next, initialized) = next_initialized_tick_within_one_word(&bitmap, 258, 1, true);
        assert_eq!(next, 256);
        assert!(!initialized);
    }

    proptest! {
        #[test]
        fn next_initialized_never_exceeds_256_ticks_away(
            tick in (MIN_TICK + 256)..(MAX_TICK - 256),
            lte in any::<bool>(),
        ) {
            let bitmap = setup();
            let (next, _initialized) = next_initialized_tick_within_one_word(&bitmap, tick, 1, lte);
            if lte {
                prop_assert!(next <= tick);
                prop_assert!(tick - next <= 256);
            } else {
                prop_assert!(next > tick);
                prop_assert!(next - tick <= 256);
            }
        }
    }
}
