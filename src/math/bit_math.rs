use ethnum::U256;

/// Most significant set bit's position, or `None` if `value` is zero.
pub fn get_msb_bit_position(value: &U256) -> Option<u8> {
    if value == &U256::ZERO {
        None
    } else {
        Some((255 - value.leading_zeros()) as u8)
    }
}

/// Least significant set bit's position, or `None` if `value` is zero.
pub fn get_lsb_bit_position(value: &U256) -> Option<u8> {
    if value == &U256::ZERO {
        None
    } else {
        Some(value.trailing_zeros() as u8)
    }
}
