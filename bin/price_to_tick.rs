use clmm_engine::math::{safe_cast::big_uint_to_u256, tick_math};
use num_bigint::ToBigUint;

/// Converts a human price (token1 per token0) to a tick, aligned to a given
/// tick spacing — useful when hand-constructing `PoolConfig`/test fixtures.
fn main() {
    let args: Vec<_> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("usage: price_to_tick <price> <tick_spacing>");
        std::process::exit(1);
    }

    let q96 = 2_f64.powi(96);
    let price = args[1].parse::<f64>().expect("expected a floating point price");
    let tick_spacing = args[2].parse::<i32>().expect("expected a valid tick_spacing");

    let sqrt_x96_floating = price.sqrt() * q96;
    let sqrt_x96 = big_uint_to_u256(sqrt_x96_floating.to_biguint().expect("price must be non-negative"))
        .expect("price out of range for a 256-bit sqrt price");

    let tick_unaligned = match tick_math::get_tick_at_sqrt_ratio(sqrt_x96) {
        Ok(tick) => tick,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };
    let tick = (tick_unaligned / tick_spacing) * tick_spacing;

    println!("tick for price {price} is {tick} (unaligned: {tick_unaligned})");
}
