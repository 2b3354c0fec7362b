use clmm_engine::math::tick_math;
use ethnum::U256;

fn main() {
    let args: Vec<_> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!("usage: sqrtx96_to_tick <sqrt_price_x96>");
        std::process::exit(1);
    }

    let sqrt_x96_text = &args[1];
    let sqrt_x96 = U256::from_str_radix(sqrt_x96_text, 10).expect("expected a number");

    match tick_math::get_tick_at_sqrt_ratio(sqrt_x96) {
        Ok(tick) => println!("tick for sqrt_x96 price {sqrt_x96} is {tick}"),
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
