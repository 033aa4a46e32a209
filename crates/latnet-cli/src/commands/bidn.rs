use std::error::Error;

use clap::Args;
use latnet_core::{NetError, Real};
use latnet_merit::{Bidn, MeritFunctor};

#[derive(Args, Debug)]
pub struct BidnArgs {
    /// Interlacing factor, at least 2.
    #[arg(long, default_value_t = 2)]
    pub interlacing: u32,
    /// Number of points passed to the functor.
    #[arg(long, default_value_t = 0)]
    pub n: u64,
    /// Abscissas in [0, 1).
    #[arg(required = true)]
    pub xs: Vec<Real>,
}

pub fn run(args: &BidnArgs) -> Result<(), Box<dyn Error>> {
    println!("{}", table(args)?);
    Ok(())
}

/// Tabulates the functor at every abscissa, one `x value` pair per line.
pub fn table(args: &BidnArgs) -> Result<String, NetError> {
    let functor = Bidn::new(args.interlacing)?;
    let mut out = format!("# {functor}");
    for &x in &args.xs {
        out.push_str(&format!("\n{x} {}", functor.evaluate(x, args.n)));
    }
    Ok(out)
}
