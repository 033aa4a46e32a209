use std::collections::BTreeMap;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use latnet_core::{ErrorInfo, NetError, OutputFormat, PointSetType, RngHandle, RunProvenance};
use latnet_merit::{level_merits, parse_level_combiner, Bidn};
use latnet_net::{
    points, to_json, DigitalNet, DigitalNetConstruction, Explicit, ExplicitShape,
    GeneratingMatrix, NetConstruction, Polynomial, PolynomialLattice, Sobol, SobolGenValue,
};
use log::info;

use crate::config::{ConstructionKind, GenValueConfig, NetConfig};

#[derive(Args, Debug, Default)]
pub struct NetArgs {
    /// YAML configuration describing the net; flags below override it.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Construction method.
    #[arg(long, value_enum)]
    pub construction: Option<ConstructionKind>,
    /// Number of coordinates.
    #[arg(long)]
    pub dimension: Option<usize>,
    /// Number of digits of a Sobol net.
    #[arg(long)]
    pub m: Option<usize>,
    /// Modulus of a polynomial lattice rule, e.g. "1 0 0 1 1".
    #[arg(long)]
    pub modulus: Option<String>,
    /// Rows of explicit generating matrices.
    #[arg(long)]
    pub rows: Option<usize>,
    /// Columns of explicit generating matrices.
    #[arg(long)]
    pub cols: Option<usize>,
    /// Draw random generating values from this master seed.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Output format (`cli` or `gui`).
    #[arg(long = "output-format")]
    pub output_format: Option<OutputFormat>,
    /// Extend the net to this square size after construction.
    #[arg(long = "extend-size")]
    pub extend_size: Option<usize>,
    /// Report per-coordinate B-IDN merits reduced with this combiner.
    #[arg(long)]
    pub combiner: Option<String>,
    /// Combine merits over every embedded level.
    #[arg(long)]
    pub multilevel: bool,
    /// Interlacing factor of the B-IDN functor.
    #[arg(long)]
    pub interlacing: Option<u32>,
    /// Print every point of the net.
    #[arg(long)]
    pub points: bool,
    /// Write the serialized net to this path.
    #[arg(long)]
    pub save: Option<PathBuf>,
}

pub fn run(args: &NetArgs) -> Result<(), Box<dyn Error>> {
    let config = resolve_config(args)?;
    println!("{}", render(&config)?);
    Ok(())
}

/// Loads the configuration file, if any, and applies the command line overrides.
pub fn resolve_config(args: &NetArgs) -> Result<NetConfig, NetError> {
    let mut config = match &args.config {
        Some(path) => NetConfig::load(path)?,
        None => NetConfig::default(),
    };
    if let Some(construction) = args.construction {
        config.construction = construction;
    }
    if let Some(dimension) = args.dimension {
        config.dimension = dimension;
    }
    if args.m.is_some() {
        config.design.m = args.m;
    }
    if args.modulus.is_some() {
        config.design.modulus = args.modulus.clone();
    }
    if args.rows.is_some() {
        config.design.rows = args.rows;
    }
    if args.cols.is_some() {
        config.design.cols = args.cols;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(format) = args.output_format {
        config.output_format = format;
    }
    if args.extend_size.is_some() {
        config.extend_size = args.extend_size;
    }
    if args.combiner.is_some() {
        config.combiner = args.combiner.clone();
    }
    if args.multilevel {
        config.point_set_type = PointSetType::Multilevel;
    }
    if let Some(interlacing) = args.interlacing {
        config.interlacing = interlacing;
    }
    config.points |= args.points;
    if args.save.is_some() {
        config.save = args.save.clone();
    }
    Ok(config)
}

/// Builds the configured net and renders its report.
pub fn render(config: &NetConfig) -> Result<String, NetError> {
    match config.construction {
        ConstructionKind::Sobol => {
            let m = config.design.m.unwrap_or_else(Sobol::default_design_parameter);
            let gen_values = convert_gen_values(config, |coord, gen| match gen {
                GenValueConfig::Numbers(numbers) => Ok(SobolGenValue::new(coord, numbers.clone())),
                _ => Err(gen_value_kind(ConstructionKind::Sobol, coord)),
            })?;
            render_net::<Sobol>(config, m, gen_values)
        }
        ConstructionKind::Polynomial => {
            let modulus = match &config.design.modulus {
                Some(text) => text.parse::<Polynomial>()?,
                None => PolynomialLattice::default_design_parameter(),
            };
            let gen_values = convert_gen_values(config, |coord, gen| match gen {
                GenValueConfig::Polynomial(text) => text.parse::<Polynomial>(),
                _ => Err(gen_value_kind(ConstructionKind::Polynomial, coord)),
            })?;
            render_net::<PolynomialLattice>(config, modulus, gen_values)
        }
        ConstructionKind::Explicit => {
            let default = Explicit::default_design_parameter();
            let shape = ExplicitShape::new(
                config.design.rows.unwrap_or(default.rows),
                config.design.cols.unwrap_or(default.cols),
            );
            let gen_values = convert_gen_values(config, |coord, gen| match gen {
                GenValueConfig::Rows(rows) => GeneratingMatrix::from_row_strings(rows.as_slice()),
                _ => Err(gen_value_kind(ConstructionKind::Explicit, coord)),
            })?;
            render_net::<Explicit>(config, shape, gen_values)
        }
    }
}

fn convert_gen_values<T>(
    config: &NetConfig,
    convert: impl Fn(usize, &GenValueConfig) -> Result<T, NetError>,
) -> Result<Vec<T>, NetError> {
    config
        .gen_values
        .iter()
        .enumerate()
        .map(|(idx, gen)| convert(idx + 1, gen))
        .collect()
}

fn gen_value_kind(construction: ConstructionKind, coord: usize) -> NetError {
    NetError::Config(
        ErrorInfo::new(
            "gen-value-kind",
            "generating value does not fit the construction",
        )
        .with_context("construction", format!("{construction:?}"))
        .with_context("coord", coord.to_string())
        .with_hint("sobol takes direction number lists, polynomial takes strings, explicit takes row lists"),
    )
}

fn build_net<C: NetConstruction>(
    config: &NetConfig,
    design: C::DesignParameter,
    gen_values: Vec<C::GenValue>,
) -> Result<DigitalNetConstruction<C>, NetError> {
    if !gen_values.is_empty() {
        return DigitalNetConstruction::with_gen_values(config.dimension, design, gen_values);
    }
    let Some(seed) = config.seed else {
        return DigitalNetConstruction::new(config.dimension, design);
    };
    C::check_design_parameter(&design)?;
    let master = RngHandle::from_seed(seed);
    let drawn = (1..=config.dimension)
        .map(|coord| {
            let mut rng = master.substream(coord as u64);
            C::random_gen_value(coord, &design, &mut rng)
        })
        .collect::<Result<Vec<_>, _>>()?;
    info!("drew {} random {} generating values from seed {seed}", drawn.len(), C::NAME);
    DigitalNetConstruction::with_gen_values(config.dimension, design, drawn)
}

fn render_net<C: NetConstruction>(
    config: &NetConfig,
    design: C::DesignParameter,
    gen_values: Vec<C::GenValue>,
) -> Result<String, NetError> {
    let mut net = build_net::<C>(config, design, gen_values)?;
    if let Some(size) = config.extend_size {
        net.extend_size(size, size)?;
    }
    info!(
        "built {} net: dimension {}, {} points",
        C::NAME,
        net.dimension(),
        net.num_points()
    );

    let mut out = net.format(config.output_format);
    if let Some(combiner) = &config.combiner {
        out.push_str(&merit_report(&net, config, combiner)?);
    }
    if config.points {
        out.push_str(&points_report(&net)?);
    }
    if let Some(path) = &config.save {
        save_net(&net, config, path)?;
    }
    Ok(out)
}

fn merit_report(net: &dyn DigitalNet, config: &NetConfig, combiner: &str) -> Result<String, NetError> {
    let functor = Bidn::new(config.interlacing)?;
    let combiner = parse_level_combiner(config.point_set_type, combiner, net.num_columns())?;
    let mut out = format!("\n# merit {functor}, combiner {combiner}");
    for coord in 1..=net.dimension() {
        let levels = level_merits(net, coord, &functor)?;
        // A unilevel point set only has the full level.
        let selected = match config.point_set_type {
            PointSetType::Unilevel => &levels[levels.len() - 1..],
            PointSetType::Multilevel => &levels[..],
        };
        out.push_str(&format!("\n{coord}: {}", combiner.combine(selected)?));
    }
    Ok(out)
}

fn points_report(net: &dyn DigitalNet) -> Result<String, NetError> {
    let mut out = String::from("\n# points");
    for point in points(net)? {
        let row: Vec<String> = point.iter().map(f64::to_string).collect();
        out.push('\n');
        out.push_str(&row.join(" "));
    }
    Ok(out)
}

fn save_net<C: NetConstruction>(
    net: &DigitalNetConstruction<C>,
    config: &NetConfig,
    path: &Path,
) -> Result<(), NetError> {
    let provenance = RunProvenance {
        seed: config.seed,
        tool_versions: BTreeMap::from([(
            "latnet-cli".to_string(),
            env!("CARGO_PKG_VERSION").to_string(),
        )]),
        ..RunProvenance::default()
    };
    let json = to_json(net, &provenance)?;
    fs::write(path, json).map_err(|err| {
        NetError::Config(
            ErrorInfo::new("write-failed", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    info!("wrote {} net to {}", C::NAME, path.display());
    Ok(())
}
