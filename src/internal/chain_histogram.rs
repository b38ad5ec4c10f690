#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::print_stdout)]

use std::{num::NonZeroUsize, path::PathBuf};

use clap::{Parser, ValueEnum};
use plotters::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};
use sepchain::{hashing::modulo_index, ChainedHashTable, TableConfig};

/// Compares chain lengths of the mixing hash against plain modulo placement
#[derive(Debug, Parser)]
#[command(name = "chain_histogram", version)]
struct Args {
    /// Number of buckets (rounded up to a prime)
    #[arg(long, default_value_t = 10_000)]
    capacity: usize,

    /// Number of keys to place
    #[arg(long, default_value_t = 20_000)]
    keys: usize,

    /// How keys are generated
    #[arg(long, value_enum, default_value_t = KeyPattern::Strided)]
    pattern: KeyPattern,

    /// Distance between consecutive keys for the strided pattern
    #[arg(long, default_value_t = 64)]
    stride: i32,

    /// Seed for the random pattern
    #[arg(long, default_value_t = 2)]
    seed: u64,

    /// Where to write the plot
    #[arg(long, default_value = "chain_lengths.png")]
    output: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum KeyPattern {
    /// Uniform non-negative random keys
    Random,
    /// 0, 1, 2, ...
    Sequential,
    /// 0, stride, 2 * stride, ...
    Strided,
}

fn generate_keys(args: &Args) -> Vec<i32> {
    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut key: i32 = 0;
    (0..args.keys)
        .map(|_| match args.pattern {
            KeyPattern::Random => rng.random_range(0..=i32::MAX),
            KeyPattern::Sequential | KeyPattern::Strided => {
                let current = key;
                let step = if args.pattern == KeyPattern::Strided { args.stride } else { 1 };
                key = key.wrapping_add(step);
                current
            }
        })
        .collect()
}

/// `histogram[n]` is the number of buckets whose chain holds `n` entries
fn histogram(lengths: impl Iterator<Item = usize>) -> Vec<usize> {
    let mut counts = Vec::new();
    for length in lengths {
        if counts.len() <= length {
            counts.resize(length + 1, 0);
        }
        if let Some(slot) = counts.get_mut(length) {
            *slot += 1;
        }
    }
    counts
}

fn summarize(name: &str, histogram: &[usize]) {
    let empty = histogram.first().copied().unwrap_or(0);
    let longest = histogram.len().saturating_sub(1);
    println!("  {name}: empty buckets = {empty}, longest chain = {longest}");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    // Never grow: both placements are compared at the same bucket count.
    let config = TableConfig::new(args.capacity).load_factor_threshold(f64::MAX);
    let mut table = ChainedHashTable::with_config(config)?;
    let capacity = NonZeroUsize::new(table.capacity()).ok_or("table has no buckets")?;

    let keys = generate_keys(&args);
    let mut modulo_lengths = vec![0usize; capacity.get()];
    for &key in &keys {
        table.put(key, key)?;
    }
    let mut distinct = keys;
    distinct.sort_unstable();
    distinct.dedup();
    for &key in &distinct {
        if let Some(slot) = modulo_lengths.get_mut(modulo_index(key, capacity)) {
            *slot += 1;
        }
    }

    let mixed = histogram(table.chain_lengths());
    let modulo = histogram(modulo_lengths.into_iter());

    println!(
        "Placed {} distinct keys ({:?}) into {} buckets, load factor {:.2}",
        table.len(),
        args.pattern,
        capacity,
        table.load_factor()
    );
    summarize("Mixed hash", &mixed);
    summarize("Plain modulo", &modulo);

    let font_family = "sans-serif";
    let series = [
        ("Mixed hash", &mixed, RGBColor(50, 90, 220)),
        ("Plain modulo", &modulo, RGBColor(220, 50, 50)),
    ];

    let root = BitMapBackend::new(&args.output, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_length = mixed.len().max(modulo.len()).max(2);
    let max_buckets = mixed.iter().chain(modulo.iter()).copied().max().unwrap_or(1) as f64 * 1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption("Chain Length Distribution", (font_family, 35))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(0..(max_length - 1), 0.0..max_buckets)?;

    chart
        .configure_mesh()
        .x_desc("Chain Length")
        .y_desc("Number of Buckets")
        .axis_desc_style((font_family, 16))
        .draw()?;

    for (name, counts, color) in series {
        let line_style = ShapeStyle::from(&color).stroke_width(2);
        chart
            .draw_series(LineSeries::new(
                counts.iter().enumerate().map(|(length, &buckets)| (length, buckets as f64)),
                line_style,
            ))?
            .label(name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        chart.draw_series(
            counts
                .iter()
                .enumerate()
                .map(|(length, &buckets)| Circle::new((length, buckets as f64), 4, color.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperRight)
        .draw()?;

    root.present()?;
    println!("Generated plot image: {}", args.output.display());

    Ok(())
}
