//! Inserts random keys into a `HashTable`, removes them again in random order and plots how
//! the load factor and the chain lengths evolve across the resizes.
//!
//! Run with `RUST_LOG=bucketchain=debug` to see every rehash.
#![allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]

use std::error::Error;

use bucketchain::{ChainStats, HashTable, HashTableError, HashTableExtensions};
use env_logger::Builder;
use log::{LevelFilter, info};
use plotters::prelude::*;
use rand::{Rng, distr::Alphanumeric, seq::SliceRandom};

/// Number of random keys inserted before the removal phase
const NUM_KEYS: usize = 20_000;
/// Record one sample every this many operations
const SAMPLE_EVERY: usize = 50;
/// Shortest generated key
const MIN_KEY_LEN: usize = 4;
/// Longest generated key
const MAX_KEY_LEN: usize = 12;

/// Font used for captions and axis labels
const FONT_FAMILY: &str = "sans-serif";
/// Caption font size
const TITLE_SIZE: u32 = 35;
/// Axis description font size
const TEXT_SIZE: u32 = 16;
/// Stroke width of data series
const LINE_WIDTH: u32 = 2;

/// State of the table after one operation
#[derive(Debug, Clone, Copy)]
struct Sample {
    /// Index of the operation, inserts first then removals
    step: usize,
    /// `len / capacity` after the operation
    load_factor: f64,
    /// Chain distribution after the operation
    stats: ChainStats,
}

/// A table plus everything observed while driving it
#[derive(Debug)]
struct Simulation {
    /// The table under test, valued by the step that inserted each key
    table: HashTable<usize>,
    /// Sampled observations
    samples: Vec<Sample>,
    /// Number of operations that changed the capacity
    resizes: usize,
    /// Operations performed so far
    step: usize,
}

impl Simulation {
    /// Starts from a single bucket so every resize is exercised
    fn new() -> Self {
        Self { table: HashTable::new(1), samples: Vec::new(), resizes: 0, step: 0 }
    }

    /// Inserts `key`, overwriting the value if the generator produced a duplicate
    fn insert(&mut self, key: String) {
        let capacity = self.table.capacity();
        self.table.insert(key, self.step);
        self.observe(capacity);
    }

    /// Removes `key`, which must be present
    fn remove(&mut self, key: &str) -> Result<usize, HashTableError> {
        let capacity = self.table.capacity();
        let value = self.table.remove(key)?;
        self.observe(capacity);
        Ok(value)
    }

    /// Counts resizes and samples the table every `SAMPLE_EVERY` operations
    fn observe(&mut self, capacity_before: usize) {
        if self.table.capacity() != capacity_before {
            self.resizes += 1;
        }
        if self.step % SAMPLE_EVERY == 0 {
            self.samples.push(Sample {
                step: self.step,
                load_factor: self.table.load_factor(),
                stats: self.table.chain_stats(),
            });
        }
        self.step += 1;
    }
}

/// Generates an alphanumeric key of random length
fn random_key<R: Rng>(rng: &mut R) -> String {
    let len = rng.random_range(MIN_KEY_LEN..=MAX_KEY_LEN);
    (0..len).map(|_| char::from(rng.sample(Alphanumeric))).collect()
}

/// Plots the load factor against the two resize thresholds
fn plot_load_factor(
    samples: &[Sample],
    max_load_factor: f64,
    min_load_factor: f64,
) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new("load_factor.png", (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let last_step = samples.last().map_or(1, |sample| sample.step.max(1));

    let mut chart = ChartBuilder::on(&root)
        .caption("Load Factor Across Resizes", (FONT_FAMILY, TITLE_SIZE))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .right_y_label_area_size(10)
        .build_cartesian_2d(0..last_step, 0.0..max_load_factor * 1.1)?;

    chart
        .configure_mesh()
        .x_desc("Operations (inserts, then removals)")
        .y_desc("Load factor (entries / buckets)")
        .axis_desc_style((FONT_FAMILY, TEXT_SIZE))
        .draw()?;

    for (threshold, label) in [(max_load_factor, "Grow threshold"), (min_load_factor, "Shrink threshold")] {
        let reference_style = ShapeStyle::from(&BLACK.mix(0.3)).stroke_width(1);
        chart
            .draw_series(LineSeries::new(
                vec![(0, threshold), (last_step, threshold)],
                reference_style,
            ))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], reference_style));
    }

    let line_style = ShapeStyle::from(&RGBColor(220, 50, 50)).stroke_width(LINE_WIDTH);
    chart
        .draw_series(LineSeries::new(
            samples.iter().map(|sample| (sample.step, sample.load_factor)),
            line_style,
        ))?
        .label("Load factor")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperRight)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Plots the longest and the average chain length
fn plot_chain_lengths(samples: &[Sample]) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new("chain_length.png", (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let last_step = samples.last().map_or(1, |sample| sample.step.max(1));
    let max_chain = samples.iter().map(|sample| sample.stats.longest_chain).max().unwrap_or(0);

    let mut chart = ChartBuilder::on(&root)
        .caption("Chain Lengths Across Resizes", (FONT_FAMILY, TITLE_SIZE))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .right_y_label_area_size(10)
        .build_cartesian_2d(0..last_step, 0.0..(max_chain as f64 + 1.0))?;

    chart
        .configure_mesh()
        .x_desc("Operations (inserts, then removals)")
        .y_desc("Entries per chain")
        .axis_desc_style((FONT_FAMILY, TEXT_SIZE))
        .draw()?;

    let series: [(&str, RGBColor, fn(&Sample) -> f64); 2] = [
        ("Longest chain", RGBColor(50, 90, 220), |sample| sample.stats.longest_chain as f64),
        ("Mean non-empty chain", RGBColor(50, 180, 50), |sample| sample.stats.mean_chain_length),
    ];

    for (label, color, value) in series {
        let line_style = ShapeStyle::from(&color).stroke_width(LINE_WIDTH);
        chart
            .draw_series(LineSeries::new(
                samples.iter().map(|sample| (sample.step, value(sample))),
                line_style,
            ))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    Builder::new()
        .filter_level(LevelFilter::Info)
        .format_timestamp_millis()
        .parse_default_env()
        .try_init()?;

    let mut rng = rand::rng();
    let mut simulation = Simulation::new();

    for _ in 0..NUM_KEYS {
        simulation.insert(random_key(&mut rng));
    }

    let peak = simulation.table.chain_stats();
    info!(
        "inserted {} distinct keys into {} buckets: {} empty, longest chain {}, mean chain {:.2}",
        peak.len, peak.capacity, peak.empty_buckets, peak.longest_chain, peak.mean_chain_length
    );

    let mut keys = simulation.table.keys();
    keys.shuffle(&mut rng);
    for key in &keys {
        simulation.remove(key)?;
    }

    info!(
        "removed every key: {} resizes over {} operations, {} bucket(s) left",
        simulation.resizes,
        simulation.step,
        simulation.table.capacity()
    );

    plot_load_factor(
        &simulation.samples,
        simulation.table.max_load_factor(),
        simulation.table.min_load_factor(),
    )?;
    plot_chain_lengths(&simulation.samples)?;

    println!("Generated plot images: load_factor.png, chain_length.png");

    Ok(())
}
