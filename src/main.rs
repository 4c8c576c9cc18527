//! svg-scribe CLI
//!
//! Renders a pie chart from a list of numeric values.
//!
//! Usage:
//!   svg-scribe [OPTIONS] [FILE]
//!
//! Values are comma or whitespace separated and read from FILE or stdin:
//!   echo '3, 5, 2' | svg-scribe -o chart.svg

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use clap::Parser;

use svg_scribe::{Attrs, BuildError, StyleSheet, SvgBuilder};

#[derive(Parser)]
#[command(name = "svg-scribe")]
#[command(about = "Render a pie chart as an SVG document")]
struct Cli {
    /// Input file with comma or whitespace separated values (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Output SVG file
    #[arg(short, long, default_value = "chart.svg")]
    output: PathBuf,

    /// Width and height of the square canvas
    #[arg(short, long, default_value_t = 400)]
    size: u32,

    /// Stylesheet file with attribute presets (TOML format)
    #[arg(long)]
    stylesheet: Option<PathBuf>,
}

const PALETTE: [&str; 6] = [
    "#2196f3", "#ff9800", "#4caf50", "#f44336", "#9c27b0", "#607d8b",
];

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    // Load stylesheet
    let stylesheet = match &cli.stylesheet {
        Some(path) => match StyleSheet::from_file(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error loading stylesheet '{}': {}", path.display(), e);
                process::exit(1);
            }
        },
        None => StyleSheet::default(),
    };

    // Read input
    let source = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer,
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    process::exit(1);
                }
            }
        }
    };

    let values = match parse_values(&source) {
        Ok(values) => values,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = render_chart(&values, &cli, &stylesheet) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn parse_values(source: &str) -> Result<Vec<f64>, String> {
    let values: Vec<f64> = source
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(str::parse)
        .collect::<Result<_, _>>()
        .map_err(|e| format!("invalid value in input: {e}"))?;
    if values.is_empty() {
        return Err("no values to chart".to_string());
    }
    if values.iter().any(|v| *v < 0.0) || values.iter().sum::<f64>() <= 0.0 {
        return Err("values must be non-negative with a positive sum".to_string());
    }
    Ok(values)
}

fn render_chart(values: &[f64], cli: &Cli, stylesheet: &StyleSheet) -> Result<(), BuildError> {
    let total: f64 = values.iter().sum();
    let size = f64::from(cli.size);
    let (cx, cy) = (size / 2.0, size / 2.0);
    let r = size * 0.4;

    let slice_style = stylesheet.attrs("slice").unwrap_or_else(|| {
        Attrs::new().set("stroke", "#ffffff").set("stroke_width", 2)
    });
    let label_style = stylesheet.attrs("label").unwrap_or_else(|| {
        Attrs::new()
            .set("font_family", "sans-serif")
            .set("font_size", 12)
    });

    let mut svg = SvgBuilder::with_size(cli.size, cli.size);
    {
        let mut chart = svg.g(Attrs::new().set("id", "chart"));
        // Start at 12 o'clock and sweep clockwise (screen coordinates).
        let mut alpha = -std::f64::consts::FRAC_PI_2;
        for (i, value) in values.iter().enumerate() {
            let theta = value / total * std::f64::consts::TAU;
            let fill = PALETTE[i % PALETTE.len()];
            chart.circle_sector(
                cx,
                cy,
                r,
                alpha,
                theta,
                slice_style.clone().set("fill", fill),
            )?;
            alpha += theta;
        }
    }
    {
        let mut legend = svg.g(Attrs::new().set("id", "legend"));
        for (i, value) in values.iter().enumerate() {
            let y = 16.0 + 16.0 * i as f64;
            legend.rect(
                8.0,
                y - 10.0,
                12.0,
                12.0,
                Attrs::new().set("fill", PALETTE[i % PALETTE.len()]),
            )?;
            legend.text(&format!("{value}"), 26.0, y, label_style.clone())?;
        }
    }
    svg.write(&cli.output)
}
