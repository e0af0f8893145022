//! Boilerplate shared by the daily binaries: reading the puzzle input,
//! setting up tracing and turning a block of text into a grid.
use std::io;
use std::io::prelude::*;

use ndarray::prelude::*;
use tracing_subscriber::prelude::*;

/// Install a fmt subscriber filtered by `RUST_LOG`, falling back to
/// `default_filter` when the variable is unset.
pub fn init_tracing(default_filter: &str) {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(io::stderr);
    let filter_layer = match tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(default_filter))
    {
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
        Ok(layer) => layer,
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}

/// Read all of standard input, with Windows line endings normalised and
/// trailing blank lines dropped.
pub fn read_input() -> String {
    let mut input = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut input) {
        fail(&format!("failed to read input: {}", e));
    }
    normalise(&input)
}

pub fn normalise(input: &str) -> String {
    input.replace("\r\n", "\n").trim_end_matches('\n').to_string()
}

/// Report a fatal input problem and exit.
pub fn fail(message: &str) -> ! {
    eprintln!("fail: {}", message);
    std::process::exit(1);
}

/// Decode a rectangular block of text into a grid indexed by `(row, col)`.
pub fn parse_grid<T, F>(input: &str, mut decode: F) -> Result<Array2<T>, String>
where
    F: FnMut(char) -> Result<T, String>,
{
    let lines: Vec<&str> = input.lines().filter(|line| !line.is_empty()).collect();
    let width = match lines.first() {
        Some(line) => line.chars().count(),
        None => {
            return Err("no data".to_string());
        }
    };
    let mut cells: Vec<T> = Vec::with_capacity(width * lines.len());
    for (row, line) in lines.iter().enumerate() {
        let mut count = 0;
        for ch in line.chars() {
            cells.push(decode(ch)?);
            count += 1;
        }
        if count != width {
            return Err(format!(
                "row {} has width {} but the first row has width {}",
                row, count, width
            ));
        }
    }
    Array2::from_shape_vec((lines.len(), width), cells).map_err(|e| e.to_string())
}

/// Render a grid one row per line, for debug logging.
pub fn render_grid<T, F>(grid: &Array2<T>, show: F) -> String
where
    F: Fn(&T) -> char,
{
    let mut result = String::with_capacity(grid.len() + grid.nrows());
    for row in grid.rows() {
        result.extend(row.iter().map(&show));
        result.push('\n');
    }
    result
}

#[test]
fn test_parse_grid() {
    let grid = parse_grid("ab\ncd\n", |ch| Ok(ch)).expect("valid grid");
    assert_eq!(grid.dim(), (2, 2));
    assert_eq!(grid[(1, 0)], 'c');
    assert_eq!(render_grid(&grid, |ch| *ch), "ab\ncd\n");
}

#[test]
fn test_parse_grid_ragged() {
    assert!(parse_grid("abc\nd", |ch| Ok(ch)).is_err());
    assert!(parse_grid("", |ch| Ok(ch)).is_err());
}

#[test]
fn test_normalise() {
    assert_eq!(normalise("a\r\nb\r\n\n"), "a\nb");
}
