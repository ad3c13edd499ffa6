//! Walks through the reference workload: a memoized `sum_of_numbers` with
//! two result slots, then memoized matrix multiplication.
//!
//! Run with `RUST_LOG=memokit=debug` to see hits, misses and evictions.
//!
//! ```text
//! cargo run --example sum_of_numbers -- 3
//! ```

use std::cell::Cell;
use std::env;

use memokit::prelude::*;
use tracing_subscriber::EnvFilter;

type Matrix = Vec<Vec<i64>>;

fn multiply(a: &Matrix, b: &Matrix) -> Matrix {
    let size = a.len();
    let mut result = vec![vec![0; size]; size];
    for i in 0..size {
        for j in 0..size {
            for k in 0..size {
                result[i][j] += a[i][k] * b[k][j];
            }
        }
    }
    result
}

fn filled(size: usize, seed: i64) -> Matrix {
    (0..size)
        .map(|i| (0..size).map(|j| seed + (i * size + j) as i64).collect())
        .collect()
}

fn print_matrix(m: &Matrix) {
    for row in m {
        let line: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        println!("{}", line.join(" "));
    }
    println!();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let size: usize = match env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => 2,
    };

    let mut sum_of_numbers = memoize(2, |(x, y): (i64, i64)| {
        println!("Executing a function with arguments {x}, {y}");
        x + y
    })?;

    println!("{}", sum_of_numbers.call((1, 2))); // computed
    println!("{}", sum_of_numbers.call((1, 2))); // cached
    println!("{}", sum_of_numbers.call((2, 3))); // computed
    println!("{}", sum_of_numbers.call((3, 4))); // computed, (1, 2) evicted
    println!("{}", sum_of_numbers.call((1, 2))); // computed again

    let keys: Vec<String> = sum_of_numbers.cache().keys().map(|k| k.to_string()).collect();
    println!("cached keys: {}", keys.join(", "));
    println!();

    let multiplications = Cell::new(0);
    let mut multiply_matrix = MemoBuilder::new(2).prealloc(true).try_build(
        |(a, b): (Matrix, Matrix)| {
            multiplications.set(multiplications.get() + 1);
            println!("Matrix multiplication number {}", multiplications.get());
            multiply(&a, &b)
        },
    )?;

    let m1 = filled(size, 1);
    let m2 = filled(size, 10);

    print_matrix(&multiply_matrix.call((m1.clone(), m2.clone()))); // computed
    print_matrix(&multiply_matrix.call((m2.clone(), m1.clone()))); // computed
    print_matrix(&multiply_matrix.call((m2.clone(), m1.clone()))); // cached
    print_matrix(&multiply_matrix.call((m1.clone(), m1.clone()))); // computed, first evicted
    print_matrix(&multiply_matrix.call((m1, m2))); // computed again

    #[cfg(feature = "metrics")]
    {
        let snap = multiply_matrix.cache().metrics_snapshot();
        println!(
            "matrix cache: {} hits, {} misses, {} evictions",
            snap.get_hits, snap.get_misses, snap.evicted_entries
        );
    }

    Ok(())
}
