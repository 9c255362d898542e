use std::env;
use std::process;
use std::time::Instant;

use chrono::Local;
use log::{error, info, LevelFilter};

use matrix_factorization::config::Config;
use matrix_factorization::factorization::update_rules::observed_squared_error;
use matrix_factorization::SgdFactorizer;

fn timestamp() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

fn main() {
    simple_logger::SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .init()
        .expect("Failed to initialize logger");

    let config = Config::new(env::args()).unwrap_or_else(|e| {
        error!("Problem parsing arguments: {}", e);
        process::exit(1);
    });

    let method = "sgd";
    let target = config.get_target();
    info!(
        "[method: {}] [{}] Target: {} ({}x{}, {} observed)",
        method,
        timestamp(),
        config.get_source(),
        target.rows(),
        target.cols(),
        target.observed_count()
    );

    let start_time = Instant::now();
    let factorizer = SgdFactorizer::with_config(config.get_factorization().clone());
    let result = factorizer.fit(target).unwrap_or_else(|e| {
        error!("Factorization failed: {}", e);
        process::exit(1);
    });
    info!(
        "[method: {}] [{}] Done in {:?}: {} iterations, loss {:.6}, converged: {}",
        method,
        timestamp(),
        start_time.elapsed(),
        result.iterations,
        result.loss,
        result.converged
    );

    let completed = result.completed_matrix().unwrap_or_else(|e| {
        error!("Could not rebuild matrix: {}", e);
        process::exit(1);
    });
    info!(
        "[method: {}] [{}] Squared error on observed cells: {:.6}",
        method,
        timestamp(),
        observed_squared_error(target, &completed)
    );

    println!("{:.3}", completed);
}
