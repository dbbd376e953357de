//! Cosmos Vanity Address Generator CLI
//!
//! Usage:
//!   cosmos_vanity -s aaaa              # Find an address starting with "aaaa"
//!   cosmos_vanity -e zz -p osmo        # Find an osmo address ending with "zz"
//!   cosmos_vanity -c k2k2k -n 5        # Find 5 addresses containing "k2k2k"
//!   cosmos_vanity -l 30 --cpus 4       # At least 30 letters, 4 threads

use std::process;
use std::time::Duration;

use clap::Parser;

use cosmos_vanity::{logging, CancellationToken, Config, SearchPlan, Wallet, WorkerPool};

/// Exit code used when the search is interrupted with Ctrl-C.
const EXIT_INTERRUPTED: i32 = 130;

fn main() {
    let config = Config::parse();

    if let Err(e) = logging::init() {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let plan = match config.validate() {
        Ok(plan) => plan,
        Err(errors) => {
            for e in errors {
                println!("ERROR: {}", e);
            }
            process::exit(1);
        }
    };

    print_banner(&plan);

    let root = CancellationToken::new();
    let interrupt = root.clone();
    if let Err(e) = ctrlc::set_handler(move || interrupt.cancel()) {
        tracing::warn!(error = %e, "could not install Ctrl-C handler");
    }

    let report_interval = match config.report_interval {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    };

    for i in 1..=plan.count {
        let pool = match WorkerPool::spawn(plan.matcher.clone(), plan.workers, &root) {
            Ok(pool) => pool,
            Err(e) => {
                eprintln!("ERROR: {}", e);
                process::exit(1);
            }
        };

        let Some(wallet) = search(&pool, report_interval) else {
            tracing::info!(found = i - 1, "stopped by user");
            process::exit(EXIT_INTERRUPTED);
        };
        tracing::info!(
            prefix = pool.matcher().prefix(),
            workers = pool.num_workers(),
            wallets = pool.total_wallets(),
            matches = pool.total_matches(),
            elapsed_secs = pool.elapsed().as_secs_f64(),
            per_second = pool.wallets_per_second() as u64,
            "search finished"
        );
        print_result(&wallet, i, plan.count);
    }
}

/// Waits for the pool's match, logging progress every `report_interval`.
fn search(pool: &WorkerPool, report_interval: Option<Duration>) -> Option<Wallet> {
    let Some(interval) = report_interval else {
        return pool.wait();
    };

    loop {
        if let Some(wallet) = pool.wait_for_result(interval) {
            return Some(wallet);
        }
        if pool.is_stopped() {
            return None;
        }
        print_progress(pool);
    }
}

fn print_banner(plan: &SearchPlan) {
    let m = &plan.matcher;
    tracing::info!(
        prefix = m.prefix(),
        starts_with = m.starts_with(),
        ends_with = m.ends_with(),
        contains = m.contains(),
        min_letters = m.min_letters(),
        min_digits = m.min_digits(),
        "matcher"
    );
    tracing::info!(
        difficulty = %m.difficulty_description(),
        workers = plan.workers,
        target = plan.count,
        "searching"
    );
}

fn print_result(wallet: &Wallet, index: usize, total: usize) {
    println!(":::: Matching wallet {}/{} found ::::", index, total);
    println!("{}", wallet);
}

fn print_progress(pool: &WorkerPool) {
    tracing::info!(
        "[{:>4}s] Generated {} wallets ({}/s)",
        pool.elapsed().as_secs(),
        format_number(pool.total_wallets()),
        format_number(pool.wallets_per_second() as u64)
    );
}

fn format_number(n: u64) -> String {
    if n >= 1_000_000_000 {
        format!("{:.2}B", n as f64 / 1_000_000_000.0)
    } else if n >= 1_000_000 {
        format!("{:.2}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.2}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}
