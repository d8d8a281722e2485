/*!
 * Lockstep Demo Harness
 *
 * Sorts a seeded random permutation of `2^data_shift` elements with the
 * configured coordination mode and reports wall time. Configuration comes
 * from the environment first, then `--name=value` flags.
 */

use std::process::ExitCode;
use std::time::Instant;

use log::{error, info};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use lockstep::sort::blocking;
use lockstep::{sort, BarrierKind, SortConfig, SortMode};

const USAGE: &str = "usage: lockstep [--data_shift=N] [--segment_size=N] [--num_threads=N] \
                     [--wait_policy=burn|yield|pause] \
                     [--sort_mode=sequential|forkjoin|barrier|lockfree|stealing|waitfree] \
                     [--barrier_variant=sense|step]";

const SHUFFLE_SEED: u64 = 0x5eed_1005;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config = SortConfig::from_env();
    for arg in std::env::args().skip(1) {
        if let Err(err) = config.apply_flag(&arg) {
            eprintln!("{err}");
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    }

    let len = 1_usize << config.data_shift;
    info!(
        "sorting 2^{} = {} elements: mode={} segment_size={} num_threads={} policy={} barrier={}",
        config.data_shift,
        len,
        config.sort_mode,
        config.segment_size,
        config.num_threads,
        config.wait_policy,
        config.barrier_variant
    );

    let mut data: Vec<u64> = (0..len as u64).collect();
    data.shuffle(&mut ChaCha8Rng::seed_from_u64(SHUFFLE_SEED));

    let start = Instant::now();
    if config.sort_mode == SortMode::Barrier && config.barrier_variant != BarrierKind::Sense {
        blocking::sort_with(
            config.barrier_variant,
            &mut data,
            config.num_threads,
            config.segment_size,
            config.wait_policy,
        );
    } else {
        sort(
            &mut data,
            config.sort_mode,
            config.num_threads,
            config.segment_size,
            config.wait_policy,
        );
    }
    let elapsed = start.elapsed();

    if data.windows(2).any(|w| w[0] > w[1]) {
        error!("output is not sorted");
        return ExitCode::FAILURE;
    }
    info!(
        "sorted {} elements in {:.3} ms",
        len,
        elapsed.as_secs_f64() * 1e3
    );
    ExitCode::SUCCESS
}
