/*!
 * Configuration Intake
 *
 * A small options struct fed from two sources, flags first:
 * - command-line flags of the form `--name=value`
 * - environment variables named after the flag, uppercased
 *   (`--data_shift` -> `DATA_SHIFT`)
 *
 * A value that fails to parse (bad integer, overflow, unknown enum tag)
 * keeps the default, emits a diagnostic on stderr, and is otherwise
 * ignored. Only a flag whose *name* is unrecognized is an error the
 * caller must handle; the demo binary exits 1 on it.
 */

use std::env;
use std::num::IntErrorKind;
use std::thread;

use crate::core::errors::ConfigError;
use crate::sort::SortMode;
use crate::sync::{BarrierKind, WaitPolicy};

/// Runtime options for the demo harness and benchmarks
#[derive(Debug, Clone)]
pub struct SortConfig {
    /// Input length is `2^data_shift` elements
    pub data_shift: u32,
    /// Segment length in elements (power of two)
    pub segment_size: usize,
    /// Worker count
    pub num_threads: usize,
    /// Spin behavior at every wait site
    pub wait_policy: WaitPolicy,
    /// Coordination strategy
    pub sort_mode: SortMode,
    /// Barrier flavor for the barrier-based modes
    pub barrier_variant: BarrierKind,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            data_shift: 20,
            segment_size: 1024,
            num_threads: thread::available_parallelism().map_or(1, |n| n.get()),
            wait_policy: WaitPolicy::default(),
            sort_mode: SortMode::default(),
            barrier_variant: BarrierKind::default(),
        }
    }
}

impl SortConfig {
    /// Defaults overridden by whatever environment variables are set
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.data_shift = int_from_env("data_shift", config.data_shift);
        config.segment_size = int_from_env("segment_size", config.segment_size);
        config.num_threads = int_from_env("num_threads", config.num_threads);
        config.wait_policy = tag_from_env(
            "wait_policy",
            config.wait_policy,
            WaitPolicy::parse,
            "burn, yield, pause",
        );
        config.sort_mode = tag_from_env(
            "sort_mode",
            config.sort_mode,
            SortMode::parse,
            "sequential, forkjoin, barrier, lockfree, stealing, waitfree",
        );
        config.barrier_variant = tag_from_env(
            "barrier_variant",
            config.barrier_variant,
            BarrierKind::parse,
            "sense, step",
        );
        config
    }

    /// Apply one `--name=value` argument.
    ///
    /// A recognized flag with an unparsable value keeps the current value
    /// and reports `Ok` (the diagnostic already went to stderr); an
    /// unrecognized flag name is returned as an error.
    pub fn apply_flag(&mut self, arg: &str) -> Result<(), ConfigError> {
        if let Some(value) = flag_value(arg, "data_shift") {
            apply_int(&mut self.data_shift, "data_shift", value);
        } else if let Some(value) = flag_value(arg, "segment_size") {
            apply_int(&mut self.segment_size, "segment_size", value);
        } else if let Some(value) = flag_value(arg, "num_threads") {
            apply_int(&mut self.num_threads, "num_threads", value);
        } else if let Some(value) = flag_value(arg, "wait_policy") {
            apply_tag(
                &mut self.wait_policy,
                "wait_policy",
                value,
                WaitPolicy::parse,
                "burn, yield, pause",
            );
        } else if let Some(value) = flag_value(arg, "sort_mode") {
            apply_tag(
                &mut self.sort_mode,
                "sort_mode",
                value,
                SortMode::parse,
                "sequential, forkjoin, barrier, lockfree, stealing, waitfree",
            );
        } else if let Some(value) = flag_value(arg, "barrier_variant") {
            apply_tag(
                &mut self.barrier_variant,
                "barrier_variant",
                value,
                BarrierKind::parse,
                "sense, step",
            );
        } else {
            return Err(ConfigError::UnrecognizedArgument(arg.to_string()));
        }
        Ok(())
    }
}

/// `"--flag=value"` -> `Some("value")` when the name matches
fn flag_value<'a>(arg: &'a str, flag: &str) -> Option<&'a str> {
    arg.strip_prefix("--")?
        .strip_prefix(flag)?
        .strip_prefix('=')
}

/// Parse a decimal integer, distinguishing overflow from plain garbage
fn parse_int<I>(what: &str, raw: &str) -> Result<I, ConfigError>
where
    I: std::str::FromStr<Err = std::num::ParseIntError>,
{
    raw.trim().parse::<I>().map_err(|err| match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => ConfigError::IntOverflow {
            what: what.to_string(),
            value: raw.to_string(),
        },
        _ => ConfigError::InvalidInt {
            what: what.to_string(),
            value: raw.to_string(),
        },
    })
}

fn apply_int<I>(slot: &mut I, flag: &str, raw: &str)
where
    I: std::str::FromStr<Err = std::num::ParseIntError>,
{
    match parse_int(&format!("Value of flag --{flag}"), raw) {
        Ok(value) => *slot = value,
        Err(err) => eprintln!("{err}"),
    }
}

fn apply_tag<V: Copy>(
    slot: &mut V,
    flag: &str,
    raw: &str,
    parse: fn(&str) -> Option<V>,
    expected: &'static str,
) {
    match parse(raw) {
        Some(value) => *slot = value,
        None => eprintln!(
            "{}",
            ConfigError::UnknownVariant {
                what: format!("Value of flag --{flag}"),
                value: raw.to_string(),
                expected,
            }
        ),
    }
}

/// Integer from the environment variable matching `flag` (uppercased);
/// missing or unparsable values fall back to `default`.
fn int_from_env<I>(flag: &str, default: I) -> I
where
    I: std::str::FromStr<Err = std::num::ParseIntError>,
{
    let var = flag.to_uppercase();
    match env::var(&var) {
        Ok(raw) => match parse_int(&format!("Env variable {var}"), &raw) {
            Ok(value) => value,
            Err(err) => {
                eprintln!("{err}");
                default
            }
        },
        Err(_) => default,
    }
}

fn tag_from_env<V: Copy>(
    flag: &str,
    default: V,
    parse: fn(&str) -> Option<V>,
    expected: &'static str,
) -> V {
    let var = flag.to_uppercase();
    match env::var(&var) {
        Ok(raw) => match parse(&raw) {
            Some(value) => value,
            None => {
                eprintln!(
                    "{}",
                    ConfigError::UnknownVariant {
                        what: format!("Env variable {var}"),
                        value: raw,
                        expected,
                    }
                );
                default
            }
        },
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn flag_value_splits_name_and_value() {
        assert_eq!(flag_value("--segment_size=128", "segment_size"), Some("128"));
        assert_eq!(flag_value("--segment_size", "segment_size"), None);
        assert_eq!(flag_value("-segment_size=128", "segment_size"), None);
        assert_eq!(flag_value("--segments=128", "segment_size"), None);
    }

    #[test]
    fn apply_flag_sets_recognized_values() {
        let mut config = SortConfig::default();
        config.apply_flag("--data_shift=12").unwrap();
        config.apply_flag("--num_threads=8").unwrap();
        config.apply_flag("--wait_policy=pause").unwrap();
        config.apply_flag("--sort_mode=lockfree").unwrap();
        config.apply_flag("--barrier_variant=step").unwrap();
        assert_eq!(config.data_shift, 12);
        assert_eq!(config.num_threads, 8);
        assert_eq!(config.wait_policy, WaitPolicy::Pause);
        assert_eq!(config.sort_mode, SortMode::LockFree);
        assert_eq!(config.barrier_variant, BarrierKind::Step);
    }

    #[test]
    fn apply_flag_keeps_default_on_bad_value() {
        let mut config = SortConfig::default();
        let default_segment = config.segment_size;
        config.apply_flag("--segment_size=zebra").unwrap();
        assert_eq!(config.segment_size, default_segment);
        config.apply_flag("--wait_policy=nap").unwrap();
        assert_eq!(config.wait_policy, WaitPolicy::default());
    }

    #[test]
    fn apply_flag_rejects_unknown_names() {
        let mut config = SortConfig::default();
        assert!(matches!(
            config.apply_flag("--parallelism=8"),
            Err(ConfigError::UnrecognizedArgument(_))
        ));
    }

    #[test]
    fn overflow_is_distinguished_from_garbage() {
        let overflowing = "184467440737095516160";
        assert!(matches!(
            parse_int::<usize>("Value of flag --segment_size", overflowing),
            Err(ConfigError::IntOverflow { .. })
        ));
        assert!(matches!(
            parse_int::<usize>("Value of flag --segment_size", "12q"),
            Err(ConfigError::InvalidInt { .. })
        ));
    }

    #[test]
    #[serial]
    fn env_not_set_keeps_default() {
        env::remove_var("NOT_IN_ENV");
        assert_eq!(int_from_env("not_in_env", 42_usize), 42);
    }

    #[test]
    #[serial]
    fn env_invalid_keeps_default() {
        env::set_var("SEGMENT_SIZE", "foo");
        assert_eq!(int_from_env("segment_size", 42_usize), 42);
        env::remove_var("SEGMENT_SIZE");
    }

    #[test]
    #[serial]
    fn env_valid_overrides_default() {
        env::set_var("SEGMENT_SIZE", "256");
        env::set_var("WAIT_POLICY", "burn");
        let config = SortConfig::from_env();
        assert_eq!(config.segment_size, 256);
        assert_eq!(config.wait_policy, WaitPolicy::Burn);
        env::remove_var("SEGMENT_SIZE");
        env::remove_var("WAIT_POLICY");
    }

    #[test]
    #[serial]
    fn env_overflow_keeps_default() {
        env::set_var("NUM_THREADS", "18446744073709551616"); // usize::MAX + 1
        assert_eq!(int_from_env("num_threads", 4_usize), 4);
        env::remove_var("NUM_THREADS");
    }
}
