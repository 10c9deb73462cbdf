//! sRGB encoder accuracy report.

use crate::SrgbArgs;
use anyhow::{Result, bail};
use texel_transfer::lut::{ErrorStats, fast_error_stats};
use texel_transfer::srgb::{encode_u8, encode_u8_nearest};
use texel_transfer::{TABLE_SIZE, forward_table, inverse_table};

/// Runs the srgb command.
pub fn run(args: SrgbArgs) -> Result<()> {
    if !(args.lo < args.hi) {
        bail!("Empty range: lo = {} must be below hi = {}", args.lo, args.hi);
    }
    if args.samples == 0 {
        bail!("--samples must be positive");
    }

    let stats = fast_error_stats(args.lo, args.hi, args.samples);
    let mismatches = byte_mismatches(args.lo, args.hi, args.samples);
    print_stats(&args, &stats, mismatches);

    if args.table {
        println!();
        println!("  {:>4}  {:>12}  {:>12}  {:>12}", "bin", "base", "slope", "inverse");
        for (i, (segment, inverse)) in forward_table().iter().zip(inverse_table().iter()).enumerate() {
            println!(
                "  {:>4}  {:>12.8}  {:>12.8}  {:>12.8}",
                i, segment.base, segment.slope, inverse
            );
        }
    }
    Ok(())
}

fn print_stats(args: &SrgbArgs, stats: &ErrorStats, mismatches: usize) {
    println!("Fast sRGB OETF, {} bins", TABLE_SIZE);
    println!("  Range:      [{}, {}]", args.lo, args.hi);
    println!("  Samples:    {}", args.samples + 1);
    println!("  Max error:  {:.3e} at {:.6}", stats.max, stats.worst_input);
    println!("  Mean error: {:.3e}", stats.mean);
    println!("  Byte diffs: {} (fast vs nearest encoder)", mismatches);
}

/// Inputs in `[lo, hi]` where the fast byte encoder disagrees with the
/// nearest-byte encoder.
fn byte_mismatches(lo: f64, hi: f64, samples: usize) -> usize {
    (0..=samples)
        .map(|k| (lo + (hi - lo) * k as f64 / samples as f64) as f32)
        .filter(|&x| encode_u8(x) != encode_u8_nearest(x))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(lo: f64, hi: f64, samples: usize) -> SrgbArgs {
        SrgbArgs {
            samples,
            lo,
            hi,
            table: false,
        }
    }

    #[test]
    fn test_rejects_bad_range() {
        assert!(run(args(1.0, 0.0, 10)).is_err());
        assert!(run(args(0.0, 1.0, 0)).is_err());
        assert!(run(args(f64::NAN, 1.0, 10)).is_err());
        assert!(run(args(0.0, 1.0, 10)).is_ok());
    }

    #[test]
    fn test_endpoints_agree() {
        assert_eq!(byte_mismatches(0.0, 0.0, 1), 0);
        assert_eq!(byte_mismatches(1.0, 1.0, 1), 0);
    }

    #[test]
    fn test_mismatches_are_rare() {
        let n = 10_000;
        assert!(byte_mismatches(0.0, 1.0, n) < n / 10);
    }
}
