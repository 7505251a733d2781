//! Application related stuff

use crate::pbrt::{Float, Int};
use clap::Parser;
use std::sync::OnceLock;

/// The global application options.
static OPTIONS: OnceLock<Options> = OnceLock::new();

/// System wide options.
#[derive(Parser, Clone, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Options {
    /// Number of threads to use for sample generation.
    #[arg(
        long = "nthreads",
        short = 't',
        value_name = "NUM",
        default_value_t = 1,
        help = "Use specified number of threads for sample generation."
    )]
    n_threads: usize,

    /// Automatically reduce a number of quality settings to render more quickly.
    #[arg(
        long = "quick",
        help = "Automatically reduce a number of quality settings to render more quickly."
    )]
    pub quick_render: bool,

    /// Suppress all text output other than error messages.
    #[arg(long, help = "Suppress all text output other than error messages.")]
    pub quiet: bool,

    /// Path to the output file.
    #[arg(
        long = "outfile",
        short = 'o',
        value_name = "FILE",
        help = "Write the generated samples to the given filename."
    )]
    pub sample_file: Option<String>,

    /// The crop window x0, x1, y0, y1.
    #[arg(
        long = "cropwindow",
        short = 'c',
        value_name = "FLOAT",
        num_args = 4,
        allow_hyphen_values = true,
        help = "Specify an image crop window (x0 x1 y0 y1)."
    )]
    pub crop_window: Vec<Float>,

    /// Image resolution in pixels.
    #[arg(
        long = "resolution",
        short = 'r',
        value_name = "NUM",
        num_args = 2,
        default_values_t = [16, 16],
        help = "Image resolution in pixels (width height)."
    )]
    pub resolution: Vec<Int>,

    /// Tile size.
    #[arg(
        long = "tilesize",
        short = 'p',
        value_name = "NUM",
        default_value_t = 16,
        help = "Size in pixels of square tiles processed per thread."
    )]
    pub tile_size: usize,

    /// Number of samples in horizontal direction.
    #[arg(
        long = "xsamples",
        value_name = "NUM",
        default_value_t = 4,
        help = "Number of pixel samples in the x-direction."
    )]
    pub x_samples: Int,

    /// Number of samples in vertical direction.
    #[arg(
        long = "ysamples",
        value_name = "NUM",
        default_value_t = 4,
        help = "Number of pixel samples in the y-direction."
    )]
    pub y_samples: Int,

    /// Number of pre-generated 1D and 2D dimensions.
    #[arg(
        long = "dimensions",
        value_name = "NUM",
        default_value_t = 4,
        help = "Number of sampled dimensions generated per pixel."
    )]
    pub dimensions: Int,

    /// Disable jittering of 1D samples.
    #[arg(long = "nojitter", help = "Place 1D samples at their stratum centers.")]
    pub no_jitter: bool,
}

impl Options {
    /// Returns the number of threads to use.
    pub fn threads(&self) -> usize {
        let max_threads = num_cpus::get();
        match self.n_threads {
            0 => {
                warn!("Invalid nthreads");
                1
            }
            n if n > max_threads => {
                warn!("Num threads > max logical CPUs {}", max_threads);
                max_threads
            }
            n => n,
        }
    }
}

impl Default for Options {
    /// Returns the options used when no command line was given.
    fn default() -> Self {
        Self::parse_from([env!("CARGO_PKG_NAME")])
    }
}

/// Install the options parsed from the command line. Returns the options in
/// effect, which are the previously installed ones if called more than once.
///
/// * `options` - The options.
pub fn init_options(options: Options) -> &'static Options {
    OPTIONS.get_or_init(|| options)
}

/// Returns the global application options. Defaults are used until
/// `init_options()` is called.
pub fn options() -> &'static Options {
    OPTIONS.get_or_init(Options::default)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
