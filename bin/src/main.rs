#[macro_use]
extern crate log;

use clap::Parser;
use core::app::*;
use core::geometry::*;
use core::paramset::*;
use core::pbrt::*;
use core::sampler::*;
use indicatif::{ProgressBar, ProgressStyle};
use samplers::*;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::thread;

fn main() {
    // Initialize `env_logger`.
    env_logger::init();

    let options = init_options(Options::parse());

    if let Err(e) = render(options) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn render(options: &Options) -> Result<(), String> {
    let pixel_bounds = get_pixel_bounds(options)?;
    let sampler = create_sampler(options);

    // Compute number of tiles, `n_tiles`, to use for parallel sample generation.
    if options.tile_size == 0 {
        return Err("Tile size must be positive".to_string());
    }
    let tile_size = options.tile_size as Int;
    let extent = pixel_bounds.extent();
    let n_tiles = Point2::new(
        ((extent.x + tile_size - 1) / tile_size) as usize,
        ((extent.y + tile_size - 1) / tile_size) as usize,
    );
    let tile_count = n_tiles.x * n_tiles.y;

    info!(
        "Generating samples for {} in {}x{} tiles",
        pixel_bounds, n_tiles.x, n_tiles.y
    );

    let progress = create_progress_reporter(tile_count as u64, options.quiet)?;
    progress.set_message("Generating samples");

    let mut tiles = vec![String::new(); tile_count];
    let n_threads = options.threads();

    thread::scope(|scope| {
        let (tx_collector, rx_collector) = crossbeam_channel::bounded::<(usize, String)>(n_threads);
        let (tx_worker, rx_worker) = crossbeam_channel::bounded::<usize>(n_threads);

        let tiles = &mut tiles;
        let progress = &progress;
        let sampler = &sampler;

        // Spawn collector thread.
        scope.spawn(move || {
            for (tile_idx, lines) in rx_collector.iter() {
                tiles[tile_idx] = lines;
                progress.inc(1);
            }
        });

        // Spawn worker threads.
        for _ in 0..n_threads {
            let rx_worker = rx_worker.clone();
            let tx_collector = tx_collector.clone();
            scope.spawn(move || {
                for tile_idx in rx_worker.iter() {
                    let tile_x = tile_idx % n_tiles.x;
                    let tile_y = tile_idx / n_tiles.x;
                    let tile_bounds = get_tile_bounds(tile_x, tile_y, tile_size, &pixel_bounds);

                    let lines = generate_tile(sampler, tile_idx as u64, tile_bounds);
                    if tx_collector.send((tile_idx, lines)).is_err() {
                        break;
                    }
                }
            });
        }
        drop(rx_worker); // Drop extra since we've cloned one for each worker.
        drop(tx_collector);

        // Send work.
        for tile_idx in 0..tile_count {
            tx_worker
                .send(tile_idx)
                .map_err(|e| format!("Unable to schedule tile {tile_idx}: {e}"))?;
        }
        Ok::<(), String>(())
    })?;

    progress.finish_with_message("Samples generated");

    write_samples(options.sample_file.as_deref(), &tiles)
}

/// Create the sampler from the command line options.
///
/// * `options` - The options.
fn create_sampler(options: &Options) -> MultiJitterSampler {
    let mut params = ParamSet::new();
    params.add_int("xsamples", &[options.x_samples]);
    params.add_int("ysamples", &[options.y_samples]);
    params.add_int("dimensions", &[options.dimensions]);
    params.add_bool("jitter", &[!options.no_jitter]);

    let sampler = MultiJitterSampler::from(&params);
    params.report_unused();

    let (x_samples, y_samples) = sampler.pixel_samples();
    info!(
        "Using {}x{} samples per pixel, {} dimensions",
        x_samples,
        y_samples,
        sampler.samples_1d().len()
    );
    sampler
}

/// Returns the pixels to sample: the whole resolution or the crop window
/// subset of it.
///
/// * `options` - The options.
fn get_pixel_bounds(options: &Options) -> Result<Bounds2i, String> {
    let (width, height) = match options.resolution[..] {
        [w, h] if w > 0 && h > 0 => (w, h),
        _ => return Err(format!("Invalid resolution {:?}", options.resolution)),
    };

    let crop_window = match options.crop_window[..] {
        [] => Bounds2f::new(Point2f::new(0.0, 0.0), Point2f::new(1.0, 1.0)),
        [x0, x1, y0, y1] => Bounds2f::new(
            Point2f::new(clamp(x0, 0.0, 1.0), clamp(y0, 0.0, 1.0)),
            Point2f::new(clamp(x1, 0.0, 1.0), clamp(y1, 0.0, 1.0)),
        ),
        _ => return Err(format!("Invalid crop window {:?}", options.crop_window)),
    };

    let pixel_bounds = Bounds2i::new(
        Point2i::new(
            (width as Float * crop_window.p_min.x).ceil() as Int,
            (height as Float * crop_window.p_min.y).ceil() as Int,
        ),
        Point2i::new(
            (width as Float * crop_window.p_max.x).ceil() as Int,
            (height as Float * crop_window.p_max.y).ceil() as Int,
        ),
    );

    if pixel_bounds.area() <= 0 {
        Err(format!("Crop window {crop_window} selects no pixels"))
    } else {
        Ok(pixel_bounds)
    }
}

/// Returns the pixel bounds of a tile.
///
/// * `tile_x`       - Tile index in x-direction.
/// * `tile_y`       - Tile index in y-direction.
/// * `tile_size`    - Tile size in pixels.
/// * `pixel_bounds` - The pixels being sampled.
fn get_tile_bounds(tile_x: usize, tile_y: usize, tile_size: Int, pixel_bounds: &Bounds2i) -> Bounds2i {
    let x0 = pixel_bounds.p_min.x + tile_x as Int * tile_size;
    let x1 = min(x0 + tile_size, pixel_bounds.p_max.x);
    let y0 = pixel_bounds.p_min.y + tile_y as Int * tile_size;
    let y1 = min(y0 + tile_size, pixel_bounds.p_max.y);
    Bounds2i::new(Point2i::new(x0, y0), Point2i::new(x1, y1))
}

/// Generate the camera samples of every pixel in a tile, one line per sample.
///
/// * `sampler`     - The sampler to clone for the tile.
/// * `seed`        - Seed for the tile sampler.
/// * `tile_bounds` - Pixels in the tile.
fn generate_tile(sampler: &MultiJitterSampler, seed: u64, tile_bounds: Bounds2i) -> String {
    debug!("Starting tile {seed} -> {tile_bounds}");

    let mut tile_sampler = sampler.clone_sampler(seed);
    let mut lines = String::new();

    for pixel in tile_bounds {
        tile_sampler.start_pixel(&pixel);
        loop {
            let sample_num = tile_sampler.get_data().current_sample_number();
            let cs = tile_sampler.get_camera_sample(&pixel);
            lines.push_str(&format!(
                "{} {} {} {} {} {} {} {}\n",
                pixel.x, pixel.y, sample_num, cs.p_film.x, cs.p_film.y, cs.time, cs.p_lens.x, cs.p_lens.y
            ));

            if !tile_sampler.start_next_sample() {
                break;
            }
        }
    }

    lines
}

/// Write the generated samples in tile order to a file or stdout.
///
/// * `path`  - Output file; stdout if `None`.
/// * `tiles` - Sample lines of each tile.
fn write_samples(path: Option<&str>, tiles: &[String]) -> Result<(), String> {
    let mut out: Box<dyn Write> = match path {
        Some(path) => {
            let file = File::create(path).map_err(|e| format!("Unable to create '{path}': {e}"))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    for lines in tiles {
        out.write_all(lines.as_bytes())
            .map_err(|e| format!("Unable to write samples: {e}"))?;
    }
    out.flush().map_err(|e| format!("Unable to write samples: {e}"))
}

/// Create a progress bar, hidden when `quiet` is set.
///
/// * `len`   - Number of steps.
/// * `quiet` - Suppress progress output.
fn create_progress_reporter(len: u64, quiet: bool) -> Result<ProgressBar, String> {
    if quiet {
        return Ok(ProgressBar::hidden());
    }

    let style = ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}")
        .map_err(|e| format!("Invalid progress template: {e}"))?;
    Ok(ProgressBar::new(len).with_style(style))
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
