//! Image inspection: detect, decode and report.

use std::path::Path;

use imgload::{DecodedImage, ImageLoader};
use serde::Serialize;

use crate::Args;
use crate::batch;

/// Run the inspection over every expanded input.
///
/// A file that fails to load is reported and does not stop the batch.
pub fn run(args: Args) -> anyhow::Result<()> {
    let files = batch::expand_inputs(&args.files)?;

    if files.is_empty() {
        anyhow::bail!("no image files found");
    }

    let loader = ImageLoader::new().with_read_ahead(args.read_ahead);
    log::debug!("probing with {:?}", loader.registry());

    let multi = files.len() > 1;
    let mut failed = 0usize;

    for (i, path) in files.iter().enumerate() {
        if multi && !args.json {
            if i > 0 {
                println!();
            }
            println!("{}:", path.display());
        }

        match inspect_file(&loader, path) {
            Ok(info) => {
                if args.json {
                    println!("{}", serde_json::to_string_pretty(&info)?);
                } else {
                    print_info(&info);
                }
            }
            Err(e) => {
                failed += 1;
                eprintln!("  error: {e}");
            }
        }
    }

    if multi && !args.json {
        println!();
        println!("{} loaded, {} failed", files.len() - failed, failed);
    }

    Ok(())
}

/// Load a single file and return structured info.
fn inspect_file(loader: &ImageLoader, path: &Path) -> anyhow::Result<ImageInfoDisplay> {
    let file_size = std::fs::metadata(path)?.len();
    let image = loader.try_load_from_path(path)?;
    Ok(ImageInfoDisplay::new(path, &image, file_size))
}

#[derive(Debug, Serialize)]
struct ImageInfoDisplay {
    path: String,
    format: Option<String>,
    mime_type: Option<String>,
    width: u32,
    height: u32,
    has_alpha: bool,
    has_animation: bool,
    frame_count: Option<u32>,
    file_size: u64,
}

impl ImageInfoDisplay {
    fn new(path: &Path, image: &DecodedImage, file_size: u64) -> Self {
        let info = &image.info;
        Self {
            path: path.display().to_string(),
            format: info.format.map(|f| f.to_string()),
            mime_type: info.format.map(|f| f.mime_type().to_string()),
            width: image.width(),
            height: image.height(),
            has_alpha: info.has_alpha,
            has_animation: info.has_animation,
            frame_count: info.frame_count,
            file_size,
        }
    }
}

fn print_info(info: &ImageInfoDisplay) {
    match (&info.format, &info.mime_type) {
        (Some(format), Some(mime)) => println!("  Format:       {} ({})", format, mime),
        _ => println!("  Format:       custom"),
    }
    println!("  Dimensions:   {}x{}", info.width, info.height);
    println!(
        "  Alpha:        {}",
        if info.has_alpha { "yes" } else { "no" }
    );
    if info.has_animation {
        print!("  Animation:    yes");
        if let Some(count) = info.frame_count {
            print!(" ({} frames)", count);
        }
        println!();
    }
    println!("  File size:    {}", batch::format_size(info.file_size));
}
