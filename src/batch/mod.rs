//! Batch letterboxing of dataset splits.
//!
//! For every labelled image in a split the image is letterboxed and its label
//! file is remapped through the same transform. Images without a label file
//! are left alone.
//!
//! With [`Config::output`] unset both files are overwritten in place. That is
//! destructive and not idempotent: a second run sees square images but still
//! reads the labels against the configured capture size, so coordinates drift.

mod report;

pub use report::{BatchReport, ItemFailure, SplitReport};

use std::fs;
use std::path::Path;

use log::{debug, error, info, warn};

use crate::annotation::{decode_lines, remap_line};
use crate::config::{Config, SplitConfig};
use crate::dataset::{self, ImageEntry};
use crate::error::BoxfitError;
use crate::geometry::Size;
use crate::letterbox::{image_size, letterbox, read_image, write_image};

/// Runs every configured split in order.
pub fn run_batch(config: &Config) -> Result<BatchReport, BoxfitError> {
    config.validate()?;

    let mut report = BatchReport::default();
    for split in &config.splits {
        report.splits.push(process_split(split, config)?);
    }

    info!("Done.");
    Ok(report)
}

/// Letterboxes every labelled image of `split`.
///
/// Per-image failures (undecodable or wrongly sized images, or a second image
/// claiming a label file another image already owns) are logged and recorded
/// in the returned report; filesystem errors abort the split.
pub fn process_split(split: &SplitConfig, config: &Config) -> Result<SplitReport, BoxfitError> {
    let (images_dir, labels_dir) = config.input_dirs(split);
    let (out_images_dir, out_labels_dir) = config.output_dirs(split);

    for dir in [&images_dir, &labels_dir, &out_images_dir, &out_labels_dir] {
        fs::create_dir_all(dir)?;
    }

    let entries = dataset::discover(&images_dir, &labels_dir, |path| config.is_image(path))?;
    let mut report = SplitReport::new(&split.name);

    for entry in entries {
        let Some(label) = entry.label.as_deref() else {
            debug!("{}: no label file, leaving image untouched", entry.image.display());
            report.skipped_unlabeled += 1;
            continue;
        };

        let out_image = out_images_dir.join(entry.file_name());
        let out_label = dataset::label_path(&out_labels_dir, &entry.stem);

        let result = match &entry.shares_label_with {
            Some(first) => Err(BoxfitError::SharedLabel {
                path: entry.image.clone(),
                label: label.to_path_buf(),
                first: first.clone(),
            }),
            None => process_pair(&entry, label, &out_image, &out_label, config),
        };

        match result {
            Ok(outcome) => {
                report.processed += 1;
                report.lines_kept += outcome.lines_kept;
                report.lines_rejected += outcome.lines_rejected;
                info!("Processed {}", entry.stem);
            }
            Err(err) if err.is_per_item() => {
                error!("Skipping {}: {}", entry.image.display(), err);
                report.failures.push(ItemFailure {
                    image: entry.image.clone(),
                    message: err.to_string(),
                });
            }
            Err(err) => return Err(err),
        }
    }

    Ok(report)
}

struct PairOutcome {
    lines_kept: usize,
    lines_rejected: usize,
}

/// Transforms one image/label pair and commits both files.
///
/// Everything that can fail per item happens before the first write, so a
/// rejected pair is never left half migrated.
fn process_pair(
    entry: &ImageEntry,
    label: &Path,
    out_image: &Path,
    out_label: &Path,
    config: &Config,
) -> Result<PairOutcome, BoxfitError> {
    if config.strict_size {
        check_original_size(&entry.image, config.original_size)?;
    }

    let image = read_image(&entry.image)?;
    let actual = image_size(&image);
    if actual != config.original_size {
        warn!(
            "{} is {}, labels are read against {}",
            entry.image.display(),
            actual,
            config.original_size
        );
    }

    let letterboxed = letterbox(&image, config.target_size, config.padding_color).map_err(
        |err| match err {
            BoxfitError::EmptyImage { .. } => BoxfitError::InvalidImage {
                path: entry.image.clone(),
                message: err.to_string(),
            },
            other => other,
        },
    )?;
    let params = letterboxed.params.with_label_frame(config.original_size);

    let content = fs::read(label).map_err(|source| BoxfitError::LabelRead {
        path: label.to_path_buf(),
        source,
    })?;
    let mut kept = Vec::new();
    let mut lines_rejected = 0;
    for (idx, line) in decode_lines(&content).enumerate() {
        let remapped = match line {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => remap_line(line, &params),
            Err(reason) => Err(reason),
        };
        match remapped {
            Ok(remapped) => kept.push(remapped),
            Err(reason) => {
                debug!("{}:{}: dropped line: {}", label.display(), idx + 1, reason);
                lines_rejected += 1;
            }
        }
    }

    write_image(out_image, &letterboxed.image)?;
    fs::write(out_label, kept.join("\n")).map_err(|source| BoxfitError::LabelWrite {
        path: out_label.to_path_buf(),
        source,
    })?;

    Ok(PairOutcome {
        lines_kept: kept.len(),
        lines_rejected,
    })
}

/// Reads the image header only and compares it against `expected`.
fn check_original_size(path: &Path, expected: Size) -> Result<(), BoxfitError> {
    let size = imagesize::size(path).map_err(|source| BoxfitError::InvalidImage {
        path: path.to_path_buf(),
        message: source.to_string(),
    })?;

    let actual = Size::new(
        u32::try_from(size.width).unwrap_or(u32::MAX),
        u32::try_from(size.height).unwrap_or(u32::MAX),
    );

    if actual != expected {
        return Err(BoxfitError::SizeMismatch {
            path: path.to_path_buf(),
            expected,
            actual,
        });
    }

    Ok(())
}
