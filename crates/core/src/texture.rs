//! TIFF texture lookup and on-demand PNG conversion.
//!
//! Browsers cannot display TIFF, so product textures are converted to PNG
//! next to the source file the first time they are requested. Conversion is
//! idempotent: an existing PNG is never rewritten.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::CoreError;

/// Reject anything that is not a plain file name inside the asset directory.
pub fn validate_file_name(name: &str) -> Result<(), CoreError> {
    if name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0')
    {
        return Err(CoreError::Validation(format!("invalid file name '{name}'")));
    }
    Ok(())
}

/// PNG name derived from a TIFF name: `a.tif` and `a.TIFF` become `a.png`.
/// Names without a TIFF extension get `.png` appended.
pub fn png_name_for(tif_name: &str) -> String {
    let lower = tif_name.to_ascii_lowercase();
    for ext in [".tiff", ".tif"] {
        if lower.ends_with(ext) {
            return format!("{}.png", &tif_name[..tif_name.len() - ext.len()]);
        }
    }
    format!("{tif_name}.png")
}

/// Existence report for a TIFF/PNG pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextureInfo {
    pub tif_exists: bool,
    pub png_exists: bool,
    pub tif_path: String,
    pub png_path: String,
    pub tif_url: String,
    pub png_url: String,
    pub can_convert: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionStatus {
    AlreadyExists,
    Converted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOutcome {
    pub status: ConversionStatus,
    pub png_url: String,
    pub filename: String,
}

/// Texture files stored in one directory and served under one URL prefix.
#[derive(Debug, Clone)]
pub struct TextureStore {
    dir: PathBuf,
    url_prefix: String,
}

impl TextureStore {
    /// `url_prefix` is the public path of `dir`, e.g. `/Ogrodzenie`.
    pub fn new(dir: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        let url_prefix = url_prefix.into().trim_end_matches('/').to_string();
        Self {
            dir: dir.into(),
            url_prefix,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn url_for(&self, file_name: &str) -> String {
        format!("{}/{file_name}", self.url_prefix)
    }

    pub fn info(&self, tif_name: &str) -> Result<TextureInfo, CoreError> {
        validate_file_name(tif_name)?;
        let png_name = png_name_for(tif_name);
        let tif_path = self.dir.join(tif_name);
        let png_path = self.dir.join(&png_name);
        let tif_exists = tif_path.is_file();
        let png_exists = png_path.is_file();

        Ok(TextureInfo {
            tif_exists,
            png_exists,
            tif_path: tif_path.to_string_lossy().into_owned(),
            png_path: png_path.to_string_lossy().into_owned(),
            tif_url: self.url_for(tif_name),
            png_url: self.url_for(&png_name),
            can_convert: tif_exists && !png_exists,
        })
    }

    /// Convert `tif_name` to PNG unless the PNG is already there.
    ///
    /// Blocking: decodes and encodes the whole image in memory.
    pub fn convert_to_png(&self, tif_name: &str) -> Result<ConversionOutcome, CoreError> {
        validate_file_name(tif_name)?;
        let tif_path = self.dir.join(tif_name);
        if !tif_path.is_file() {
            return Err(CoreError::NotFound {
                entity: "TIF file",
                id: tif_name.to_string(),
            });
        }

        let png_name = png_name_for(tif_name);
        let png_path = self.dir.join(&png_name);
        let status = if png_path.is_file() {
            ConversionStatus::AlreadyExists
        } else {
            let img = image::open(&tif_path)
                .map_err(|e| CoreError::Internal(format!("failed to decode {tif_name}: {e}")))?;
            img.save_with_format(&png_path, image::ImageFormat::Png)
                .map_err(|e| CoreError::Internal(format!("failed to write {png_name}: {e}")))?;
            ConversionStatus::Converted
        };

        Ok(ConversionOutcome {
            status,
            png_url: self.url_for(&png_name),
            filename: png_name,
        })
    }
}
