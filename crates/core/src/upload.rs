//! Building a fence system descriptor from an uploaded model bundle.

use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::FenceSystem;
use crate::error::CoreError;

/// Base price used when the form value is missing or not a number.
pub const DEFAULT_UPLOAD_BASE_PRICE: f64 = 150.0;

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// System id derived from its display name: lower-cased, each whitespace
/// run replaced by `-`.
pub fn system_id_from_name(name: &str) -> String {
    WHITESPACE_RUN
        .replace_all(&name.to_lowercase(), "-")
        .into_owned()
}

/// Parse the leading decimal number of `raw`, falling back to the default
/// for missing, unparsable, zero or non-finite input.
pub fn parse_base_price(raw: Option<&str>) -> f64 {
    raw.and_then(leading_number)
        .filter(|p| p.is_finite() && *p != 0.0)
        .unwrap_or(DEFAULT_UPLOAD_BASE_PRICE)
}

fn leading_number(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'+' | b'-' if end == 0 => {}
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }
    if !seen_digit {
        return None;
    }
    // Exponent counts only when at least one digit follows `e[+-]`.
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > digits_start {
            end = exp_end;
        }
    }
    s[..end].parse().ok()
}

/// Reduce a client-supplied file name to its final path component.
pub fn sanitize_upload_name(raw: &str) -> Result<String, CoreError> {
    let name = raw
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim()
        .to_string();
    if name.is_empty() || name == "." || name == ".." {
        return Err(CoreError::Validation(format!(
            "invalid upload file name '{raw}'"
        )));
    }
    Ok(name)
}

/// Files stored for an uploaded system, by their stored names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFiles {
    pub obj_file: String,
    pub mtl_file: String,
    pub texture_file: Option<String>,
}

/// Build the descriptor the client will use to load the uploaded model.
/// `url_prefix` is the public path of the upload directory.
pub fn build_uploaded_system(
    name: &str,
    base_price: Option<&str>,
    files: &UploadedFiles,
    url_prefix: &str,
) -> Result<FenceSystem, CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("system name is required".to_string()));
    }
    let prefix = url_prefix.trim_end_matches('/');
    Ok(FenceSystem {
        id: system_id_from_name(name),
        name: name.to_string(),
        obj_file: format!("{prefix}/{}", files.obj_file),
        mtl_file: format!("{prefix}/{}", files.mtl_file),
        texture_file: files
            .texture_file
            .as_ref()
            .map(|t| format!("{prefix}/{t}")),
        base_price: parse_base_price(base_price),
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn test_system_id_from_name() {
        assert_eq!(system_id_from_name("Moje Ogrodzenie"), "moje-ogrodzenie");
        assert_eq!(system_id_from_name("Slim  3D\tNowy"), "slim-3d-nowy");
        assert_eq!(system_id_from_name(" Royal "), "-royal-");
        assert_eq!(system_id_from_name("Łupane"), "łupane");
    }

    #[test]
    fn test_parse_base_price() {
        assert_eq!(parse_base_price(Some("199.5")), 199.5);
        assert_eq!(parse_base_price(Some(" 220zł")), 220.0);
        assert_eq!(parse_base_price(Some("-5")), -5.0);
        assert_eq!(parse_base_price(Some("abc")), DEFAULT_UPLOAD_BASE_PRICE);
        assert_eq!(parse_base_price(Some("0")), DEFAULT_UPLOAD_BASE_PRICE);
        assert_eq!(parse_base_price(Some("")), DEFAULT_UPLOAD_BASE_PRICE);
        assert_eq!(parse_base_price(None), DEFAULT_UPLOAD_BASE_PRICE);
    }

    #[test]
    fn test_parse_base_price_exponent() {
        assert_eq!(parse_base_price(Some("1e3")), 1000.0);
        assert_eq!(parse_base_price(Some("2.5E+2zł")), 250.0);
        assert_eq!(parse_base_price(Some("1.5e-1")), 0.15);
        assert_eq!(parse_base_price(Some("12e")), 12.0);
        assert_eq!(parse_base_price(Some("12e+x")), 12.0);
    }

    #[test]
    fn test_sanitize_upload_name() {
        assert_eq!(sanitize_upload_name("fence.obj").unwrap(), "fence.obj");
        assert_eq!(sanitize_upload_name("../../etc/passwd").unwrap(), "passwd");
        assert_eq!(sanitize_upload_name("C:\\x\\model.mtl").unwrap(), "model.mtl");
        assert!(sanitize_upload_name("dir/").is_err());
        assert!(sanitize_upload_name("..").is_err());
    }

    #[test]
    fn test_build_uploaded_system() {
        let files = UploadedFiles {
            obj_file: "a.obj".into(),
            mtl_file: "a.mtl".into(),
            texture_file: None,
        };
        let system = build_uploaded_system("Nowy System", Some("175"), &files, "/Ogrodzenie/").unwrap();
        assert_eq!(system.id, "nowy-system");
        assert_eq!(system.obj_file, "/Ogrodzenie/a.obj");
        assert_eq!(system.mtl_file, "/Ogrodzenie/a.mtl");
        assert_eq!(system.texture_file, None);
        assert_eq!(system.base_price, 175.0);
    }

    #[test]
    fn test_build_uploaded_system_requires_name() {
        let files = UploadedFiles {
            obj_file: "a.obj".into(),
            mtl_file: "a.mtl".into(),
            texture_file: Some("t.tif".into()),
        };
        assert_matches!(
            build_uploaded_system("  ", None, &files, "/Ogrodzenie"),
            Err(CoreError::Validation(_))
        );
    }
}
