//! Claimed-extension handling

use std::path::Path;

/// Extensions picked up by the directory scan
pub const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "bmp", "png", "gif", "tiff"];

const JPEG_EXTENSIONS: [&str; 2] = ["jpg", "jpeg"];

/// Get the claimed extension of a file
///
/// This is the final dot-separated segment of the file name, lowercased.
/// A name without any dot yields the whole name, and a trailing dot yields
/// an empty string.
pub fn claimed_extension(path: &Path) -> String {
    let name = match path.file_name() {
        Some(name) => name.to_string_lossy(),
        None => return String::new(),
    };

    name.rsplit('.').next().unwrap_or_default().to_lowercase()
}

/// Check whether a claimed extension belongs to the scanned image set
pub fn is_image_extension(extension: &str) -> bool {
    let extension = extension.to_lowercase();
    IMAGE_EXTENSIONS.contains(&extension.as_str())
}

/// Compare a claimed extension with a detected format identifier
///
/// Either side being absent is a mismatch. The comparison ignores case and
/// treats `jpg` and `jpeg` as the same format.
pub fn extensions_match(first: Option<&str>, second: Option<&str>) -> bool {
    let (first, second) = match (first, second) {
        (Some(first), Some(second)) => (first.to_lowercase(), second.to_lowercase()),
        _ => return false,
    };

    if first == second {
        return true;
    }

    JPEG_EXTENSIONS.contains(&first.as_str()) && JPEG_EXTENSIONS.contains(&second.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_claimed_extension() {
        assert_eq!(claimed_extension(Path::new("/images/photo.JPG")), "jpg");
        assert_eq!(claimed_extension(Path::new("/images/archive.tar.png")), "png");
        assert_eq!(claimed_extension(Path::new("/images.d/README")), "readme");
        assert_eq!(claimed_extension(Path::new("/images/trailing.")), "");
    }

    #[test]
    fn test_is_image_extension() {
        assert!(is_image_extension("png"));
        assert!(is_image_extension("TIFF"));
        assert!(!is_image_extension("webp"));
        assert!(!is_image_extension("txt"));
        assert!(!is_image_extension(""));
    }

    #[test]
    fn test_jpeg_aliases() {
        assert!(extensions_match(Some("JPG"), Some("jpeg")));
        assert!(extensions_match(Some("jpeg"), Some("jpg")));
        assert!(extensions_match(Some("Jpeg"), Some("JPEG")));
    }

    #[test]
    fn test_distinct_formats_do_not_match() {
        assert!(!extensions_match(Some("png"), Some("jpg")));
        assert!(!extensions_match(Some("tiff"), Some("tif")));
        assert!(!extensions_match(Some("gif"), Some("png")));
    }

    #[test]
    fn test_absent_side_never_matches() {
        assert!(!extensions_match(Some("png"), None));
        assert!(!extensions_match(None, Some("png")));
        assert!(!extensions_match(None, None));
    }

    proptest! {
        #[test]
        fn match_is_symmetric(a in "[a-zA-Z]{0,6}", b in "[a-zA-Z]{0,6}") {
            prop_assert_eq!(
                extensions_match(Some(a.as_str()), Some(b.as_str())),
                extensions_match(Some(b.as_str()), Some(a.as_str()))
            );
        }

        #[test]
        fn match_ignores_case(a in "[a-z]{1,6}") {
            let upper = a.to_uppercase();
            prop_assert!(extensions_match(Some(a.as_str()), Some(upper.as_str())));
            prop_assert!(!extensions_match(Some(a.as_str()), None));
        }
    }
}
