//! Local filename derivation for downloaded images.
//!
//! The on-disk name comes from the last path segment of the image URL,
//! sanitized for Linux filesystems. When that name is already taken by a
//! file with different contents, a short digest tag is inserted before the
//! extension instead of overwriting.

/// Default filename when the URL path yields nothing usable.
const FALLBACK_FILENAME: &str = "apod.img";

/// Bytes of the digest's hex form used in collision-avoiding names.
const DIGEST_TAG_LEN: usize = 8;

/// Extracts the last non-empty path segment from a URL.
///
/// Returns `None` if the URL cannot be parsed or the path is empty/root.
pub fn filename_from_url(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed.path().split('/').filter(|s| !s.is_empty()).last()?;
    if segment == "." || segment == ".." {
        return None;
    }
    Some(segment.to_string())
}

/// Sanitizes a candidate filename: `/`, `\`, NUL, control characters and
/// whitespace become `_` (runs collapsed), leading/trailing dots and
/// underscores are trimmed, and the result is capped at 255 bytes.
pub fn sanitize_filename(name: &str) -> String {
    const NAME_MAX: usize = 255;

    let mut out = String::with_capacity(name.len());
    let mut prev_underscore = false;
    for c in name.chars() {
        let keep = !(c == '\0' || c == '/' || c == '\\' || c.is_control() || c.is_whitespace());
        if keep {
            out.push(c);
            prev_underscore = false;
        } else if !prev_underscore {
            out.push('_');
            prev_underscore = true;
        }
    }

    let trimmed = out.trim_matches(|c| c == '.' || c == '_');
    if trimmed.len() <= NAME_MAX {
        return trimmed.to_string();
    }
    let mut take = NAME_MAX;
    while take > 0 && !trimmed.is_char_boundary(take) {
        take -= 1;
    }
    trimmed[..take].to_string()
}

/// Derives a safe local filename for the image at `url`.
pub fn derive_filename(url: &str) -> String {
    let raw = match filename_from_url(url) {
        Some(r) => r,
        None => return FALLBACK_FILENAME.to_string(),
    };
    let sanitized = sanitize_filename(&raw);
    if sanitized.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        sanitized
    }
}

/// Alternative name used when `name` is already taken by different bytes:
/// `sample.jpg` + digest `2cf24dba...` becomes `sample-2cf24dba.jpg`.
pub fn digest_suffixed(name: &str, digest: &str) -> String {
    let tag: String = digest.chars().take(DIGEST_TAG_LEN).collect();
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem}-{tag}.{ext}"),
        _ => format!("{name}-{tag}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_filename_from_url_path() {
        assert_eq!(
            derive_filename("https://example.com/img/sample.jpg"),
            "sample.jpg"
        );
        assert_eq!(
            derive_filename("https://apod.nasa.gov/apod/image/2201/moon.png"),
            "moon.png"
        );
    }

    #[test]
    fn derive_filename_ignores_query() {
        assert_eq!(
            derive_filename("https://example.com/sample.jpg?token=abc"),
            "sample.jpg"
        );
    }

    #[test]
    fn derive_filename_fallback_on_root_or_garbage() {
        assert_eq!(derive_filename("https://example.com/"), FALLBACK_FILENAME);
        assert_eq!(derive_filename("https://example.com"), FALLBACK_FILENAME);
        assert_eq!(derive_filename("not a url"), FALLBACK_FILENAME);
        assert_eq!(derive_filename("https://example.com/.."), FALLBACK_FILENAME);
    }

    #[test]
    fn sanitize_replaces_and_collapses() {
        assert_eq!(sanitize_filename("a/b\\c.jpg"), "a_b_c.jpg");
        assert_eq!(sanitize_filename("a  b\tc.jpg"), "a_b_c.jpg");
        assert_eq!(sanitize_filename("..hidden.jpg.."), "hidden.jpg");
    }

    #[test]
    fn sanitize_caps_length() {
        let long = "x".repeat(400) + ".jpg";
        assert_eq!(sanitize_filename(&long).len(), 255);
    }

    #[test]
    fn digest_suffix_goes_before_extension() {
        assert_eq!(
            digest_suffixed("sample.jpg", "2cf24dba5fb0a30e"),
            "sample-2cf24dba.jpg"
        );
        assert_eq!(digest_suffixed("noext", "2cf24dba5fb0a30e"), "noext-2cf24dba");
        assert_eq!(
            digest_suffixed("archive.tar.gz", "2cf24dba5fb0a30e"),
            "archive.tar-2cf24dba.gz"
        );
    }
}
