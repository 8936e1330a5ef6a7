use chrono::NaiveDate;

use crate::config::ImageConfig;

/// Fixed reference meaning "no displayable image". The frontend resolves it
/// to its own placeholder asset.
pub const PLACEHOLDER: &str = "placeholder.jpg";

/// Raw values carrying these markers were written by scrapers when no photo
/// existed; they are never resolvable.
const UNAVAILABLE_MARKERS: &[&str] = &["imagen_no_disponible", "image_not_available"];

const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".webp"];

/// How resolved references are handed to callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolveMode {
    /// Full object-storage URLs, fetched cross-origin by the frontend.
    FullUrl,
    /// Bare object keys, routed through the same-origin image proxy.
    ProxyKey,
}

/// Outcome of resolving a stored image reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageRef {
    Placeholder,
    Url(String),
    Key(String),
}

impl ImageRef {
    /// The value surfaced in API responses.
    pub fn into_value(self) -> String {
        match self {
            ImageRef::Placeholder => PLACEHOLDER.to_string(),
            ImageRef::Url(url) => url,
            ImageRef::Key(key) => key,
        }
    }
}

/// Maps the inconsistently-formatted `image` column into one stable
/// reference. Total over arbitrary input: malformed values resolve to the
/// placeholder, nothing panics.
#[derive(Clone, Debug)]
pub struct ImageResolver {
    mode: ResolveMode,
    trusted_host: String,
    bucket_root: String,
}

impl ImageResolver {
    pub fn new(cfg: &ImageConfig) -> Self {
        Self {
            mode: cfg.mode,
            trusted_host: cfg.trusted_host.clone(),
            bucket_root: cfg.bucket_root.trim_end_matches('/').to_string(),
        }
    }

    pub fn resolve(&self, raw: Option<&str>) -> ImageRef {
        let reference = match raw.map(str::trim) {
            Some(r) if !r.is_empty() && r != "null" => r,
            _ => return ImageRef::Placeholder,
        };

        if UNAVAILABLE_MARKERS.iter().any(|m| reference.contains(m)) {
            return ImageRef::Placeholder;
        }

        if reference.starts_with("http://") || reference.starts_with("https://") {
            return self.resolve_absolute(reference);
        }

        match object_key(reference) {
            Some(key) => match self.mode {
                ResolveMode::FullUrl => ImageRef::Url(format!("{}/{}", self.bucket_root, key)),
                ResolveMode::ProxyKey => ImageRef::Key(reference.to_string()),
            },
            None => ImageRef::Placeholder,
        }
    }

    fn resolve_absolute(&self, url: &str) -> ImageRef {
        // External URLs are never surfaced directly. The check is on the URL
        // authority, not a substring: a trusted host name in the path or
        // query must not make an outside origin pass.
        let trusted = url_host(url).is_some_and(|host| {
            host == self.trusted_host
                || host
                    .strip_suffix(&self.trusted_host)
                    .is_some_and(|prefix| prefix.ends_with('.'))
        });
        if !trusted {
            return ImageRef::Placeholder;
        }
        match self.mode {
            ResolveMode::FullUrl => ImageRef::Url(url.to_string()),
            ResolveMode::ProxyKey => match url.rsplit('/').next().filter(|f| has_image_ext(f)) {
                Some(filename) => ImageRef::Key(filename.to_string()),
                None => ImageRef::Placeholder,
            },
        }
    }
}

/// Derive the storage-relative key `<date>/<filename>` from a filename of
/// the form `<slug>-<YYYY>-<MM>-<DD>-<suffix>.<ext>`. Returns `None` when
/// the name does not encode a real calendar date.
pub fn object_key(filename: &str) -> Option<String> {
    if filename.contains('/') || filename.contains("..") {
        return None;
    }
    if !has_image_ext(filename) {
        return None;
    }

    let parts: Vec<&str> = filename.split('-').collect();
    if parts.len() < 4 {
        return None;
    }

    let (year, month, day) = (parts[1], parts[2], parts[3]);
    if year.len() != 4 || month.len() != 2 {
        return None;
    }
    // The day segment may carry the suffix when the name has exactly four
    // segments; only its leading two digits belong to the date.
    let day = day.get(..2)?;

    let y: i32 = year.parse().ok()?;
    let m: u32 = month.parse().ok()?;
    let d: u32 = day.parse().ok()?;
    NaiveDate::from_ymd_opt(y, m, d)?;

    Some(format!("{y:04}-{m:02}-{d:02}/{filename}"))
}

/// Host component of an absolute URL, with credentials and port stripped.
fn url_host(url: &str) -> Option<&str> {
    let rest = url.split_once("://")?.1;
    let authority = rest.split(|c| c == '/' || c == '?' || c == '#').next()?;
    let host = authority.rsplit('@').next()?;
    host.split(':').next().filter(|h| !h.is_empty())
}

fn has_image_ext(name: &str) -> bool {
    let lower = name.to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ImageConfig;

    fn resolver(mode: ResolveMode) -> ImageResolver {
        ImageResolver::new(&ImageConfig {
            mode,
            trusted_host: "s3.amazonaws.com".to_string(),
            bucket_root: "https://propiedades-morelos-imagenes.s3.amazonaws.com".to_string(),
            proxy_timeout_secs: 10,
        })
    }

    #[test]
    fn empty_and_sentinel_inputs_resolve_to_placeholder() {
        let r = resolver(ResolveMode::FullUrl);
        assert_eq!(r.resolve(None), ImageRef::Placeholder);
        assert_eq!(r.resolve(Some("")), ImageRef::Placeholder);
        assert_eq!(r.resolve(Some("   ")), ImageRef::Placeholder);
        assert_eq!(r.resolve(Some("null")), ImageRef::Placeholder);
        assert_eq!(
            r.resolve(Some("static/images/imagen_no_disponible.jpg")),
            ImageRef::Placeholder
        );
    }

    #[test]
    fn placeholder_resolution_is_idempotent() {
        let r = resolver(ResolveMode::ProxyKey);
        assert_eq!(r.resolve(Some(PLACEHOLDER)), ImageRef::Placeholder);
    }

    #[test]
    fn trusted_url_passes_through_in_full_mode() {
        let r = resolver(ResolveMode::FullUrl);
        let url = "https://propiedades-morelos-imagenes.s3.amazonaws.com/2025-05-30/cuernavaca-2025-05-30-3908221572840457.jpg";
        assert_eq!(r.resolve(Some(url)), ImageRef::Url(url.to_string()));
    }

    #[test]
    fn trusted_url_yields_key_in_proxy_mode() {
        let r = resolver(ResolveMode::ProxyKey);
        let url = "https://propiedades-morelos-imagenes.s3.amazonaws.com/2025-05-30/cuernavaca-2025-05-30-3908221572840457.jpg";
        assert_eq!(
            r.resolve(Some(url)),
            ImageRef::Key("cuernavaca-2025-05-30-3908221572840457.jpg".to_string())
        );
    }

    #[test]
    fn untrusted_url_is_never_surfaced() {
        for mode in [ResolveMode::FullUrl, ResolveMode::ProxyKey] {
            let r = resolver(mode);
            assert_eq!(
                r.resolve(Some("https://evil.example.com/photo.jpg")),
                ImageRef::Placeholder
            );
            assert_eq!(
                r.resolve(Some("http://localhost:8000/static/images/x.jpg")),
                ImageRef::Placeholder
            );
        }
    }

    #[test]
    fn trusted_host_must_match_url_authority() {
        for mode in [ResolveMode::FullUrl, ResolveMode::ProxyKey] {
            let r = resolver(mode);
            // The trusted host name appearing in the query, path, userinfo,
            // or as a subdomain prefix of another origin proves nothing.
            for url in [
                "https://evil.example.com/photo.jpg?cb=s3.amazonaws.com",
                "https://evil.example.com/s3.amazonaws.com/photo.jpg",
                "https://s3.amazonaws.com@evil.example.com/photo.jpg",
                "https://s3.amazonaws.com.evil.example.com/photo.jpg",
                "https://nots3.amazonaws.com/photo.jpg",
            ] {
                assert_eq!(r.resolve(Some(url)), ImageRef::Placeholder, "url: {url}");
            }
        }
    }

    #[test]
    fn trusted_host_accepts_exact_and_subdomain_authorities() {
        let r = resolver(ResolveMode::FullUrl);
        for url in [
            "https://s3.amazonaws.com/bucket/2025-05-30/casa-2025-05-30-1.jpg",
            "https://propiedades-morelos-imagenes.s3.amazonaws.com:443/2025-05-30/casa-2025-05-30-1.jpg",
        ] {
            assert_eq!(r.resolve(Some(url)), ImageRef::Url(url.to_string()), "url: {url}");
        }
    }

    #[test]
    fn dated_filename_derives_bucket_url() {
        let r = resolver(ResolveMode::FullUrl);
        assert_eq!(
            r.resolve(Some("cuernavaca-2025-06-09-1234567890.jpg")),
            ImageRef::Url(
                "https://propiedades-morelos-imagenes.s3.amazonaws.com/2025-06-09/cuernavaca-2025-06-09-1234567890.jpg"
                    .to_string()
            )
        );
    }

    #[test]
    fn dated_filename_yields_key_in_proxy_mode() {
        let r = resolver(ResolveMode::ProxyKey);
        assert_eq!(
            r.resolve(Some("cuernavaca-2025-06-09-1234567890.jpg")),
            ImageRef::Key("cuernavaca-2025-06-09-1234567890.jpg".to_string())
        );
    }

    #[test]
    fn resolver_is_total_over_garbage_input() {
        let r = resolver(ResolveMode::FullUrl);
        for raw in [
            "no_dashes.jpg",
            "a-b.jpg",
            "casa-20-25-06.jpg",
            "casa-2025-13-40-1.jpg",
            "tepoztlán-foto-sín-fecha.jpg",
            "../../etc/passwd",
            "\u{0} weird \u{7f}",
            "justtext",
        ] {
            assert_eq!(r.resolve(Some(raw)), ImageRef::Placeholder, "input: {raw:?}");
        }
    }

    #[test]
    fn object_key_embeds_date_folder() {
        assert_eq!(
            object_key("cuernavaca-2025-06-09-1234567890.jpg").as_deref(),
            Some("2025-06-09/cuernavaca-2025-06-09-1234567890.jpg")
        );
        assert_eq!(object_key("placeholder.jpg"), None);
        assert_eq!(object_key("x-2025-02-30-1.jpg"), None); // not a real date
        assert_eq!(object_key("a/b-2025-06-09-1.jpg"), None);
    }
}
