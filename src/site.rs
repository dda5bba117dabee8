//! Static output: every generated file of the site and the helpers that put
//! them on disk.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use fs_extra::dir::CopyOptions;

use crate::config::SiteConfig;
use crate::error::{SiteError, SiteResult};
use crate::page::render_document;
use crate::seo::{robots_txt, sitemap_xml, web_manifest};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteFile {
    /// Path relative to the output directory.
    pub path: PathBuf,
    pub contents: String,
}

impl SiteFile {
    fn new(path: &str, contents: String) -> Self {
        Self {
            path: PathBuf::from(path),
            contents,
        }
    }
}

/// Renders `index.html`, `robots.txt`, `sitemap.xml` and `site.webmanifest`.
pub fn render_site(config: &SiteConfig, lastmod: SystemTime) -> SiteResult<Vec<SiteFile>> {
    config.validate()?;
    let manifest = serde_json::to_string_pretty(&web_manifest(config))?;
    Ok(vec![
        SiteFile::new("index.html", render_document(config)),
        SiteFile::new("robots.txt", robots_txt(config)),
        SiteFile::new("sitemap.xml", sitemap_xml(config, lastmod)),
        SiteFile::new("site.webmanifest", manifest),
    ])
}

pub fn write_site(out_dir: &Path, files: &[SiteFile]) -> SiteResult<()> {
    std::fs::create_dir_all(out_dir)?;
    for file in files {
        let target = out_dir.join(&file.path);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&target, &file.contents)?;
        tracing::debug!(path = %target.display(), bytes = file.contents.len(), "wrote");
    }
    tracing::info!(dir = %out_dir.display(), files = files.len(), "site written");
    Ok(())
}

/// Copies the contents of `static_dir` into `out_dir`, overwriting. A missing
/// `static_dir` copies nothing.
pub fn copy_static(static_dir: &Path, out_dir: &Path) -> SiteResult<u64> {
    if !static_dir.is_dir() {
        tracing::warn!(dir = %static_dir.display(), "no static directory");
        return Ok(0);
    }
    std::fs::create_dir_all(out_dir)?;
    let options = CopyOptions::new().overwrite(true).content_only(true);
    let bytes = fs_extra::dir::copy(static_dir, out_dir, &options)
        .map_err(|e| SiteError::Io(std::io::Error::other(e.to_string())))?;
    tracing::debug!(from = %static_dir.display(), bytes, "copied static assets");
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use std::time::UNIX_EPOCH;

    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("shoshiy-site-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn renders_four_files() {
        let files = render_site(&SiteConfig::default(), UNIX_EPOCH).unwrap();
        let names: Vec<_> = files.iter().map(|f| f.path.to_string_lossy().into_owned()).collect();
        assert_eq!(names, ["index.html", "robots.txt", "sitemap.xml", "site.webmanifest"]);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = SiteConfig {
            base_url: "ftp://example.org".into(),
            ..SiteConfig::default()
        };
        assert!(matches!(render_site(&config, UNIX_EPOCH), Err(SiteError::Config(_))));
    }

    #[test]
    fn writes_and_copies() {
        let out = scratch("out");
        let assets = scratch("assets");
        std::fs::create_dir_all(assets.join("img")).unwrap();
        std::fs::write(assets.join("img/logo.txt"), "logo").unwrap();

        let files = render_site(&SiteConfig::default(), UNIX_EPOCH).unwrap();
        write_site(&out, &files).unwrap();
        assert!(copy_static(&assets, &out).unwrap() > 0);

        assert!(out.join("index.html").is_file());
        assert_eq!(std::fs::read_to_string(out.join("img/logo.txt")).unwrap(), "logo");
        assert_eq!(copy_static(&assets.join("missing"), &out).unwrap(), 0);

        let _ = std::fs::remove_dir_all(&out);
        let _ = std::fs::remove_dir_all(&assets);
    }
}
