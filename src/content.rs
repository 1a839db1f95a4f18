//! Slide image loading.
//!
//! Local images are decoded up front in parallel; remote images are fetched
//! on background threads and polled from the UI thread every frame. Both
//! paths produce RGBA buffers ready for texture upload.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::mpsc;

use rayon::prelude::*;
use url::Url;

/// Images wider than this are scaled down before upload.
pub const MAX_IMAGE_WIDTH: u32 = 1600;

/// Decoded image data (RGBA).
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl std::fmt::Debug for ImageData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageData")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.rgba.len())
            .finish()
    }
}

/// Where an image slide comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageLocation {
    Remote(Url),
    Local(PathBuf),
}

impl ImageLocation {
    /// http(s) URLs are remote; anything else is a filesystem path.
    pub fn parse(location: &str) -> Self {
        match Url::parse(location) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Self::Remote(url),
            Ok(url) if url.scheme() == "file" => match url.to_file_path() {
                Ok(path) => Self::Local(path),
                Err(()) => Self::Local(PathBuf::from(location)),
            },
            _ => Self::Local(PathBuf::from(location)),
        }
    }

    /// Resolve relative local paths against `base` (the config directory).
    pub fn relative_to(self, base: &Path) -> Self {
        match self {
            Self::Local(path) if path.is_relative() => Self::Local(base.join(path)),
            other => other,
        }
    }
}

/// Decode every path in parallel. Failed decodes come back as `None`.
pub fn decode_local(paths: &[PathBuf]) -> Vec<Option<ImageData>> {
    paths
        .par_iter()
        .map(|path| match image::open(path) {
            Ok(img) => Some(into_image_data(img)),
            Err(e) => {
                log::warn!("Failed to decode {}: {}", path.display(), e);
                None
            }
        })
        .collect()
}

/// Decode an in-memory encoded image.
pub fn decode_bytes(bytes: &[u8]) -> Option<ImageData> {
    image::load_from_memory(bytes).ok().map(into_image_data)
}

fn into_image_data(img: image::DynamicImage) -> ImageData {
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();

    let (w, h, pixels) = if w > MAX_IMAGE_WIDTH {
        let ratio = MAX_IMAGE_WIDTH as f32 / w as f32;
        let new_h = ((h as f32 * ratio) as u32).max(1);
        let resized = image::imageops::resize(
            &rgba,
            MAX_IMAGE_WIDTH,
            new_h,
            image::imageops::FilterType::Triangle,
        );
        let (rw, rh) = resized.dimensions();
        (rw, rh, resized.into_raw())
    } else {
        (w, h, rgba.into_raw())
    };

    ImageData {
        width: w,
        height: h,
        rgba: pixels,
    }
}

/// Manages background image fetching and decoding.
#[derive(Default)]
pub struct ImageLoader {
    pending: HashMap<String, mpsc::Receiver<Option<ImageData>>>,
    loaded: HashMap<String, ImageData>,
    failed: HashSet<String>,
}

impl ImageLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a remote image. Repeated requests for the same URL are ignored.
    pub fn request(&mut self, url: &Url) {
        let key = url.as_str();
        if self.loaded.contains_key(key) || self.pending.contains_key(key) || self.failed.contains(key) {
            return;
        }

        let (tx, rx) = mpsc::channel();
        let url_owned = url.clone();

        std::thread::spawn(move || {
            let result = fetch_and_decode(&url_owned);
            let _ = tx.send(result);
        });

        log::debug!("Fetching slide image {}", key);
        self.pending.insert(key.to_string(), rx);
    }

    /// Store an image decoded elsewhere, e.g. by [`decode_local`].
    pub fn insert(&mut self, key: impl Into<String>, data: Option<ImageData>) {
        let key = key.into();
        match data {
            Some(data) => {
                self.loaded.insert(key, data);
            }
            None => {
                self.failed.insert(key);
            }
        }
    }

    /// Poll for completed downloads. Call every frame.
    pub fn poll(&mut self) -> usize {
        let mut completed = Vec::new();
        for (url, rx) in &self.pending {
            match rx.try_recv() {
                Ok(result) => completed.push((url.clone(), result)),
                Err(mpsc::TryRecvError::Disconnected) => completed.push((url.clone(), None)),
                Err(mpsc::TryRecvError::Empty) => {}
            }
        }
        let count = completed.len();
        for (url, result) in completed {
            self.pending.remove(&url);
            if result.is_none() {
                log::warn!("Slide image failed: {}", url);
            }
            self.insert(url, result);
        }
        count
    }

    pub fn get(&self, key: &str) -> Option<&ImageData> {
        self.loaded.get(key)
    }

    pub fn is_failed(&self, key: &str) -> bool {
        self.failed.contains(key)
    }

    pub fn is_pending(&self, key: &str) -> bool {
        self.pending.contains_key(key)
    }

    /// Number of successfully loaded images.
    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    /// Number of images still being fetched.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(feature = "remote")]
fn fetch_and_decode(url: &Url) -> Option<ImageData> {
    let resp = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()
        .ok()?
        .get(url.as_str())
        .send()
        .ok()?;

    if !resp.status().is_success() {
        log::warn!("{} answered {}", url, resp.status());
        return None;
    }

    let bytes = resp.bytes().ok()?;
    decode_bytes(&bytes)
}

#[cfg(not(feature = "remote"))]
fn fetch_and_decode(url: &Url) -> Option<ImageData> {
    log::warn!("Remote images are disabled, skipping {}", url);
    None
}
