//! Extension based content type lookup for served uploads.

use std::path::Path;

pub const AUDIO_MPEG: &str = "audio/mpeg";
pub const AUDIO_MP4: &str = "audio/mp4";
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Returns the `Content-Type` to serve `file_name` with.
///
/// Only a handful of audio extensions are recognised; everything else is
/// served as opaque bytes. Matching ignores ASCII case.
pub fn content_type_for(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("mp3") => AUDIO_MPEG,
        Some("m4a") => AUDIO_MP4,
        _ => OCTET_STREAM,
    }
}
