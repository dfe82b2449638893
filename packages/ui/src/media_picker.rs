//! File picker that uploads into the add-task form's media slots.

use dioxus::prelude::*;
use state::{Event, MediaKind};
use tracing::error;

use crate::use_dispatch;

/// A file input that reads the chosen file and dispatches it for upload.
/// The resulting public URL lands in the draft's image or video field.
#[component]
pub fn MediaPicker(kind: MediaKind, accept: String) -> Element {
    let dispatch = use_dispatch();

    rsx! {
        input {
            r#type: "file",
            accept: "{accept}",
            onchange: move |evt| async move {
                let Some(engine) = evt.files() else { return };
                let Some(name) = engine.files().first().cloned() else {
                    return;
                };
                match engine.read_file(&name).await {
                    Some(bytes) => dispatch.send(Event::PickMedia {
                        kind,
                        content_type: mime_for_filename(&name).to_string(),
                        filename: name,
                        bytes,
                    }),
                    None => error!("could not read selected file {name}"),
                }
            },
        }
    }
}

/// Best-effort MIME type from the file extension. The storage service only
/// uses it as the served Content-Type.
pub fn mime_for_filename(filename: &str) -> &'static str {
    let ext = filename
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_for_common_media() {
        assert_eq!(mime_for_filename("photo.PNG"), "image/png");
        assert_eq!(mime_for_filename("clip.mp4"), "video/mp4");
        assert_eq!(mime_for_filename("pic.jpeg"), "image/jpeg");
    }

    #[test]
    fn test_mime_falls_back_for_unknown_or_missing_extension() {
        assert_eq!(mime_for_filename("archive.tar.zst"), "application/octet-stream");
        assert_eq!(mime_for_filename("noextension"), "application/octet-stream");
    }
}
