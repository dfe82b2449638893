//! # Object storage — media uploads into the `uploads` bucket
//!
//! Files are stored under a path namespaced by the owning user's id plus a
//! millisecond timestamp, so two uploads of the same filename never collide.
//! A successful upload resolves to the object's public URL, which the app
//! stores on the task row; the file itself is never read back through this
//! client.

use state::Session;
use tracing::debug;

use crate::error::{check, Error};
use crate::Client;

/// Bucket all task media lives in.
pub const BUCKET: &str = "uploads";

/// Collision-avoiding object path: `<user_id>/<millis>-<filename>`.
fn object_path(user_id: &str, millis: u64, filename: &str) -> String {
    format!("{user_id}/{millis}-{filename}")
}

/// Wall-clock milliseconds, usable from both wasm and native.
fn timestamp_millis() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now() as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

impl Client {
    /// Upload one file and return its public URL.
    pub async fn upload(
        &self,
        session: &Session,
        filename: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, Error> {
        let path = object_path(&session.user.id, timestamp_millis(), filename);
        let response = self
            .http
            .post(self.endpoint(&format!("/storage/v1/object/{BUCKET}/{path}")))
            .header("apikey", &self.config().anon_key)
            .bearer_auth(&session.access_token)
            .header("Content-Type", content_type)
            .body(bytes)
            .send()
            .await?;
        check(response).await?;
        debug!("uploaded {path}");
        Ok(self.public_url(&path))
    }

    /// Public URL of an object in the bucket. Pure string construction, no
    /// request — the service serves public objects at a fixed layout.
    pub fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{BUCKET}/{path}",
            self.config().url
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BackendConfig;

    #[test]
    fn test_object_path_namespaces_by_user_and_timestamp() {
        assert_eq!(
            object_path("user-1", 1700000000000, "photo.png"),
            "user-1/1700000000000-photo.png"
        );
    }

    #[test]
    fn test_public_url_layout() {
        let client = Client::new(BackendConfig::new("https://xyz.supabase.co", "anon"));
        assert_eq!(
            client.public_url("user-1/1700000000000-photo.png"),
            "https://xyz.supabase.co/storage/v1/object/public/uploads/user-1/1700000000000-photo.png"
        );
    }

    #[test]
    fn test_timestamp_is_wall_clock_scale() {
        // 2023-01-01 in millis; anything earlier means we read the wrong unit.
        assert!(timestamp_millis() > 1_672_531_200_000);
    }
}
