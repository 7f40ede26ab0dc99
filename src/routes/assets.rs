use std::path::Path;

use axum::Router;
use tower_http::services::{ServeDir, ServeFile};

/// URL prefix, directory under the assets root, and the file served when the
/// requested one is missing.
pub const MOUNTS: &[(&str, &str, &str)] = &[
    ("/api/outfits-packages-bg", "outfits_packages_bg", "bg1.png"),
    ("/api/outfits/image", "outfits_img", "default_outfit.png"),
    ("/api/user/profile-image", "users_profile", "dummy_profile.png"),
    ("/saved/venue_img", "venue_img", "grandballroom.png"),
    ("/api/venue-image", "venue_img", "grandballroom.png"),
];

/// Image directories served from disk. A missing file falls back to the
/// directory's placeholder with a 200.
pub fn router<S>(assets_dir: &Path) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    MOUNTS
        .iter()
        .fold(Router::new(), |router, (prefix, dir, fallback)| {
            let dir = assets_dir.join(dir);
            tracing::debug!(prefix, path = %dir.display(), "serving static files");
            let service = ServeDir::new(&dir).fallback(ServeFile::new(dir.join(fallback)));
            router.nest_service(prefix, service)
        })
}
