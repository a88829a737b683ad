use anyhow::Context;
use bytes::Bytes;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Push campaign image bytes to object storage and return the public URL.
///
/// An unsupported content type is an upload error (400) and fails before any
/// storage call; a transport failure on the put is a server error (500).
pub async fn store_campaign_image(
    st: &AppState,
    body: Bytes,
    content_type: &str,
) -> Result<String, ApiError> {
    let ext = ext_from_mime(content_type)
        .ok_or_else(|| ApiError::bad_request(format!("Unsupported image type: {content_type}")))?;
    let key = format!("campaigns/{}.{}", Uuid::new_v4(), ext);
    st.storage
        .put_object(&key, body, content_type)
        .await
        .with_context(|| format!("put_object {}", key))?;
    Ok(st.storage.object_url(&key))
}

pub fn ext_from_mime(ct: &str) -> Option<&'static str> {
    match ct {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        "image/heic" => Some("heic"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;

    #[test]
    fn test_ext_from_mime() {
        assert_eq!(ext_from_mime("image/jpeg"), Some("jpg"));
        assert_eq!(ext_from_mime("image/jpg"), Some("jpg"));
        assert_eq!(ext_from_mime("image/png"), Some("png"));
        assert_eq!(ext_from_mime("image/webp"), Some("webp"));
        assert_eq!(ext_from_mime("image/heic"), Some("heic"));
        assert_eq!(ext_from_mime("application/pdf"), None);
        assert_eq!(ext_from_mime("text/plain"), None);
    }

    #[tokio::test]
    async fn stores_under_campaigns_prefix() {
        let state = AppState::fake();
        let url = store_campaign_image(&state, Bytes::from_static(b"img"), "image/png")
            .await
            .unwrap();
        assert!(url.starts_with("https://fake.local/campaigns/"));
        assert!(url.ends_with(".png"));
    }

    #[tokio::test]
    async fn rejects_non_image_before_any_storage_call() {
        let state = AppState::fake();
        let err = store_campaign_image(&state, Bytes::from_static(b"%PDF"), "application/pdf")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
