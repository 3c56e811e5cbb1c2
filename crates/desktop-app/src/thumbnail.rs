// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use autocull_client::Backend;

/// Displayable image of a card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Thumbnail {
    /// The generic placeholder image.
    #[default]
    Placeholder,

    /// Image data, usually a data URL.
    Resolved(String),
}

impl Thumbnail {
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// Image source for display, falling back to the placeholder image.
    #[must_use]
    pub fn src<'a>(&'a self, placeholder_image: &'a str) -> &'a str {
        match self {
            Self::Placeholder => placeholder_image,
            Self::Resolved(data_url) => data_url,
        }
    }
}

/// Resolve an image reference into a displayable thumbnail.
///
/// Never fails. The placeholder is kept if there is nothing to resolve,
/// if the image is unavailable, or if the backend call fails.
pub async fn resolve_thumbnail<B>(backend: &B, image_ref: Option<&str>) -> Thumbnail
where
    B: Backend,
{
    let Some(image_ref) = image_ref else {
        return Thumbnail::Placeholder;
    };
    match backend.resolve_image(image_ref).await {
        Ok(Some(data_url)) => Thumbnail::Resolved(data_url),
        Ok(None) => {
            log::debug!("Image {image_ref} is unavailable");
            Thumbnail::Placeholder
        }
        Err(err) => {
            log::warn!("Failed to resolve image {image_ref}: {err}");
            Thumbnail::Placeholder
        }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use crate::testing::{ImageScript, ScriptedBackend};

    use super::*;

    #[test(tokio::test)]
    async fn missing_reference_is_not_resolved() {
        let backend = ScriptedBackend::default();
        assert_eq!(
            Thumbnail::Placeholder,
            resolve_thumbnail(&backend, None).await
        );
        assert!(backend.resolved_paths().is_empty());
    }

    #[test(tokio::test)]
    async fn unavailable_and_rejected_images_keep_placeholder() {
        let backend = ScriptedBackend::default()
            .with_image("gone.jpg", ImageScript::unavailable())
            .with_image("broken.jpg", ImageScript::rejected());
        assert_eq!(
            Thumbnail::Placeholder,
            resolve_thumbnail(&backend, Some("gone.jpg")).await
        );
        assert_eq!(
            Thumbnail::Placeholder,
            resolve_thumbnail(&backend, Some("broken.jpg")).await
        );
        assert_eq!(vec!["gone.jpg", "broken.jpg"], backend.resolved_paths());
    }

    #[test(tokio::test)]
    async fn resolved_image() {
        let backend = ScriptedBackend::default()
            .with_image("a.jpg", ImageScript::resolved("data:image/jpeg;base64,AAAA"));
        let thumbnail = resolve_thumbnail(&backend, Some("a.jpg")).await;
        assert!(thumbnail.is_resolved());
        assert_eq!("data:image/jpeg;base64,AAAA", thumbnail.src("photo.png"));
        assert_eq!("photo.png", Thumbnail::Placeholder.src("photo.png"));
    }
}
