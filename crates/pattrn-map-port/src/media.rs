// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Media and link descriptors shown in the detail panel galleries.

use serde::{Deserialize, Serialize};

/// One photo or video reference.
///
/// Every field is optional in source data; absent fields deserialize to an
/// empty string so gallery markup never sees a missing attribute.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaItem {
    /// Full-size source URL.
    pub src: String,
    /// Thumbnail URL.
    pub thumb: String,
    /// Caption shown under the thumbnail.
    pub caption: String,
    /// Subtitle markup for the lightbox.
    #[serde(alias = "subtitle")]
    pub subhtml: String,
    /// Attribution.
    pub source: String,
}

/// One external link reference.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkItem {
    /// Target URL.
    pub url: String,
    /// Link title.
    pub title: String,
    /// Link subtitle.
    pub subtitle: String,
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn media_item_tolerates_missing_fields() {
        let item: MediaItem = serde_json::from_str(r#"{"src":"a.jpg"}"#).unwrap();
        assert_eq!(item.src, "a.jpg");
        assert!(item.thumb.is_empty());
    }

    #[test]
    fn media_item_accepts_subtitle_alias() {
        let item: MediaItem = serde_json::from_str(r#"{"subtitle":"night"}"#).unwrap();
        assert_eq!(item.subhtml, "night");
    }
}
