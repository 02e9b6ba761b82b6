// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Gallery and link list markup.

use pattrn_map_port::{LinkItem, MediaItem};

/// Photo gallery list item.
pub fn photo_html(item: &MediaItem) -> String {
    format!(
        "<li data-src=\"{}\"data-sub-html=\"{}\" ><img src=\"{}\"/><br/>{}<p>Source: {}</p></li>",
        item.src, item.subhtml, item.thumb, item.caption, item.source
    )
}

/// Video gallery list item.
pub fn video_html(item: &MediaItem) -> String {
    format!(
        "<li style= \"list-style-type: none;\" data-src=\"{}\"data-sub-html=\"{}\" id=\"image_link\">\
         <a target=\"_blank\" href=\"{}\"><img src=\"{}\" /><p>Video: <strong>{}</strong></p></a>\
         <p>Source: {}</p></li>",
        item.src, item.subhtml, item.src, item.thumb, item.caption, item.source
    )
}

/// Link list item.
pub fn link_html(item: &LinkItem) -> String {
    format!(
        "<li><a target=\"_blank\" href=\"{}\"> Title: {}</a></li>\
         <p style=\"line-height: 100%\"><br/>Subtitle: {}</p>",
        item.url, item.title, item.subtitle
    )
}

/// "Edit this event" dropdown entry.
pub fn edit_link_html(script_url: &str, event_id: &str) -> String {
    format!(
        "<li><a target='_blank' href={script_url}{event_id} class='edit_dropdown noMargin'>Edit this event</a><li>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn photo_item_carries_lightbox_attributes() {
        let item = MediaItem {
            src: "full.jpg".into(),
            thumb: "thumb.jpg".into(),
            caption: "Crater".into(),
            subhtml: "<h4>Crater</h4>".into(),
            source: "Reuters".into(),
        };
        let html = photo_html(&item);
        assert!(html.starts_with("<li data-src=\"full.jpg\""));
        assert!(html.contains("<img src=\"thumb.jpg\"/>"));
        assert!(html.contains("<p>Source: Reuters</p>"));
    }

    #[test]
    fn video_item_links_to_source() {
        let item = MediaItem {
            src: "https://video.example/1".into(),
            caption: "Clip".into(),
            ..MediaItem::default()
        };
        let html = video_html(&item);
        assert!(html.contains("href=\"https://video.example/1\""));
        assert!(html.contains("Video: <strong>Clip</strong>"));
    }

    #[test]
    fn link_item_shows_title_and_subtitle() {
        let item = LinkItem {
            url: "https://a.example".into(),
            title: "Report".into(),
            subtitle: "p. 4".into(),
        };
        let html = link_html(&item);
        assert!(html.contains("href=\"https://a.example\"> Title: Report</a>"));
        assert!(html.ends_with("Subtitle: p. 4</p>"));
    }

    #[test]
    fn edit_link_appends_event_id() {
        let html = edit_link_html("https://edit.example/?id=", "42");
        assert!(html.contains("href=https://edit.example/?id=42 "));
    }
}
