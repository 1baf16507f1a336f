use crate::article::{Article, ArticleShape, Media};
use crate::selector::LatestSection;
use crate::types::{SectionEntry, SharedArticle, SharedMedia, StandardArticle, StandardMedia};

pub(crate) fn article_from_standard(a: StandardArticle) -> Article {
    Article {
        title: a.title,
        byline: a.byline,
        summary: a.summary,
        url: a.url,
        media: a.multimedia.unwrap_or_default().into_iter().map(media_from_standard).collect(),
        shape: ArticleShape::Standard,
    }
}

pub(crate) fn article_from_shared(a: SharedArticle) -> Article {
    Article {
        title: a.title,
        byline: a.byline,
        summary: a.summary,
        url: a.url,
        media: a.media.unwrap_or_default().into_iter().map(media_from_shared).collect(),
        shape: ArticleShape::Shared,
    }
}

fn media_from_standard(m: StandardMedia) -> Media {
    Media { caption: m.caption, width: m.width, height: m.height, url: m.url, kind: m.kind }
}

// Only the first rendition is used.
fn media_from_shared(m: SharedMedia) -> Media {
    let first = m.metadata.and_then(|v| v.into_iter().next());
    let (width, height, url) = first.map(|r| (r.width, r.height, r.url)).unwrap_or_default();
    Media { caption: m.caption, width, height, url, kind: m.kind }
}

pub(crate) fn section_from_entry(e: SectionEntry) -> LatestSection {
    LatestSection::Section { name: e.section, display_name: e.display_name }
}
