//! HTML fragment rendering.
//!
//! Turns a [`RenderResult`] into article markup. Output is a fragment, not a
//! page: site chrome, stylesheets and layout belong to the page that embeds it.
//!
//! ## Element mapping
//!
//! | Node / span                 | HTML                                        |
//! |-----------------------------|---------------------------------------------|
//! | `Paragraph`                 | `<p>`                                       |
//! | `Heading`                   | `<h2 class="article-subhead">`              |
//! | `BulletList` / `NumberedList` | `<ul>` / `<ol>` with `<li>` per item      |
//! | `ImageFigure`               | `<figure class="inline-figure">` + courtesy |
//! | `Bold` / `Italic`           | `<strong>` / `<em>`                         |
//! | `Highlight`                 | `<mark>` around its child spans             |
//!
//! Every figure carries a courtesy line: the configured label, then the
//! courtesy text, or the configured dash when the text is empty.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) so all interpolated text is escaped.
//! Content is trusted authoring input, but escaping still keeps stray `<` in
//! prose from breaking the page.

use crate::article::Article;
use crate::config::RenderConfig;
use crate::content::RawContent;
use crate::gallery::{Leftover, courtesy_text, leftover_images};
use crate::types::{DocumentNode, GalleryImage, InlineSpan, RenderResult};
use maud::{Markup, html};

/// Render a complete article fragment: title, excerpt, cover, body, leftovers.
pub fn render_article(
    article: &Article,
    result: &RenderResult,
    config: &RenderConfig,
) -> Markup {
    let leftovers = leftover_images(&article.gallery, &result.used_images);
    html! {
        article.article {
            header.article-header {
                h1 { (article.title) }
                @if let Some(excerpt) = article.excerpt.as_deref().filter(|e| !e.trim().is_empty()) {
                    p.article-excerpt { (excerpt) }
                }
            }
            @if let Some(cover) = article.cover.as_ref().filter(|c| !c.url.is_empty()) {
                (render_figure("cover-figure", cover, &article.title, config))
            }
            @let document = RawContent::from_value(&article.content).map(|_| &result.document[..]);
            (render_body(document, config))
            (render_more_photos(&leftovers, config))
        }
    }
}

/// Render the document body.
///
/// `None` means the article has no body at all and shows the empty-body
/// message. A body whose units were all dropped still renders its container.
pub fn render_body(document: Option<&[DocumentNode]>, config: &RenderConfig) -> Markup {
    html! {
        @match document {
            None => p.empty-body { (config.body.empty_message) },
            Some(nodes) => div.article-body {
                @for node in nodes {
                    (render_node(node, config))
                }
            },
        }
    }
}

fn render_node(node: &DocumentNode, config: &RenderConfig) -> Markup {
    html! {
        @match node {
            DocumentNode::Paragraph { spans } => p { (render_spans(spans)) },
            DocumentNode::Heading { spans } => h2.article-subhead { (render_spans(spans)) },
            DocumentNode::BulletList { items } => ul {
                @for item in items { li { (render_spans(item)) } }
            },
            DocumentNode::NumberedList { items } => ol {
                @for item in items { li { (render_spans(item)) } }
            },
            DocumentNode::ImageFigure { image, courtesy } => {
                (figure_markup("inline-figure", image, &config.figures.default_alt, courtesy, config))
            }
        }
    }
}

/// Render inline spans. Highlights recurse into their children.
pub fn render_spans(spans: &[InlineSpan]) -> Markup {
    html! {
        @for span in spans {
            @match span {
                InlineSpan::Plain { text } => { (text) },
                InlineSpan::Bold { text } => strong { (text) },
                InlineSpan::Italic { text } => em { (text) },
                InlineSpan::Highlight { spans } => mark { (render_spans(spans)) },
            }
        }
    }
}

/// Render the "More photos" section. Empty markup when nothing is left over.
pub fn render_more_photos(leftovers: &[Leftover<'_>], config: &RenderConfig) -> Markup {
    html! {
        @if !leftovers.is_empty() {
            section.more-photos {
                h2 { (config.more_photos.heading) }
                div.more-photos-grid {
                    @for leftover in leftovers {
                        @let fallback_alt = format!("{} {}", config.more_photos.alt_prefix, leftover.position);
                        (render_figure("leftover-figure", leftover.image, &fallback_alt, config))
                    }
                }
            }
        }
    }
}

/// A gallery image figure whose courtesy is derived from its caption.
fn render_figure(
    class: &str,
    image: &GalleryImage,
    fallback_alt: &str,
    config: &RenderConfig,
) -> Markup {
    figure_markup(class, image, fallback_alt, &courtesy_text(&image.caption), config)
}

fn figure_markup(
    class: &str,
    image: &GalleryImage,
    fallback_alt: &str,
    courtesy: &str,
    config: &RenderConfig,
) -> Markup {
    let alt = if image.alt.is_empty() { fallback_alt } else { image.alt.as_str() };
    let courtesy = if courtesy.is_empty() {
        config.figures.missing_courtesy.as_str()
    } else {
        courtesy
    };
    html! {
        figure class=(class) {
            img src=(image.url) alt=(alt) loading="lazy";
            figcaption {
                span.courtesy-label { (config.figures.courtesy_label) }
                " "
                (courtesy)
            }
        }
    }
}
