//! Page templates for the home page and post pages
//!
//! Markup only; styling is left to the site's stylesheet.

use maud::{html, Markup, PreEscaped, DOCTYPE};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::config::SiteConfig;
use crate::content::{Author, Post};

/// Fields the home page reads from each post
pub const HOME_FIELDS: [&str; 6] = ["title", "date", "slug", "author", "coverImage", "excerpt"];

/// Fields the post page reads
pub const POST_FIELDS: [&str; 8] = [
    "title",
    "excerpt",
    "date",
    "slug",
    "author",
    "content",
    "ogImage",
    "coverImage",
];

/// `/api/og` URL previewing a post
pub fn og_image_url(config: &SiteConfig, post: &Post) -> String {
    let title = post.title.as_deref().unwrap_or(&config.og.default_title);
    let mut url = format!(
        "{}?title={}",
        config.absolute_url("/api/og"),
        utf8_percent_encode(title, NON_ALPHANUMERIC)
    );
    if let Some(image) = post.og_image_url() {
        let background = if image.starts_with('/') {
            config.absolute_url(image)
        } else {
            image.to_string()
        };
        url.push_str("&bgImage=");
        url.extend(utf8_percent_encode(&background, NON_ALPHANUMERIC));
    }
    url
}

fn layout(config: &SiteConfig, title: &str, description: &str, og_image: Option<&str>, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                meta name="description" content=(description);
                meta property="og:title" content=(title);
                @if let Some(image) = og_image {
                    meta property="og:image" content=(image);
                    meta name="twitter:card" content="summary_large_image";
                }
                link rel="stylesheet" href="/assets/index.css";
            }
            body {
                div class="min-h-screen" {
                    main { (body) }
                }
                footer {
                    a href="/" { (config.title) }
                }
            }
        }
    }
}

fn author_badge(author: &Author) -> Markup {
    html! {
        div class="author" {
            @if let Some(picture) = &author.picture {
                img src=(picture) alt=(author.name) width="48" height="48";
            }
            span { (author.name) }
        }
    }
}

fn post_link(post: &Post) -> String {
    format!("/posts/{}", post.slug.as_deref().unwrap_or_default())
}

fn preview(post: &Post, class: &str) -> Markup {
    html! {
        article class=(class) {
            @if let Some(cover) = &post.cover_image {
                a href=(post_link(post)) {
                    img class="cover" src=(cover) alt={ "Cover Image for " (post.title.as_deref().unwrap_or_default()) };
                }
            }
            h3 {
                a href=(post_link(post)) { (post.title.as_deref().unwrap_or_default()) }
            }
            @if let Some(date) = post.display_date() {
                time datetime=(post.date.as_deref().unwrap_or_default()) { (date) }
            }
            @if let Some(excerpt) = &post.excerpt {
                p class="excerpt" { (excerpt) }
            }
            @if let Some(author) = &post.author {
                (author_badge(author))
            }
        }
    }
}

/// Home page: the newest post as hero, the rest as "More Stories"
pub fn home_page(config: &SiteConfig, posts: &[Post]) -> Markup {
    let body = html! {
        section class="intro" {
            h1 { (config.title) }
            h4 { (config.tagline) }
        }
        @if let Some(hero) = posts.first() {
            (preview(hero, "hero"))
        }
        @if posts.len() > 1 {
            section class="more-stories" {
                h2 { "More Stories" }
                @for post in &posts[1..] {
                    (preview(post, "story"))
                }
            }
        }
    };
    let title = format!("{} | {}", config.title, config.tagline.trim_start_matches("// "));
    layout(config, &title, &config.description, None, body)
}

/// Single post page around already-rendered content
pub fn post_page(config: &SiteConfig, post: &Post, content_html: &str) -> Markup {
    let post_title = post.title.as_deref().unwrap_or_default();
    let body = html! {
        article class="mb-32" {
            h1 { (post_title) }
            @if let Some(author) = &post.author {
                (author_badge(author))
            }
            @if let Some(cover) = &post.cover_image {
                img class="cover" src=(cover) alt={ "Cover Image for " (post_title) };
            }
            @if let Some(date) = post.display_date() {
                time datetime=(post.date.as_deref().unwrap_or_default()) { (date) }
            }
            div class="post-body" { (PreEscaped(content_html)) }
        }
    };
    let title = format!("{} | {}", post_title, config.title);
    let description = post.excerpt.as_deref().unwrap_or(&config.description);
    let og_image = og_image_url(config, post);
    layout(config, &title, description, Some(&og_image), body)
}

/// Page for unknown slugs
pub fn not_found_page(config: &SiteConfig, slug: &str) -> Markup {
    let body = html! {
        h1 { "404" }
        p { "No post named " code { (slug) } " exists." }
        a href="/" { "Back home" }
    };
    layout(config, &format!("Not found | {}", config.title), &config.description, None, body)
}
