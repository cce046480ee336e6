use entity::prelude::*;
use repository::PostStore;
use view::{
    media::thumbnail, DetailView, Effect, FallbackImages, ListingView,
    MediaKind, Navigation, Suggestions, Variant,
};

fn date(post: &PostEntity) -> String {
    post.created_at.format("%B %-d, %Y").to_string()
}

pub fn listing<S: PostStore>(
    listing: &ListingView<S>,
    fallbacks: &FallbackImages,
) {
    let sections = listing.sections();
    if sections.is_empty() {
        println!("No posts found.");
        return;
    }

    for section in sections {
        println!("{} ({})", section.category, section.count_label());
        for post in &section.posts {
            println!(
                "  {}  {}  [{}]  {}",
                post.id,
                post.title,
                date(post),
                thumbnail(post, fallbacks)
            );
        }
        println!();
    }
}

pub fn categories(categories: &[String]) {
    if categories.is_empty() {
        println!("No posts found.");
        return;
    }
    for category in categories {
        println!("{}", category);
    }
}

pub fn suggestions(suggestions: &Suggestions) {
    for category in &suggestions.matches {
        println!("{}", category);
    }
    if let Some(input) = &suggestions.create {
        println!("+ create \"{}\"", input);
    }
}

pub fn detail<S: PostStore>(
    detail: &DetailView<S>,
    fallbacks: &FallbackImages,
) {
    let post = detail.post();

    println!("{}", post.title);
    println!("{} | {}", post.category, date(post));
    println!("{}", detail.hero(fallbacks));

    let urls = post.media.urls();
    if urls.len() > 1 {
        for (i, url) in urls.iter().enumerate() {
            let kind = match MediaKind::of(url) {
                MediaKind::Image => "image",
                MediaKind::Video => "video",
            };
            let marker = if i == detail.carousel().current() {
                ">"
            } else {
                " "
            };
            println!("{} {}/{} {} {}", marker, i + 1, urls.len(), kind, url);
        }
    }
    println!();

    match &post.content {
        Some(content) if !content.is_empty() => println!("{}", content),
        _ => println!("This post doesn't have any content yet."),
    }

    if detail.can_edit() {
        println!();
        println!("(you can edit or delete this post)");
    }
}

pub fn effect(effect: &Effect) {
    if let Some(notice) = &effect.notice {
        let prefix = match notice.variant {
            Variant::Default => "",
            Variant::Destructive => "! ",
        };
        eprintln!("{}{}: {}", prefix, notice.title, notice.description);
    }
    if effect.navigation == Navigation::ToListing {
        eprintln!("-> back to posts");
    }
}
