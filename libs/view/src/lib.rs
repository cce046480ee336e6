pub mod detail;
pub mod form;
pub mod listing;
pub mod media;
pub mod notice;
pub mod projection;
pub mod suggestions;

#[cfg(test)]
mod fake;

pub use detail::{lookup, DetailView, Draft, PostLookup};
pub use form::{FieldError, NewPostForm, SubmitError};
pub use listing::ListingView;
pub use media::{Carousel, FallbackImages, MediaKind};
pub use notice::{Effect, Navigation, Notice, Variant};
pub use projection::{CategoryFilter, CategoryGroups, CategorySection};
pub use suggestions::{suggest, Suggestions};
