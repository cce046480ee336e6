#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    #[default]
    Default,
    Destructive,
}

/// A transient, user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: Variant,
}

impl Notice {
    fn success(description: &str) -> Self {
        Self {
            title: "Success".to_string(),
            description: description.to_string(),
            variant: Variant::Default,
        }
    }

    fn error(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            variant: Variant::Destructive,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    #[default]
    Stay,
    ToListing,
}

/// What the caller should do after a view operation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Effect {
    pub notice: Option<Notice>,
    pub navigation: Navigation,
}

impl Effect {
    fn stay(notice: Notice) -> Self {
        Self {
            notice: Some(notice),
            navigation: Navigation::Stay,
        }
    }

    fn leave(notice: Notice) -> Self {
        Self {
            notice: Some(notice),
            navigation: Navigation::ToListing,
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn post_not_found() -> Self {
        Self::leave(Notice::error(
            "Post not found",
            "The post you're looking for doesn't exist.",
        ))
    }

    pub fn post_load_failed() -> Self {
        Self::leave(Notice::error(
            "Error",
            "Failed to load post. Please try again.",
        ))
    }

    pub fn posts_load_failed() -> Self {
        Self::stay(Notice::error(
            "Error",
            "Failed to load posts. Please try again.",
        ))
    }

    pub fn post_added() -> Self {
        Self::stay(Notice::success("Post added successfully!"))
    }

    pub fn post_add_failed() -> Self {
        Self::stay(Notice::error(
            "Error",
            "Failed to add post. Please try again.",
        ))
    }

    pub fn post_updated() -> Self {
        Self::stay(Notice::success("Post updated successfully!"))
    }

    pub fn post_update_failed() -> Self {
        Self::stay(Notice::error(
            "Error",
            "Failed to update post. Please try again.",
        ))
    }

    pub fn post_deleted() -> Self {
        Self::leave(Notice::success("Post deleted successfully!"))
    }

    pub fn post_delete_failed() -> Self {
        Self::stay(Notice::error(
            "Error",
            "Failed to delete post. Please try again.",
        ))
    }

    pub fn not_owner() -> Self {
        Self::stay(Notice::error(
            "Not allowed",
            "Only the author can change this post.",
        ))
    }

    pub fn invalid(description: &str) -> Self {
        Self::stay(Notice::error("Error", description))
    }

    pub fn is_error(&self) -> bool {
        self.notice
            .as_ref()
            .is_some_and(|notice| notice.variant == Variant::Destructive)
    }
}
