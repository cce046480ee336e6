pub mod post;
pub mod user;

pub mod prelude {
    pub use crate::post::{
        Media, NewPost as NewPostEntity, Post as PostEntity, PostPatch,
    };
    pub use crate::user::{Session, User as UserEntity};
}
