//! Commands - 各模块用例的输入

mod comment_commands;
mod photo_commands;
mod social_media_commands;
mod user_commands;

pub use comment_commands::{CreateComment, DeleteComment, ListComments, UpdateComment};
pub use photo_commands::{CreatePhoto, DeletePhoto, UpdatePhoto};
pub use social_media_commands::{CreateSocialMedia, DeleteSocialMedia, UpdateSocialMedia};
pub use user_commands::{DeleteUser, LoginUser, RegisterUser, UpdateUser};
