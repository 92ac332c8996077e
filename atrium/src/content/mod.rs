pub mod contact;
pub mod education;
pub mod items;
pub mod media;
pub mod news;
pub mod newsletter;
pub mod pagination;
pub mod submissions;
pub mod validation;

pub use contact::{ContactInput, ContactMessage};
pub use education::{EducationEntry, EducationInput};
pub use items::{Item, ItemFilter, ItemInput};
pub use media::{Media, MediaInput, MediaKind};
pub use news::{NewsArticle, NewsFilter, NewsInput, NewsKind};
pub use newsletter::{SubscribeInput, Subscriber, UnsubscribeInput};
pub use pagination::{Listing, Page, PageParams, PageRequest, Pagination};
pub use submissions::{
    Submission, SubmissionFilter, SubmissionInput, SubmissionKind, SubmissionStatus,
};
