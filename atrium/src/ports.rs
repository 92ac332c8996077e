use crate::content::{
    ContactInput, ContactMessage, EducationEntry, EducationInput, Item, ItemFilter, ItemInput,
    Media, MediaInput, MediaKind, NewsArticle, NewsFilter, NewsInput, NewsKind, PageRequest,
    SubscribeInput, Subscriber, Submission, SubmissionFilter, SubmissionInput, SubmissionKind,
    SubmissionStatus,
};
use async_trait::async_trait;
use shared::Result;

// Ports are the pluggable persistence seams behind the HTTP handlers.
// List operations return the requested rows plus the unpaginated total.

#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn list(&self, filter: &ItemFilter, page: Option<PageRequest>) -> Result<(Vec<Item>, u64)>;
    async fn get(&self, id: i64) -> Result<Option<Item>>;
    async fn create(&self, input: ItemInput) -> Result<Item>;
    async fn update(&self, id: i64, input: ItemInput) -> Result<Option<Item>>;
    async fn delete(&self, id: i64) -> Result<bool>;
}

#[async_trait]
pub trait MediaRepository: Send + Sync {
    /// `kind = None` lists every family.
    async fn list(&self, kind: Option<MediaKind>, page: Option<PageRequest>) -> Result<(Vec<Media>, u64)>;
    async fn get(&self, kind: MediaKind, id: i64) -> Result<Option<Media>>;
    async fn create(&self, kind: MediaKind, input: MediaInput) -> Result<Media>;
    async fn update(&self, kind: MediaKind, id: i64, input: MediaInput) -> Result<Option<Media>>;
    async fn delete(&self, kind: MediaKind, id: i64) -> Result<bool>;
}

#[async_trait]
pub trait NewsRepository: Send + Sync {
    async fn list(
        &self,
        kind: NewsKind,
        filter: &NewsFilter,
        page: Option<PageRequest>,
    ) -> Result<(Vec<NewsArticle>, u64)>;
    async fn get(&self, kind: NewsKind, id: i64) -> Result<Option<NewsArticle>>;
    async fn create(&self, kind: NewsKind, input: NewsInput) -> Result<NewsArticle>;
    async fn update(&self, kind: NewsKind, id: i64, input: NewsInput) -> Result<Option<NewsArticle>>;
    async fn delete(&self, kind: NewsKind, id: i64) -> Result<bool>;
}

#[async_trait]
pub trait EducationRepository: Send + Sync {
    async fn list(&self, page: Option<PageRequest>) -> Result<(Vec<EducationEntry>, u64)>;
    async fn get(&self, id: i64) -> Result<Option<EducationEntry>>;
    async fn create(&self, input: EducationInput) -> Result<EducationEntry>;
    async fn update(&self, id: i64, input: EducationInput) -> Result<Option<EducationEntry>>;
    async fn delete(&self, id: i64) -> Result<bool>;
}

#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    async fn list(
        &self,
        filter: &SubmissionFilter,
        page: Option<PageRequest>,
    ) -> Result<(Vec<Submission>, u64)>;
    async fn get(&self, id: i64) -> Result<Option<Submission>>;
    async fn create(&self, kind: SubmissionKind, input: SubmissionInput) -> Result<Submission>;
    async fn set_status(&self, id: i64, status: SubmissionStatus) -> Result<Option<Submission>>;
    async fn delete(&self, id: i64) -> Result<bool>;
}

#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn list(&self, page: Option<PageRequest>) -> Result<(Vec<ContactMessage>, u64)>;
    async fn create(&self, input: ContactInput) -> Result<ContactMessage>;
    async fn mark_read(&self, id: i64) -> Result<Option<ContactMessage>>;
    async fn delete(&self, id: i64) -> Result<bool>;
}

#[async_trait]
pub trait NewsletterRepository: Send + Sync {
    async fn list(&self, page: Option<PageRequest>) -> Result<(Vec<Subscriber>, u64)>;
    /// Insert, or re-activate an existing address.
    async fn subscribe(&self, input: SubscribeInput) -> Result<Subscriber>;
    /// Returns `false` when the address is unknown.
    async fn unsubscribe(&self, email: &str) -> Result<bool>;
}
