use crate::error::ReviewError;
use async_trait::async_trait;

/// App-store review capability.
#[async_trait]
pub trait ReviewService: Send + Sync {
    async fn open_store_page(&self) -> Result<(), ReviewError>;
}

/// Stand-in for the platform store: announces the store page in the log.
pub struct LogReviewService {
    store_url: Option<String>,
}

impl LogReviewService {
    pub fn new(store_url: Option<String>) -> Self {
        Self { store_url }
    }
}

#[async_trait]
impl ReviewService for LogReviewService {
    async fn open_store_page(&self) -> Result<(), ReviewError> {
        match &self.store_url {
            Some(url) => {
                log::info!("Opening store page {}", url);
                Ok(())
            }
            None => Err(ReviewError::StoreUnavailable(
                "no store URL configured".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_store_page_requires_url() {
        let with_url = LogReviewService::new(Some("https://example.org/app".to_string()));
        assert!(with_url.open_store_page().await.is_ok());

        let without = LogReviewService::new(None);
        assert!(matches!(
            without.open_store_page().await,
            Err(ReviewError::StoreUnavailable(_))
        ));
    }
}
