mod http_media_fetcher;
mod mock_media_fetcher;

pub use http_media_fetcher::HttpMediaFetcher;
pub use mock_media_fetcher::MockMediaFetcher;
