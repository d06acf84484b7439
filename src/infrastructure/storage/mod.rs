mod mock_uploader;
mod object_store_uploader;

pub use mock_uploader::MockObjectUploader;
pub use object_store_uploader::ObjectStoreUploader;
