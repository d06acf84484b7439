/// A single inbound chat message, constructed once per request.
///
/// `media_url` points at an authenticated remote audio attachment when the
/// sender recorded a voice message instead of typing text.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub from: String,
    pub body: String,
    pub media_url: Option<String>,
}

impl IncomingMessage {
    pub fn new(from: String, body: String, media_url: Option<String>) -> Self {
        Self {
            from,
            body,
            media_url,
        }
    }

    pub fn has_media(&self) -> bool {
        self.media_url.is_some()
    }
}
