use reqwest::header::CONTENT_TYPE;

use crate::adapters::callback::CallbackSender;

/// Uploads custom resource responses to the pre-signed S3 `ResponseURL`.
#[derive(Clone)]
pub struct HttpCallbackSender {
    client: reqwest::Client,
}

impl HttpCallbackSender {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl CallbackSender for HttpCallbackSender {
    fn send_callback(&self, response_url: &str, body: &[u8]) -> Result<(), String> {
        let client = self.client.clone();
        let url = response_url.to_string();
        let body = body.to_vec();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                // The URL is signed without a content type.
                client
                    .put(url)
                    .header(CONTENT_TYPE, "")
                    .body(body)
                    .send()
                    .await
                    .and_then(|response| response.error_for_status())
                    .map(|_| ())
                    .map_err(|error| format!("failed to deliver custom resource response: {error}"))
            })
        })
    }
}
