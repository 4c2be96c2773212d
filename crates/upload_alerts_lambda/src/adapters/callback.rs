pub trait CallbackSender {
    fn send_callback(&self, response_url: &str, body: &[u8]) -> Result<(), String>;
}
