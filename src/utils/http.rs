use once_cell::sync::Lazy;
use reqwest::Client;
use std::time::Duration;

// Shared outbound client. Vendor calls carry their own per-request
// timeout; the connect timeout bounds socket establishment for all of them.
static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(120))
        .build()
        .expect("Failed to build HTTP client")
});

pub fn get_http_client() -> &'static Client {
    &HTTP_CLIENT
}
