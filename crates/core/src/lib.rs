pub mod domain;
pub mod feed;
pub mod filter;

pub mod config {
    #[derive(Debug, Clone)]
    pub struct Settings {
        pub nav_feed_url: Option<String>,
        pub nav_feed_timeout_secs: Option<u64>,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                nav_feed_url: std::env::var("NAV_FEED_URL").ok(),
                nav_feed_timeout_secs: std::env::var("NAV_FEED_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok()),
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
            })
        }
    }
}
