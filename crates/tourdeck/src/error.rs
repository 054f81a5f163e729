/// App related errors
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("subscription error: {0}")]
    Subscription(#[from] SubscriptionError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("generic error: {0}")]
    Generic(String),
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Generic(s)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, thiserror::Error)]
pub enum SubscriptionError {
    /// The receiving side of a snapshot channel was dropped before the
    /// subscription could deliver its first snapshot.
    #[error("snapshot channel closed")]
    ChannelClosed,

    #[error("no active subscriptions")]
    NoActive,
}

impl Error {
    pub fn channel_closed() -> Self {
        Error::Subscription(SubscriptionError::ChannelClosed)
    }

    pub fn no_active_sub() -> Self {
        Error::Subscription(SubscriptionError::NoActive)
    }
}
