use tokio::sync::Mutex;

/// Bearer-token authentication state shared between the application shell
/// and the client pipeline. The pipeline reads the token before every
/// request and clears it when the server reports the session dead.
#[derive(Default)]
pub struct Session {
    token: Mutex<Option<String>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn log_in(&self, token: impl Into<String>) {
        *self.token.lock().await = Some(token.into());
    }

    pub async fn log_out(&self) {
        *self.token.lock().await = None;
    }

    pub async fn token(&self) -> Option<String> {
        self.token.lock().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.token.lock().await.is_some()
    }
}

/// Seam through which an expired session forces the whole application back
/// to the login screen. The shell installs its router here; tests install a
/// recorder.
pub trait Navigator: Send + Sync {
    fn go_to_login(&self);
}
