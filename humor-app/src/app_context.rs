use crate::application::{BrowseCaptions, ContentStore, SubmitVote};
use crate::config::Config;
use crate::domain::SessionUser;
use crate::infrastructure::auth::GoogleOAuth;
use crate::infrastructure::db::{self, ProfileRepository, SeaOrmStore};
use crate::infrastructure::security::RateLimiter;
use humor_errors::AppError;
use oauth2::PkceCodeVerifier;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppContext {
    pub submit_vote: Arc<SubmitVote>,
    pub browse: Arc<BrowseCaptions>,
    pub profiles: ProfileRepository,
    pub oauth: GoogleOAuth,
    pub vote_limiter: RateLimiter,
}

impl AppContext {
    pub async fn connect(config: &Config) -> Result<Self, AppError> {
        let db = db::create_connection(&config.database_url)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        tracing::info!("Connected to database");

        if config.run_migrations {
            db::run_migrations(&db)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            tracing::info!("Migrations applied");
        }

        let store = SeaOrmStore::new(db);
        let profiles = store.profiles.clone();
        let oauth = GoogleOAuth::new(
            &config.google_client_id,
            &config.google_client_secret,
            &config.google_redirect_uri,
        )?;

        Ok(Self::new(Arc::new(store), profiles, oauth))
    }

    pub fn new(store: Arc<dyn ContentStore>, profiles: ProfileRepository, oauth: GoogleOAuth) -> Self {
        Self {
            submit_vote: Arc::new(SubmitVote::new(store.clone())),
            browse: Arc::new(BrowseCaptions::new(store)),
            profiles,
            oauth,
            vote_limiter: RateLimiter::new(),
        }
    }

    /// Finishes the Google flow and returns the identity to store in the session.
    pub async fn complete_login(
        &self,
        code: &str,
        verifier: PkceCodeVerifier,
    ) -> Result<SessionUser, AppError> {
        let info = self.oauth.exchange_code(code, verifier).await?;
        let profile = self
            .profiles
            .upsert(&info.into_profile())
            .await
            .map_err(|e| {
                tracing::error!("Failed to save profile: {}", e);
                AppError::Database(e.to_string())
            })?;
        tracing::info!(profile_id = %profile.id, "user signed in");
        Ok(SessionUser::from(&profile))
    }
}
