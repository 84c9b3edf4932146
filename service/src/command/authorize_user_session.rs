//! [`Command`] for authorizing a [`User`].

use derive_more::{Display, Error, From};
use jsonwebtoken::Validation;
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::User;
use crate::{
    domain::user::{session, Session},
    Service,
};

use super::Command;

/// [`Command`] for authorizing a [`User`] by a [`Session`] token issued by
/// the identity service.
#[derive(Clone, Debug, From)]
pub struct AuthorizeUserSession {
    /// [`Session`] token to authorize.
    pub token: session::Token,
}

impl<Db> Command<AuthorizeUserSession> for Service<Db> {
    type Ok = Session;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: AuthorizeUserSession,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let AuthorizeUserSession { token } = cmd;

        Ok(jsonwebtoken::decode::<Session>(
            token.as_ref(),
            &self.config().jwt_decoding_key,
            &Validation::default(),
        )
        .map_err(tracerr::from_and_wrap!(=> E))?
        .claims)
    }
}

/// Error of [`AuthorizeUserSession`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`jsonwebtoken`] decoding error.
    #[display("Failed to decode a JSON Web Token: {_0}")]
    JsonWebTokenDecodeError(jsonwebtoken::errors::Error),
}

#[cfg(test)]
mod spec {
    use common::DateTime;
    use jsonwebtoken::{EncodingKey, Header};

    use crate::{domain::user, infra::database::mock::Mock, Config};

    use super::*;

    fn token(session: &Session, secret: &[u8]) -> session::Token {
        jsonwebtoken::encode(
            &Header::default(),
            session,
            &EncodingKey::from_secret(secret),
        )
        .unwrap()
        .into()
    }

    fn expiring_in(secs: i64) -> session::ExpirationDateTime {
        DateTime::from_unix_timestamp(DateTime::now().unix_timestamp() + secs)
            .unwrap()
            .coerce()
    }

    #[tokio::test]
    async fn accepts_valid_token() {
        let svc =
            Service::new(Config::from_secret(b"secret"), Mock::default());
        let session = Session {
            user_id: user::Id::new(),
            expires_at: expiring_in(3600),
        };

        let authorized = svc
            .execute(AuthorizeUserSession::from(token(&session, b"secret")))
            .await
            .unwrap();

        assert_eq!(authorized.user_id, session.user_id);
    }

    #[tokio::test]
    async fn reads_user_from_subject_claim() {
        let svc =
            Service::new(Config::from_secret(b"secret"), Mock::default());
        let user_id = user::Id::new();
        let claims = serde_json::json!({
            "sub": user_id.to_string(),
            "exp": DateTime::now().unix_timestamp() + 3600,
        });
        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();

        let authorized = svc
            .execute(AuthorizeUserSession::from(session::Token::from(token)))
            .await
            .unwrap();

        assert_eq!(authorized.user_id, user_id);
    }

    #[tokio::test]
    async fn rejects_foreign_or_expired_tokens() {
        let svc =
            Service::new(Config::from_secret(b"secret"), Mock::default());
        for (expires_at, secret) in [
            (expiring_in(3600), b"foreign".as_slice()),
            (expiring_in(-3600), b"secret".as_slice()),
        ] {
            let session = Session {
                user_id: user::Id::new(),
                expires_at,
            };

            assert!(svc
                .execute(AuthorizeUserSession::from(token(&session, secret)))
                .await
                .is_err());
        }
    }
}
