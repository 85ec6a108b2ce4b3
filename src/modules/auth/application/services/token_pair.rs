use uuid::Uuid;

use super::token_hasher::hash_token;
use crate::auth::application::ports::incoming::use_cases::AuthTokens;
use crate::auth::application::ports::outgoing::{TokenError, TokenProvider, TokenSubject};
use crate::user::application::domain::entities::Role;

pub(super) struct IssuedPair {
    pub tokens: AuthTokens,
    pub refresh_hash: String,
}

pub(super) fn issue_token_pair(
    provider: &dyn TokenProvider,
    user_id: Uuid,
    session_id: Uuid,
    roles: Vec<Role>,
) -> Result<IssuedPair, TokenError> {
    let subject = TokenSubject {
        user_id,
        session_id,
        roles,
    };

    let access_token = provider.generate_access_token(&subject)?;
    let refresh_token = provider.generate_refresh_token(&subject)?;
    let refresh_hash = hash_token(&refresh_token);

    Ok(IssuedPair {
        tokens: AuthTokens {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: provider.access_token_expiry(),
            session_id,
        },
        refresh_hash,
    })
}
