//! Use cases with canned results, for error paths the in-memory fakes cannot reach.

use async_trait::async_trait;

use crate::auth::application::ports::incoming::use_cases::{
    AuthTokens, LoginCommand, LoginError, LoginUseCase,
};
use crate::user::application::ports::incoming::use_cases::{
    CreateUserCommand, CreateUserError, CreateUserUseCase, UserView,
};

pub struct StubLoginUseCase(pub Result<AuthTokens, LoginError>);

#[async_trait]
impl LoginUseCase for StubLoginUseCase {
    async fn execute(&self, _command: LoginCommand) -> Result<AuthTokens, LoginError> {
        self.0.clone()
    }
}

pub struct StubCreateUserUseCase(pub Result<UserView, CreateUserError>);

#[async_trait]
impl CreateUserUseCase for StubCreateUserUseCase {
    async fn execute(&self, _command: CreateUserCommand) -> Result<UserView, CreateUserError> {
        self.0.clone()
    }
}
