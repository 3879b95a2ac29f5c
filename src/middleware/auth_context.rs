use std::future::{ready, Ready};

use actix_web::{dev::Payload, Error, FromRequest, HttpMessage, HttpRequest};

use crate::errors::BookingError;
use crate::middleware::auth::Claims;
use crate::models::user::CurrentUser;

impl From<&Claims> for CurrentUser {
    fn from(claims: &Claims) -> Self {
        CurrentUser {
            id: claims.user_id.clone(),
            email: claims.sub.clone(),
            display_name: claims.name.clone(),
        }
    }
}

/// Available on routes wrapped in `AuthMiddleware`; anywhere else the
/// request is rejected with the sign-in redirect.
impl FromRequest for CurrentUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        match req.extensions().get::<Claims>() {
            Some(claims) => ready(Ok(CurrentUser::from(claims))),
            None => ready(Err(BookingError::Unauthenticated.into())),
        }
    }
}
