use std::{
    future::{ready, Ready},
    rc::Rc,
};

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    web, Error, HttpResponse,
};
use futures::future::LocalBoxFuture;

use crate::auth::{middleware::token_from_request, Claims, JwtService};

pub const LANDING_PATH: &str = "/";
pub const ADMIN_PREFIX: &str = "/admin";
pub const ADMIN_DASHBOARD_PATH: &str = "/admin";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    Redirect(&'static str),
}

/// Pure routing rule: a signed-in admin has no business on the landing page,
/// an anonymous visitor has none under the admin prefix. Anything else passes
/// through. Never touches the store; the role comes from the claim alone.
pub fn decide(path: &str, claims: Option<&Claims>) -> RouteDecision {
    let is_admin = claims.map(Claims::is_admin).unwrap_or(false);

    if path == LANDING_PATH && is_admin {
        return RouteDecision::Redirect(ADMIN_DASHBOARD_PATH);
    }

    let in_admin_area = path == ADMIN_PREFIX
        || path
            .strip_prefix(ADMIN_PREFIX)
            .is_some_and(|rest| rest.starts_with('/'));
    if in_admin_area && claims.is_none() {
        return RouteDecision::Redirect(LANDING_PATH);
    }

    RouteDecision::Allow
}

/// Applies [`decide`] ahead of every handler; an invalid or absent token is
/// treated as no session, never as a request-aborting fault.
pub struct RouteGuard;

impl<S, B> Transform<S, ServiceRequest> for RouteGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RouteGuardService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RouteGuardService {
            service: Rc::new(service),
        }))
    }
}

pub struct RouteGuardService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RouteGuardService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let claims = req
            .app_data::<web::Data<JwtService>>()
            .and_then(|jwt_service| {
                let token = token_from_request(&req)?;
                jwt_service.validate_token(&token).ok()
            });

        match decide(req.path(), claims.as_ref()) {
            RouteDecision::Redirect(location) => {
                let response = HttpResponse::Found()
                    .insert_header((header::LOCATION, location))
                    .finish();
                let res = req.into_response(response).map_into_right_body();
                Box::pin(async move { Ok(res) })
            }
            RouteDecision::Allow => {
                let service = Rc::clone(&self.service);
                Box::pin(async move {
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::UserRole;

    fn claims_with_role(role: UserRole) -> Claims {
        Claims {
            sub: "user-1".to_string(),
            email: "user@example.com".to_string(),
            role,
            iat: 0,
            exp: 9999999999,
        }
    }

    #[test]
    fn test_admin_on_landing_redirects_to_dashboard() {
        let claims = claims_with_role(UserRole::Admin);
        assert_eq!(
            decide("/", Some(&claims)),
            RouteDecision::Redirect(ADMIN_DASHBOARD_PATH)
        );
    }

    #[test]
    fn test_anonymous_on_landing_allowed() {
        assert_eq!(decide("/", None), RouteDecision::Allow);
    }

    #[test]
    fn test_anonymous_on_admin_redirects_to_landing() {
        assert_eq!(
            decide("/admin", None),
            RouteDecision::Redirect(LANDING_PATH)
        );
        assert_eq!(
            decide("/admin/quiz/abc-123", None),
            RouteDecision::Redirect(LANDING_PATH)
        );
    }

    #[test]
    fn test_admin_on_admin_allowed() {
        let claims = claims_with_role(UserRole::Admin);
        assert_eq!(decide("/admin", Some(&claims)), RouteDecision::Allow);
        assert_eq!(
            decide("/admin/quiz/new", Some(&claims)),
            RouteDecision::Allow
        );
    }

    #[test]
    fn test_non_admin_session_on_landing_allowed() {
        let claims = claims_with_role(UserRole::User);
        assert_eq!(decide("/", Some(&claims)), RouteDecision::Allow);
    }

    #[test]
    fn test_prefix_match_is_path_segment_aware() {
        // "/administrators" is not inside the admin area
        assert_eq!(decide("/administrators", None), RouteDecision::Allow);
    }

    #[test]
    fn test_other_paths_pass_through() {
        assert_eq!(decide("/health", None), RouteDecision::Allow);
        assert_eq!(decide("/api/quizzes", None), RouteDecision::Allow);
    }
}
