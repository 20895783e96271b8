//! Per-request tracing: one span per request and one event when it finishes.

use std::future::{Ready, ready};
use std::time::Instant;

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::{StatusCode, header};
use futures_util::future::LocalBoxFuture;
use tracing::{Instrument, error, info, info_span, warn};

use crate::auth::SESSION_COOKIE;

/// Request logger middleware factory.
pub struct RequestLogger;

impl<S, B> Transform<S, ServiceRequest> for RequestLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestLoggerMiddleware { service }))
    }
}

pub struct RequestLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        // `/blog/{id}/rate` rather than `/blog/17/rate`
        let route = req
            .match_pattern()
            .unwrap_or_else(|| req.path().to_string());

        // Presence only; the token itself is never logged.
        let span = info_span!(
            target: "http",
            "request",
            method = %req.method(),
            route = %route,
            path = %req.path(),
            session = req.cookie(SESSION_COOKIE).is_some(),
        );

        let fut = self.service.call(req);

        Box::pin(
            async move {
                let res = fut.await?;
                let location = res
                    .headers()
                    .get(header::LOCATION)
                    .and_then(|value| value.to_str().ok())
                    .map(str::to_string);

                log_outcome(
                    res.status(),
                    start.elapsed().as_millis() as u64,
                    location.as_deref(),
                );
                Ok(res)
            }
            .instrument(span),
        )
    }
}

fn log_outcome(status: StatusCode, duration_ms: u64, location: Option<&str>) {
    let status = status.as_u16();
    match status {
        300..=399 => info!(
            target: "http",
            status,
            duration_ms,
            location = location.unwrap_or_default(),
            "Redirected"
        ),
        400..=499 => warn!(target: "http", status, duration_ms, "Client error"),
        500.. => error!(target: "http", status, duration_ms, "Server error"),
        _ => info!(target: "http", status, duration_ms, "Completed"),
    }
}
