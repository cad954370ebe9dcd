use crate::{
    api::{employee, leave_request},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    // Helper to build per-resource limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    cfg.service(
        web::scope(&config.api_prefix)
            .service(
                web::scope("/LeaveRequests")
                    // /LeaveRequests
                    .service(
                        web::resource("")
                            .wrap(build_limiter(config.rate_write_per_min))
                            .route(web::get().to(leave_request::list_requests))
                            .route(web::post().to(leave_request::create_request)),
                    )
                    // /LeaveRequests/{id}
                    .service(
                        web::resource("/{id}")
                            .wrap(build_limiter(config.rate_write_per_min))
                            .route(web::get().to(leave_request::get_request))
                            .route(web::delete().to(leave_request::delete_request)),
                    )
                    // /LeaveRequests/{id}/status
                    .service(
                        web::resource("/{id}/status")
                            .wrap(build_limiter(config.rate_write_per_min))
                            .route(web::put().to(leave_request::set_status)),
                    )
                    // /LeaveRequests/{id}/cancel
                    .service(
                        web::resource("/{id}/cancel")
                            .wrap(build_limiter(config.rate_write_per_min))
                            .route(web::post().to(leave_request::cancel_request)),
                    ),
            )
            .service(
                web::scope("/employees").service(
                    web::resource("")
                        .wrap(build_limiter(config.rate_read_per_min))
                        .route(web::get().to(employee::list_employees)),
                ),
            ),
    );
}
