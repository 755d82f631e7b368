pub mod auth;
pub mod health;
pub mod tasks;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::register)
        .service(auth::login)
        .service(auth::logout)
        .service(auth::profile)
        .service(
            web::scope("/tasks")
                .service(tasks::index)
                // /create must be registered ahead of the /{id} routes.
                .service(tasks::store)
                .service(tasks::show)
                .service(tasks::update)
                .service(tasks::destroy),
        );
}
