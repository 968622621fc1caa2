use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::roles::index,
        api::roles::new,
        api::roles::create,
        api::roles::edit,
        api::roles::update,
        api::roles::destroy,
        api::admin_topics::index,
        api::admin_topics::create,
        api::admin_topics::destroy,
        api::statistics_announcements::index,
        api::statistics_announcements::create,
        api::statistics_announcements::update,
        api::editions::tabs,
        api::imports::import_publications_csv,
        api::topics::index,
        api::topics::show,
    ),
    tags(
        (name = "whitehall-admin", description = "Publishing admin API")
    )
)]
pub struct ApiDoc;
