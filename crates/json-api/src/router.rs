//! App Router

use salvo::Router;

use crate::{detect, healthcheck, home, tenants};

pub(crate) fn app_router() -> Router {
    Router::new()
        .get(home::handler)
        .push(Router::with_path("health").get(healthcheck::handler))
        .push(Router::with_path("detect").post(detect::create::handler))
        .push(
            Router::with_path("tenants")
                .get(tenants::index::handler)
                .post(tenants::create::handler),
        )
}
