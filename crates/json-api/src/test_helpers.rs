//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};

use lychgate_app::{
    context::AppContext, detection::MockDetectionService, tenants::MockTenantsService,
};

use crate::state::State;

fn strict_detection_mock() -> MockDetectionService {
    let mut detection = MockDetectionService::new();

    detection.expect_detect().never();

    detection
}

fn strict_tenants_mock() -> MockTenantsService {
    let mut tenants = MockTenantsService::new();

    tenants.expect_create_tenant().never();
    tenants.expect_get_tenant().never();
    tenants.expect_list_tenants().never();

    tenants
}

pub(crate) fn state_with_detection(detection: MockDetectionService) -> Arc<State> {
    Arc::new(State::new(AppContext {
        tenants: Arc::new(strict_tenants_mock()),
        detection: Arc::new(detection),
    }))
}

pub(crate) fn state_with_tenants(tenants: MockTenantsService) -> Arc<State> {
    Arc::new(State::new(AppContext {
        tenants: Arc::new(tenants),
        detection: Arc::new(strict_detection_mock()),
    }))
}

pub(crate) fn detection_service(detection: MockDetectionService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_detection(detection)))
            .push(route),
    )
}

pub(crate) fn tenants_service(tenants: MockTenantsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_tenants(tenants)))
            .push(route),
    )
}
