pub mod health;

use axum::routing::{on, MethodFilter, MethodRouter};
use axum::Router;
use commerce_core::contract::{Method, Operation, Resource, RouteContract, ROUTES};

use crate::handlers::{automation, products, regions};
use crate::state::AppState;

/// Build the API route tree from the contract registry.
///
/// Paths and methods come from [`ROUTES`]; this module only binds each entry
/// to its handler.
///
/// ```text
/// GET    /api/regions                         -> list_regions
/// POST   /api/regions                         -> create_region
/// GET    /api/products?regionId=              -> list_products
/// POST   /api/products                        -> create_product
/// GET    /api/automation-rules                -> list_automation_rules
/// POST   /api/automation-rules                -> create_automation_rule
/// PATCH  /api/automation-rules/{id}/toggle    -> toggle_automation_rule
/// ```
pub fn api_routes() -> Router<AppState> {
    ROUTES
        .iter()
        .fold(Router::new(), |router, contract| match endpoint(contract) {
            Some(method_router) => router.route(&contract.router_path(), method_router),
            None => {
                tracing::warn!(
                    method = %contract.method,
                    path = contract.path,
                    "No handler bound for registered route",
                );
                router
            }
        })
}

/// The handler for one registry entry, mounted on the entry's method.
pub fn endpoint(contract: &RouteContract) -> Option<MethodRouter<AppState>> {
    let filter = method_filter(contract.method);
    let method_router = match (contract.resource, contract.operation) {
        (Resource::Regions, Operation::List) => on(filter, regions::list_regions),
        (Resource::Regions, Operation::Create) => on(filter, regions::create_region),
        (Resource::Products, Operation::List) => on(filter, products::list_products),
        (Resource::Products, Operation::Create) => on(filter, products::create_product),
        (Resource::Automation, Operation::List) => on(filter, automation::list_automation_rules),
        (Resource::Automation, Operation::Create) => {
            on(filter, automation::create_automation_rule)
        }
        (Resource::Automation, Operation::Toggle) => {
            on(filter, automation::toggle_automation_rule)
        }
        _ => return None,
    };
    Some(method_router)
}

fn method_filter(method: Method) -> MethodFilter {
    match method {
        Method::Get => MethodFilter::GET,
        Method::Post => MethodFilter::POST,
        Method::Patch => MethodFilter::PATCH,
    }
}
