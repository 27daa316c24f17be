use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers;
use crate::shared::state::AppState;
use crate::system::auth::middleware::{
    require_admin, require_admin_or_manager, require_auth, require_manager, require_super_user,
};
use crate::system::handlers as system_handlers;

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState) -> Router {
    Router::new()
        // ========================================
        // HEALTH CHECK
        // ========================================
        .route("/health", get(|| async { "ok" }))
        .merge(auth_routes())
        .merge(role_routes(state.clone()))
        .merge(user_routes(state.clone()))
        .merge(test_routes(state.clone()))
        .merge(business_routes(state.clone()))
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(system_handlers::auth::register))
        .route("/api/auth/login", post(system_handlers::auth::login))
}

fn role_routes(state: AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/api/roles/create", post(system_handlers::roles::create))
        .route("/api/roles/assign", post(system_handlers::roles::assign))
        .route("/api/roles/remove", post(system_handlers::roles::remove))
        .route("/api/roles/user/:username", get(system_handlers::roles::user_roles))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let authenticated = Router::new()
        .route("/api/roles/list", get(system_handlers::roles::list))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    admin.merge(authenticated)
}

fn user_routes(state: AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/api/users/create", post(system_handlers::users::create))
        .route("/api/users/update/:id", put(system_handlers::users::update))
        .route("/api/users/delete/:id", delete(system_handlers::users::delete))
        .route("/api/users/assign-role", post(system_handlers::users::assign_role))
        .route("/api/users/remove-role", post(system_handlers::users::remove_role))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let authenticated = Router::new()
        .route("/api/users/list", get(system_handlers::users::list))
        .route("/api/users/profile", get(system_handlers::users::profile))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    admin.merge(authenticated)
}

fn test_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/test/public", get(system_handlers::test::public))
        .route(
            "/api/test/authenticated",
            get(system_handlers::test::authenticated)
                .layer(middleware::from_fn_with_state(state.clone(), require_auth)),
        )
        .route(
            "/api/test/admin-only",
            get(system_handlers::test::admin_only)
                .layer(middleware::from_fn_with_state(state.clone(), require_admin)),
        )
        .route(
            "/api/test/manager-only",
            get(system_handlers::test::manager_only)
                .layer(middleware::from_fn_with_state(state.clone(), require_manager)),
        )
        .route(
            "/api/test/admin-or-manager",
            get(system_handlers::test::admin_or_manager)
                .layer(middleware::from_fn_with_state(state, require_admin_or_manager)),
        )
}

/// Бизнес-роуты: доступны только роли super-user
fn business_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // ========================================
        // STOCK
        // ========================================
        .route("/api/stock/list", get(handlers::a001_stock::list))
        .route("/api/stock/filter", get(handlers::a001_stock::filter))
        .route("/api/stock/stats", get(handlers::a001_stock::stats))
        .route("/api/stock/create", post(handlers::a001_stock::create))
        .route("/api/stock/update/:id", put(handlers::a001_stock::update))
        .route("/api/stock/delete/:id", delete(handlers::a001_stock::delete))
        .route("/api/stock/sync", post(handlers::a001_stock::sync))
        .route("/api/stock/:id", get(handlers::a001_stock::get_by_id))
        // ========================================
        // RECEPTION
        // ========================================
        .route("/api/tbreception/list", get(handlers::a002_reception::list))
        .route("/api/tbreception/stats", get(handlers::a002_reception::stats))
        // ========================================
        // DOSSIER EXPORT
        // ========================================
        .route("/api/dossierexport/list", get(handlers::a003_dossier_export::list))
        .route("/api/dossierexport/stats", get(handlers::a003_dossier_export::stats))
        .route(
            "/api/dossierexport/stats/timeline",
            get(handlers::a003_dossier_export::timeline),
        )
        .route(
            "/api/dossierexport/stats/by-country",
            get(handlers::a003_dossier_export::by_country),
        )
        .route(
            "/api/dossierexport/stats/by-product",
            get(handlers::a003_dossier_export::by_product),
        )
        .route(
            "/api/dossierexport/stats/by-navire",
            get(handlers::a003_dossier_export::by_navire),
        )
        .route(
            "/api/dossierexport/stats/by-station",
            get(handlers::a003_dossier_export::by_station),
        )
        .route(
            "/api/dossierexport/stats/by-client",
            get(handlers::a003_dossier_export::by_client),
        )
        .route("/api/dossierexport/:id", get(handlers::a003_dossier_export::get_by_id))
        // ========================================
        // RAPPORT VENTE
        // ========================================
        .route("/api/rapportvente", get(handlers::a004_rapport_vente::list))
        .route("/api/rapportvente/stats/global", get(handlers::a004_rapport_vente::global))
        .route(
            "/api/rapportvente/stats/timeline",
            get(handlers::a004_rapport_vente::timeline),
        )
        .route(
            "/api/rapportvente/stats/by-station",
            get(handlers::a004_rapport_vente::by_station),
        )
        .route(
            "/api/rapportvente/stats/by-variete",
            get(handlers::a004_rapport_vente::by_variete),
        )
        .route(
            "/api/rapportvente/stats/by-acheteur",
            get(handlers::a004_rapport_vente::by_acheteur),
        )
        .route(
            "/api/rapportvente/stats/average-price",
            get(handlers::a004_rapport_vente::average_price),
        )
        .route(
            "/api/rapportvente/stats/price-timeline",
            get(handlers::a004_rapport_vente::price_timeline),
        )
        .route("/api/rapportvente/:id", get(handlers::a004_rapport_vente::get_by_id))
        // ========================================
        // DECOMPT PROD
        // ========================================
        .route("/api/decomptprod", get(handlers::a005_decompt_prod::list))
        .route("/api/decomptprod/stats/global", get(handlers::a005_decompt_prod::global))
        .route(
            "/api/decomptprod/stats/by-adherent",
            get(handlers::a005_decompt_prod::by_adherent),
        )
        .route(
            "/api/decomptprod/stats/by-variete",
            get(handlers::a005_decompt_prod::by_variete),
        )
        .route(
            "/api/decomptprod/stats/by-station",
            get(handlers::a005_decompt_prod::by_station),
        )
        .route(
            "/api/decomptprod/stats/rendement",
            get(handlers::a005_decompt_prod::rendement),
        )
        .route(
            "/api/decomptprod/stats/export-categories",
            get(handlers::a005_decompt_prod::export_categories),
        )
        .route("/api/decomptprod/:id", get(handlers::a005_decompt_prod::get_by_id))
        .route_layer(middleware::from_fn_with_state(state, require_super_user))
}
