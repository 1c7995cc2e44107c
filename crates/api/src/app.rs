use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{metrics_handler, metrics_middleware, trace_id};
use crate::routes::{
    aturan_periode, auth, health, honorarium, jabatan, kegiatan, laporan, mitra, penugasan,
    perencanaan, satuan, spk_setting, subkegiatan, system_setting, template_spk, users,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);

    let state = AppState {
        pool,
        config: config.clone(),
    };

    // CORS: explicit allow-list with credentials in production, permissive
    // (credential-less) when no origins are configured.
    let cors = if config.security.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::DELETE,
            ])
            .allow_headers([
                axum::http::header::AUTHORIZATION,
                axum::http::header::CONTENT_TYPE,
            ])
            .allow_credentials(true)
    };

    // Public routes: login/register, health, metrics, public settings.
    // Everything else authenticates via the bearer-token extractor in each
    // handler.
    let api = Router::new()
        // auth
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        // accounts (admin only, enforced by the AdminAuth extractor)
        .route("/api/users", get(users::list_users).post(users::create_user))
        .route("/api/users/import", post(users::import_users))
        .route(
            "/api/users/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        // partners
        .route("/api/mitra", get(mitra::list_mitra).post(mitra::create_mitra))
        .route("/api/mitra/paginated", get(mitra::list_mitra_paginated))
        .route("/api/mitra/import", post(mitra::import_mitra))
        .route(
            "/api/mitra/:id",
            get(mitra::get_mitra)
                .put(mitra::update_mitra)
                .delete(mitra::delete_mitra),
        )
        .route("/api/mitra/:id/aktifkan", post(mitra::aktifkan_mitra))
        .route("/api/mitra/:id/nonaktifkan", post(mitra::nonaktifkan_mitra))
        // activities
        .route(
            "/api/kegiatan",
            get(kegiatan::list_kegiatan).post(kegiatan::create_kegiatan),
        )
        .route(
            "/api/kegiatan/:id",
            get(kegiatan::get_kegiatan)
                .put(kegiatan::update_kegiatan)
                .delete(kegiatan::delete_kegiatan),
        )
        // sub-activities
        .route(
            "/api/subkegiatan",
            get(subkegiatan::list_subkegiatan).post(subkegiatan::create_subkegiatan),
        )
        .route(
            "/api/subkegiatan/:id",
            get(subkegiatan::get_subkegiatan)
                .put(subkegiatan::update_subkegiatan)
                .delete(subkegiatan::delete_subkegiatan),
        )
        // positions
        .route(
            "/api/jabatan",
            get(jabatan::list_jabatan).post(jabatan::create_jabatan),
        )
        .route(
            "/api/jabatan/:kode",
            get(jabatan::get_jabatan)
                .put(jabatan::update_jabatan)
                .delete(jabatan::delete_jabatan),
        )
        // units
        .route(
            "/api/satuan",
            get(satuan::list_satuan).post(satuan::create_satuan),
        )
        .route(
            "/api/satuan/:id",
            get(satuan::get_satuan)
                .put(satuan::update_satuan)
                .delete(satuan::delete_satuan),
        )
        // honor rates
        .route(
            "/api/honorarium",
            get(honorarium::list_honorarium).post(honorarium::create_honorarium),
        )
        .route(
            "/api/honorarium/:id",
            get(honorarium::get_honorarium)
                .put(honorarium::update_honorarium)
                .delete(honorarium::delete_honorarium),
        )
        // cap rules
        .route(
            "/api/aturan-periode",
            get(aturan_periode::list_aturan).post(aturan_periode::create_aturan),
        )
        .route(
            "/api/aturan-periode/:id",
            get(aturan_periode::get_aturan)
                .put(aturan_periode::update_aturan)
                .delete(aturan_periode::delete_aturan),
        )
        // planning rosters
        .route(
            "/api/perencanaan",
            get(perencanaan::list_perencanaan).post(perencanaan::create_perencanaan),
        )
        .route("/api/perencanaan/rekap-bulanan", get(laporan::rekap_bulanan))
        .route("/api/perencanaan/rekap-mitra", get(laporan::rekap_mitra))
        .route("/api/perencanaan/rekap-detail", get(laporan::rekap_detail))
        .route(
            "/api/perencanaan/:id",
            get(perencanaan::get_perencanaan)
                .put(perencanaan::update_perencanaan)
                .delete(perencanaan::delete_perencanaan),
        )
        .route(
            "/api/perencanaan/:id/anggota",
            get(perencanaan::list_anggota).post(perencanaan::add_anggota),
        )
        .route(
            "/api/perencanaan/:id/anggota/:anggota_id",
            put(perencanaan::update_anggota).delete(perencanaan::remove_anggota),
        )
        // execution rosters
        .route(
            "/api/penugasan",
            get(penugasan::list_penugasan).post(penugasan::create_penugasan),
        )
        .route(
            "/api/penugasan/import-perencanaan",
            post(penugasan::import_perencanaan),
        )
        .route(
            "/api/penugasan/:id",
            get(penugasan::get_penugasan)
                .put(penugasan::update_penugasan)
                .delete(penugasan::delete_penugasan),
        )
        .route("/api/penugasan/:id/setujui", post(penugasan::setujui_penugasan))
        .route(
            "/api/penugasan/:id/preview-import",
            post(penugasan::preview_import),
        )
        .route(
            "/api/penugasan/:id/anggota",
            get(penugasan::list_anggota).post(penugasan::add_anggota),
        )
        .route(
            "/api/penugasan/:id/anggota/:anggota_id",
            put(penugasan::update_anggota).delete(penugasan::remove_anggota),
        )
        // reporting
        .route("/api/transaksi", get(laporan::transaksi))
        // letter templates
        .route(
            "/api/template-spk",
            get(template_spk::list_template).post(template_spk::create_template),
        )
        .route("/api/template-spk/aktif", get(template_spk::get_template_aktif))
        .route(
            "/api/template-spk/:id",
            get(template_spk::get_template)
                .put(template_spk::update_template)
                .delete(template_spk::delete_template),
        )
        .route(
            "/api/template-spk/:id/aktifkan",
            post(template_spk::aktifkan_template),
        )
        // letter settings
        .route(
            "/api/spk-setting",
            get(spk_setting::list_setting).post(spk_setting::create_setting),
        )
        .route(
            "/api/spk-setting/periode/:periode",
            get(spk_setting::get_setting_by_periode),
        )
        .route(
            "/api/spk-setting/:id",
            get(spk_setting::get_setting)
                .put(spk_setting::update_setting)
                .delete(spk_setting::delete_setting),
        )
        // app settings
        .route("/api/settings/public", get(system_setting::public_settings))
        .route(
            "/api/settings",
            get(system_setting::list_settings).put(system_setting::upsert_setting),
        )
        // health & metrics
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/metrics", get(metrics_handler));

    api
        // Global middleware (bottom layers run first)
        .layer(DefaultBodyLimit::max(
            config.import.max_upload_size + 1024 * 1024,
        ))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
