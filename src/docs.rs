// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,

        // --- Users ---
        handlers::auth::get_me,

        // --- Schedule ---
        handlers::schedule::generate_schedule,
        handlers::schedule::get_schedule,
        handlers::schedule::create_shift,
        handlers::schedule::update_shift,
        handlers::schedule::delete_shift,

        // --- Shifts ---
        handlers::shifts::my_shifts,
        handlers::shifts::available_shifts,
        handlers::shifts::request_trade,
        handlers::shifts::resolve_trade,
        handlers::shifts::list_trades,

        // --- Availability ---
        handlers::availability::set_availability,
        handlers::availability::get_availability,

        // --- TimeOff ---
        handlers::time_off::request_time_off,
        handlers::time_off::list_time_off,
        handlers::time_off::review_time_off,

        // --- Settings ---
        handlers::settings::get_operating_hours,
        handlers::settings::set_operating_hours,

        // --- Tips ---
        handlers::tips::add_tip,
        handlers::tips::list_tips,
        handlers::tips::tip_stats,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Role,
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Schedule ---
            models::schedule::ShiftStatus,
            models::schedule::TradeStatus,
            models::schedule::Shift,
            models::schedule::ShiftWithUser,
            models::schedule::TradableShift,
            models::schedule::ShiftTrade,
            models::schedule::ShiftTradeDetail,
            models::schedule::GenerateScheduleResponse,
            handlers::schedule::GenerateSchedulePayload,
            handlers::schedule::CreateShiftPayload,
            handlers::schedule::UpdateShiftPayload,
            handlers::shifts::RequestTradePayload,
            handlers::shifts::ResolveTradePayload,

            // --- Availability ---
            models::availability::Availability,
            handlers::availability::SetAvailabilityPayload,

            // --- TimeOff ---
            models::time_off::TimeOffStatus,
            models::time_off::TimeOffRequest,
            models::time_off::TimeOffRequestDetail,
            handlers::time_off::RequestTimeOffPayload,
            handlers::time_off::ReviewTimeOffPayload,

            // --- Settings ---
            models::settings::OperatingHours,
            handlers::settings::SetOperatingHoursPayload,

            // --- Tips ---
            models::tips::TipEntry,
            models::tips::TipEntryDetail,
            models::tips::TipPage,
            models::tips::DailyTipTotal,
            models::tips::TopEarner,
            models::tips::TipStats,
            handlers::tips::AddTipPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Users", description = "Dados do Usuário e Perfil"),
        (name = "Schedule", description = "Geração e Gestão da Escala Semanal"),
        (name = "Shifts", description = "Turnos do Funcionário e Trocas"),
        (name = "Availability", description = "Janelas de Disponibilidade"),
        (name = "TimeOff", description = "Pedidos de Folga"),
        (name = "Settings", description = "Horário de Funcionamento"),
        (name = "Tips", description = "Gorjetas e Estatísticas")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
