// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        AvailabilityRepository, ScheduleRepository, SettingsRepository, TimeOffRepository,
        TipsRepository, UserRepository,
    },
    services::{
        auth::AuthService, availability_service::AvailabilityService, generator,
        schedule_service::ScheduleService, settings_service::SettingsService,
        time_off_service::TimeOffService, tips_service::TipsService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_secret: String,
    pub auth_service: AuthService,
    pub schedule_service: ScheduleService,
    pub availability_service: AvailabilityService,
    pub time_off_service: TimeOffService,
    pub settings_service: SettingsService,
    pub tips_service: TipsService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let schedule_repo = ScheduleRepository::new(db_pool.clone());
        let availability_repo = AvailabilityRepository::new(db_pool.clone());
        let time_off_repo = TimeOffRepository::new(db_pool.clone());
        let settings_repo = SettingsRepository::new(db_pool.clone());
        let tips_repo = TipsRepository::new(db_pool.clone());

        let auth_service =
            AuthService::new(user_repo.clone(), jwt_secret.clone(), db_pool.clone());
        let schedule_service = ScheduleService::new(
            db_pool.clone(),
            schedule_repo,
            user_repo,
            availability_repo.clone(),
            time_off_repo.clone(),
            settings_repo.clone(),
            generator::default_templates(),
        );
        let availability_service =
            AvailabilityService::new(db_pool.clone(), availability_repo);
        let time_off_service = TimeOffService::new(time_off_repo);
        let settings_service = SettingsService::new(settings_repo);
        let tips_service = TipsService::new(tips_repo);

        Ok(Self {
            db_pool,
            jwt_secret,
            auth_service,
            schedule_service,
            availability_service,
            time_off_service,
            settings_service,
            tips_service,
        })
    }
}
