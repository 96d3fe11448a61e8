// src/middleware/rbac.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use std::marker::PhantomData;

use crate::{
    common::error::AppError,
    models::auth::{Role, User},
};

/// 1. O Trait que define a exigência de papel de uma rota
pub trait RoleDef: Send + Sync + 'static {
    fn allows(role: Role) -> bool;
}

/// 2. O Extractor (Guardião): colocar `RequireRole<ManagerOnly>` na
/// assinatura do handler basta para barrar quem não tem o papel.
pub struct RequireRole<T>(pub PhantomData<T>);

// 3. Implementação do FromRequestParts

impl<T, S> FromRequestParts<S> for RequireRole<T>
where
    T: RoleDef,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // O auth_middleware já colocou o usuário nos extensions.
        let user = parts.extensions.get::<User>().ok_or(AppError::InvalidToken)?;

        if !T::allows(user.role) {
            return Err(AppError::Forbidden);
        }

        Ok(RequireRole(PhantomData))
    }
}

// ---
// DEFINIÇÃO DOS PAPÉIS EXIGIDOS (TIPOS)
// ---

// Rotas administrativas: geração de escala, CRUD de turnos, aprovação de
// folgas e trocas, horário de funcionamento.
pub struct ManagerOnly;
impl RoleDef for ManagerOnly {
    fn allows(role: Role) -> bool {
        role == Role::Manager
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manager_only_rejects_employees() {
        assert!(ManagerOnly::allows(Role::Manager));
        assert!(!ManagerOnly::allows(Role::Employee));
    }
}
