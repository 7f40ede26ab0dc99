use std::sync::Arc;

use crate::{
    db::{DbPool, OrmConn},
    security::TokenKeys,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub tokens: Arc<TokenKeys>,
}

impl AppState {
    pub fn new(pool: DbPool, orm: OrmConn, jwt_secret: &str) -> Self {
        Self {
            pool,
            orm,
            tokens: Arc::new(TokenKeys::new(jwt_secret)),
        }
    }
}
