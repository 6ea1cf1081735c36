// src/state.rs

use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    ai::GenerativeService, config::Config, quiz::SessionRegistry, utils::inflight::InFlight,
    wall::WallStore,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub wall: Arc<WallStore>,
    pub quizzes: Arc<SessionRegistry>,
    pub ai: Arc<dyn GenerativeService>,
    pub inflight: InFlight,
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for Arc<WallStore> {
    fn from_ref(state: &AppState) -> Self {
        state.wall.clone()
    }
}

impl FromRef<AppState> for Arc<SessionRegistry> {
    fn from_ref(state: &AppState) -> Self {
        state.quizzes.clone()
    }
}
