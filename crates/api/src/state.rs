use jobs::InMemJobs;
use solver_heur::Engine;
use std::sync::Arc;

use crate::config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub jobs: Arc<InMemJobs<Engine>>,
}

impl AppState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            jobs: Arc::new(InMemJobs::with_retention(
                Engine::new(),
                settings.jobs_retained,
            )),
        }
    }
}
