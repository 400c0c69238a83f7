use std::sync::Arc;

use wordquiz_core::QuizEngine;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<QuizEngine>,
}

impl AppState {
    pub fn new(engine: Arc<QuizEngine>) -> Self {
        Self { engine }
    }
}
