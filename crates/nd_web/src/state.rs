use nd_pipeline::Pipeline;

pub struct AppState {
    pub pipeline: Pipeline,
}
