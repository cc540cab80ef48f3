// Application state for HTTP handlers
use crate::application::navigation_service::NavigationService;

#[derive(Clone)]
pub struct AppState {
    pub navigation_service: NavigationService,
}
