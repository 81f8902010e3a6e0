//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{ClickService, LinkService};
use crate::domain::device::DeviceClassifier;
use crate::domain::repositories::LinkRepository;
use crate::utils::id_generator::IdGenerator;
use crate::utils::link_base::LinkBase;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn LinkRepository>>,
    pub click_service: Arc<ClickService<dyn LinkRepository>>,
    pub classifier: Arc<dyn DeviceClassifier>,
    /// Whether visit IPs are taken from forwarding headers.
    pub behind_proxy: bool,
}

impl AppState {
    /// Wires both services to one repository, generator and link base.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        id_generator: IdGenerator,
        link_base: LinkBase,
        classifier: Arc<dyn DeviceClassifier>,
        behind_proxy: bool,
    ) -> Self {
        let link_service = Arc::new(LinkService::new(
            link_repository.clone(),
            Arc::new(id_generator),
            link_base.clone(),
        ));
        let click_service = Arc::new(ClickService::new(link_repository, link_base));

        Self {
            link_service,
            click_service,
            classifier,
            behind_proxy,
        }
    }
}
