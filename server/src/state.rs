use std::sync::Arc;

use store::{AuthClient, Store};

use crate::cart::Carts;
use crate::config::Config;
use crate::session::SessionAccessor;

pub struct AppState {
    pub config: Config,
    pub store: Store,
    pub auth: Arc<AuthClient>,
    pub session: SessionAccessor,
    pub carts: Carts,
}

impl AppState {
    pub fn new() -> Arc<Self> {
        let config = Config::load();

        let store = Store::new(&config.store_url, &config.store_key);
        let auth = Arc::new(AuthClient::new(&config.store_url, &config.store_key));
        let session = SessionAccessor::init(auth.clone());

        Arc::new(Self {
            config,
            store,
            auth,
            session,
            carts: Carts::new(),
        })
    }
}
