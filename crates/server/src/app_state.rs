use std::path::PathBuf;

use relay::RelayService;

use crate::config::RuntimeEnvironment;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) relay: RelayService,
    pub(crate) environment: RuntimeEnvironment,
    pub(crate) static_root: PathBuf,
}
