use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info};

use crate::config::{validate, Config, ConfigError};
use crate::controller::PaletteController;
use crate::hotkey_runtime::{
    register_toggle, HotkeyRuntimeError, KeyCodeTable, ShortcutRegistration, ShortcutRegistry,
};
use crate::kv_store::KeyValueStore;
use crate::surface::{Navigator, Panel};

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Hotkey(#[from] HotkeyRuntimeError),
}

/// Host-side collaborators consumed once during start-up.
pub struct HostBindings<'a> {
    pub probe: &'a dyn HostProbe,
    pub registry: &'a mut dyn ShortcutRegistry,
    pub key_codes: &'a dyn KeyCodeTable,
}

/// Reports which host globals the switcher needs are still missing.
pub trait HostProbe {
    fn missing_dependencies(&self) -> Vec<&'static str>;
}

pub fn retry_interval(cfg: &Config) -> Duration {
    Duration::from_millis(cfg.init_retry_interval_ms.max(1))
}

/// Polls the host at a fixed interval until every dependency is present. There
/// is no retry limit; the player loads its globals eventually or the page is
/// torn down with us. Returns the number of probes taken.
pub fn wait_for_host<F>(probe: &dyn HostProbe, interval: Duration, mut sleep: F) -> usize
where
    F: FnMut(Duration),
{
    let mut attempts = 0;
    loop {
        attempts += 1;
        let missing = probe.missing_dependencies();
        if missing.is_empty() {
            info!(attempts, "host dependencies available");
            return attempts;
        }

        debug!(attempts, ?missing, "host dependencies missing; retrying");
        sleep(interval);
    }
}

/// Waits for the host, registers the toggle shortcut and hands back a closed
/// controller. The host routes the shortcut callback to `toggle`.
pub fn start<P, N, S, F>(
    cfg: &Config,
    host: HostBindings<'_>,
    panel: P,
    navigator: N,
    storage: S,
    sleep: F,
) -> Result<(PaletteController<P, N, S>, ShortcutRegistration), BootstrapError>
where
    P: Panel,
    N: Navigator,
    S: KeyValueStore,
    F: FnMut(Duration),
{
    validate(cfg)?;
    wait_for_host(host.probe, retry_interval(cfg), sleep);
    let registration = register_toggle(host.registry, host.key_codes, &cfg.hotkey)?;
    let controller = PaletteController::new(cfg, panel, navigator, storage);
    Ok((controller, registration))
}
