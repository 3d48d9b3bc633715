use anyhow::Result;

use crate::config::AnimationConfig;

#[cfg(not(target_arch = "wasm32"))]
use crate::{
    asset::AssetLoader, controller::PlaybackController, errors::Error, surface::Surface,
};

#[derive(Debug, Default)]
pub struct App {
    pub config: AnimationConfig,
}

impl App {
    pub fn config(mut self, config: AnimationConfig) -> Self {
        self.config = config;
        self
    }

    /// Play on `surface` until `keep_running` returns false.
    ///
    /// Playback starts right away. Each round reads queued sheets, lets the wall
    /// time since the last round pass and sleeps one poll interval.
    ///
    /// Sheets are read from disk, so `base_address` must be a local path. A remote
    /// address is rejected with [`Error::InvalidConfig`].
    #[cfg(not(target_arch = "wasm32"))]
    pub fn run_block<S, F>(self, surface: S, mut keep_running: F) -> Result<()>
    where
        S: Surface,
        F: FnMut(&mut PlaybackController<AssetLoader, S>) -> bool,
    {
        use std::{
            thread,
            time::{Duration, Instant},
        };

        let App { config } = self;
        config.validate()?;
        check_local_address(&config)?;
        let loader = AssetLoader::new(&config);
        let sleep = Duration::from_millis(config.poll_interval_ms);
        let mut controller = PlaybackController::new(config, loader, surface)?;
        controller.start();

        let mut last = Instant::now();
        let mut carry_us = 0u128;
        while keep_running(&mut controller) {
            futures_lite::future::block_on(controller.loader_mut().fetch());
            let now = Instant::now();
            let elapsed_us = now.duration_since(last).as_micros() + carry_us;
            last = now;
            carry_us = elapsed_us % 1000;
            controller.update((elapsed_us / 1000) as u64);
            thread::sleep(sleep);
        }
        Ok(())
    }
}

/// The native reader only opens files, a URL would never load
#[cfg(not(target_arch = "wasm32"))]
fn check_local_address(config: &AnimationConfig) -> Result<(), Error> {
    let address = config.base_address.to_ascii_lowercase();
    if address.starts_with("http://") || address.starts_with("https://") {
        return Err(Error::InvalidConfig(
            "base_address must be a local path on native targets",
        ));
    }
    Ok(())
}

/// Route `log` output to the browser console
#[cfg(target_arch = "wasm32")]
pub fn init_web_logging(level: log::Level) -> Result<()> {
    #[cfg(feature = "web-debug")]
    console_error_panic_hook::set_once();
    console_log::init_with_level(level)?;
    Ok(())
}
