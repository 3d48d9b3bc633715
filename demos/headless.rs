use std::{env, fs};

use frameplay::prelude::*;
use glam::UVec2;
use image::{Rgb, RgbImage};

const SHEETS: u32 = 7;

/// Logs every frame instead of painting it
#[derive(Default)]
struct LogSurface {
    frames: usize,
}

impl Surface for LogSurface {
    fn draw(&mut self, texture: &Handle, src: SourceRect, dst_size: UVec2) {
        self.frames += 1;
        log::info!(
            "sheet {} frame at {:?} -> {:?}",
            texture.resource_index(),
            src.offset,
            dst_size
        );
    }

    fn set_progress_width(&mut self, percent: f32) {
        log::info!("progress {percent:.1}%");
    }
}

/// Write one solid color sheet per index, each cell a little darker
fn write_sheets(dir: &std::path::Path) -> Result<()> {
    fs::create_dir_all(dir)?;
    for index in 0..SHEETS {
        let im = RgbImage::from_fn(640, 360, |x, y| {
            let cell = (y / 72) * 5 + x / 128;
            let shade = 255 - (cell * 8) as u8;
            Rgb([shade, (index * 36) as u8, 255 - shade])
        });
        im.save(dir.join(format!("{index}.jpg")))?;
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let dir = env::temp_dir().join("frameplay-demo");
    write_sheets(&dir)?;

    let mut config = AnimationConfig::default()
        .base_address(format!("{}/", dir.display()))
        .load_timeout_ms(Some(5_000));
    config.tick_interval_ms = 20;

    let total = config.total_frames();
    App::default()
        .config(config)
        .run_block(LogSurface::default(), |controller| {
            controller.surface().frames < total
        })?;
    log::info!("played {total} frames");
    Ok(())
}
